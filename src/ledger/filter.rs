use serde::Deserialize;
use utoipa::IntoParams;

use crate::models::JobRecord;

/// An exact-match selector over an open set of labels. `All` disables the
/// dimension entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selector {
    #[default]
    All,
    Only(String),
}

impl Selector {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(wanted) => wanted == value,
        }
    }

    fn from_query(raw: Option<String>) -> Self {
        match raw {
            None => Selector::All,
            Some(s) if s == "All" => Selector::All,
            Some(s) => Selector::Only(s),
        }
    }
}

/// Query parameters accepted by the job list endpoint. All dimensions are
/// optional; the empty query is the identity filter.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct JobListQuery {
    /// Case-insensitive substring matched against doctor, description,
    /// shade, and both technician fields.
    pub search: Option<String>,
    /// Exact job status, or "All".
    pub status: Option<String>,
    /// Exact payment status, or "All".
    pub payment_status: Option<String>,
}

/// Compound filter: every active dimension must pass for a record to
/// survive. Filtering never reorders the input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilter {
    pub search: String,
    pub status: Selector,
    pub payment_status: Selector,
}

impl From<JobListQuery> for JobFilter {
    fn from(query: JobListQuery) -> Self {
        Self {
            search: query.search.unwrap_or_default(),
            status: Selector::from_query(query.status),
            payment_status: Selector::from_query(query.payment_status),
        }
    }
}

impl JobFilter {
    pub fn matches(&self, job: &JobRecord) -> bool {
        self.matches_search(job)
            && self.status.matches(&job.status)
            && self
                .payment_status
                .matches(job.effective_payment_status())
    }

    fn matches_search(&self, job: &JobRecord) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        [
            &job.doctor,
            &job.description,
            &job.shade,
            &job.tech_metal,
            &job.tech_build_up,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Applies the filter to a snapshot, preserving input order.
    pub fn apply<'a>(&self, jobs: &'a [JobRecord]) -> Vec<&'a JobRecord> {
        jobs.iter().filter(|job| self.matches(job)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::{payment, status};
    use rust_decimal_macros::dec;

    fn job(doctor: &str, description: &str, status: &str, payment_status: &str) -> JobRecord {
        JobRecord {
            id: uuid::Uuid::new_v4().to_string(),
            date_received: "2026-08-29".into(),
            doctor: doctor.into(),
            description: description.into(),
            units: 1,
            shade: "A2".into(),
            tech_metal: "Marco".into(),
            tech_build_up: "Lena".into(),
            messenger_pick_up: "-".into(),
            messenger_deliver: "-".into(),
            date_deliver: "-".into(),
            amount: dec!(100),
            amount_paid: dec!(0),
            payment_status: payment_status.into(),
            status: status.into(),
            timestamp: 0,
            created_by: "u".into(),
        }
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let filter = JobFilter {
            search: "smith".into(),
            ..Default::default()
        };
        assert!(filter.matches(&job("Dr. Smith", "Crown", status::IN_PROGRESS, payment::UNPAID)));
        assert!(!filter.matches(&job("Dr. Reyes", "Crown", status::IN_PROGRESS, payment::UNPAID)));
    }

    #[test]
    fn search_spans_technician_fields() {
        let filter = JobFilter {
            search: "marco".into(),
            ..Default::default()
        };
        assert!(filter.matches(&job("Dr. Reyes", "Crown", status::IN_PROGRESS, payment::UNPAID)));
    }

    #[test]
    fn dimensions_combine_with_and() {
        let filter = JobFilter {
            search: "crown".into(),
            status: Selector::Only(status::COMPLETED.into()),
            payment_status: Selector::Only(payment::PAID.into()),
        };
        assert!(filter.matches(&job("Dr. Reyes", "Crown", status::COMPLETED, payment::PAID)));
        // right text, wrong status
        assert!(!filter.matches(&job("Dr. Reyes", "Crown", status::IN_PROGRESS, payment::PAID)));
        // right status, wrong payment
        assert!(!filter.matches(&job("Dr. Reyes", "Crown", status::COMPLETED, payment::UNPAID)));
    }

    #[test]
    fn empty_payment_status_matches_unpaid_selector() {
        let filter = JobFilter {
            payment_status: Selector::Only(payment::UNPAID.into()),
            ..Default::default()
        };
        assert!(filter.matches(&job("Dr. Reyes", "Crown", status::IN_PROGRESS, "")));
    }

    #[test]
    fn default_filter_is_the_identity() {
        let jobs = vec![
            job("Dr. A", "Crown", status::IN_PROGRESS, payment::UNPAID),
            job("Dr. B", "Bridge", status::COMPLETED, payment::PAID),
        ];
        let kept = JobFilter::default().apply(&jobs);
        assert_eq!(kept.len(), jobs.len());
    }

    #[test]
    fn filtering_preserves_input_order() {
        let jobs = vec![
            job("Dr. Smith", "Crown", status::IN_PROGRESS, payment::UNPAID),
            job("Dr. Reyes", "Bridge", status::IN_PROGRESS, payment::UNPAID),
            job("Dr. Smithers", "Veneer", status::IN_PROGRESS, payment::UNPAID),
        ];
        let filter = JobFilter {
            search: "smith".into(),
            ..Default::default()
        };
        let kept = filter.apply(&jobs);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].doctor, "Dr. Smith");
        assert_eq!(kept[1].doctor, "Dr. Smithers");
    }

    #[test]
    fn all_selector_parses_from_query() {
        let filter: JobFilter = JobListQuery {
            search: None,
            status: Some("All".into()),
            payment_status: Some("Paid".into()),
        }
        .into();
        assert_eq!(filter.status, Selector::All);
        assert_eq!(filter.payment_status, Selector::Only("Paid".into()));
    }
}
