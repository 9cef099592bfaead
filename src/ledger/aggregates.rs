use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{job::status, JobRecord};

/// The four dashboard metrics, recomputed in full from each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardTotals {
    /// Cash received for jobs logged today (sum of `amount_paid`).
    pub total_today: Decimal,
    /// Cash received for jobs logged in the current month.
    pub total_month: Decimal,
    pub jobs_in_progress: u64,
    /// Sum of positive outstanding balances. Overpaid records contribute
    /// nothing; they never subtract from the total.
    pub total_pending: Decimal,
}

impl DashboardTotals {
    /// Pure fold over a snapshot. Jobs whose `date_received` fails to parse
    /// simply land in no date bucket; a missing `amount_paid` has already
    /// been defaulted to zero at deserialization.
    pub fn compute(jobs: &[JobRecord], today: NaiveDate) -> Self {
        let mut totals = Self {
            total_today: Decimal::ZERO,
            total_month: Decimal::ZERO,
            jobs_in_progress: 0,
            total_pending: Decimal::ZERO,
        };

        for job in jobs {
            if job.status == status::IN_PROGRESS {
                totals.jobs_in_progress += 1;
            }

            if let Some(received) = job.received_date() {
                if received == today {
                    totals.total_today += job.amount_paid;
                }
                if received.year() == today.year() && received.month() == today.month() {
                    totals.total_month += job.amount_paid;
                }
            }

            let balance = job.balance();
            if balance > Decimal::ZERO {
                totals.total_pending += balance;
            }
        }

        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::payment;
    use rust_decimal_macros::dec;

    fn job(date_received: &str, amount: Decimal, amount_paid: Decimal, status: &str) -> JobRecord {
        JobRecord {
            id: uuid::Uuid::new_v4().to_string(),
            date_received: date_received.into(),
            doctor: "Dr. Cruz".into(),
            description: "Bridge".into(),
            units: 1,
            shade: "-".into(),
            tech_metal: "-".into(),
            tech_build_up: "-".into(),
            messenger_pick_up: "-".into(),
            messenger_deliver: "-".into(),
            date_deliver: "-".into(),
            amount,
            amount_paid,
            payment_status: payment::UNPAID.into(),
            status: status.into(),
            timestamp: 0,
            created_by: "u".into(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
    }

    #[test]
    fn worked_example_from_the_dashboard() {
        let jobs = vec![
            job("2026-08-29", dec!(1000), dec!(1000), status::COMPLETED),
            job("2026-08-29", dec!(500), dec!(200), status::IN_PROGRESS),
        ];
        let totals = DashboardTotals::compute(&jobs, today());
        assert_eq!(totals.total_today, dec!(1200));
        assert_eq!(totals.total_month, dec!(1200));
        assert_eq!(totals.total_pending, dec!(300));
        assert_eq!(totals.jobs_in_progress, 1);
    }

    #[test]
    fn month_bucket_includes_other_days_but_not_other_months() {
        let jobs = vec![
            job("2026-08-01", dec!(400), dec!(400), status::DELIVERED),
            job("2026-07-31", dec!(900), dec!(900), status::DELIVERED),
        ];
        let totals = DashboardTotals::compute(&jobs, today());
        assert_eq!(totals.total_today, Decimal::ZERO);
        assert_eq!(totals.total_month, dec!(400));
    }

    #[test]
    fn overpayment_is_excluded_from_pending_not_subtracted() {
        let jobs = vec![
            job("2026-08-29", dec!(100), dec!(250), status::DELIVERED),
            job("2026-08-29", dec!(500), dec!(200), status::IN_PROGRESS),
        ];
        let totals = DashboardTotals::compute(&jobs, today());
        assert_eq!(totals.total_pending, dec!(300));
    }

    #[test]
    fn malformed_date_matches_no_bucket_and_does_not_panic() {
        let jobs = vec![job("not-a-date", dec!(100), dec!(100), status::IN_PROGRESS)];
        let totals = DashboardTotals::compute(&jobs, today());
        assert_eq!(totals.total_today, Decimal::ZERO);
        assert_eq!(totals.total_month, Decimal::ZERO);
        // status counting is independent of the date fields
        assert_eq!(totals.jobs_in_progress, 1);
    }

    #[test]
    fn recomputation_is_idempotent() {
        let jobs = vec![
            job("2026-08-29", dec!(1000), dec!(250), status::IN_PROGRESS),
            job("2026-08-15", dec!(750), dec!(750), status::DELIVERED),
        ];
        let first = DashboardTotals::compute(&jobs, today());
        let second = DashboardTotals::compute(&jobs, today());
        assert_eq!(first, second);
    }
}
