use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{audit::actions, job::payment, job::status};

/// Visual severity bucket attached to list rows and audit entries. The
/// classifiers below are total: any label, including ones the lab invents
/// later, falls into exactly one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BadgeCategory {
    Success,
    Info,
    Warning,
    Danger,
}

pub fn payment_badge(payment_status: &str) -> BadgeCategory {
    match payment_status {
        payment::PAID => BadgeCategory::Success,
        payment::DOWNPAYMENT => BadgeCategory::Info,
        _ => BadgeCategory::Danger,
    }
}

pub fn status_badge(job_status: &str) -> BadgeCategory {
    match job_status {
        status::COMPLETED | status::DELIVERED => BadgeCategory::Success,
        _ => BadgeCategory::Warning,
    }
}

pub fn audit_badge(action: &str) -> BadgeCategory {
    match action {
        actions::CREATE => BadgeCategory::Success,
        actions::UPDATE => BadgeCategory::Warning,
        actions::DELETE => BadgeCategory::Danger,
        _ => BadgeCategory::Info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Paid", BadgeCategory::Success)]
    #[test_case("Downpayment", BadgeCategory::Info)]
    #[test_case("Unpaid", BadgeCategory::Danger)]
    #[test_case("", BadgeCategory::Danger)]
    #[test_case("Store Credit", BadgeCategory::Danger; "unknown label falls through to danger")]
    fn payment_badges(label: &str, expected: BadgeCategory) {
        assert_eq!(payment_badge(label), expected);
    }

    #[test_case("Completed", BadgeCategory::Success)]
    #[test_case("Delivered", BadgeCategory::Success)]
    #[test_case("In Progress", BadgeCategory::Warning)]
    #[test_case("On Hold", BadgeCategory::Warning; "unknown label falls through to warning")]
    fn status_badges(label: &str, expected: BadgeCategory) {
        assert_eq!(status_badge(label), expected);
    }

    #[test_case("CREATE", BadgeCategory::Success)]
    #[test_case("UPDATE", BadgeCategory::Warning)]
    #[test_case("DELETE", BadgeCategory::Danger)]
    #[test_case("EXPORT", BadgeCategory::Info)]
    #[test_case("PRINT", BadgeCategory::Info)]
    #[test_case("LOGIN", BadgeCategory::Info; "unknown action falls through to info")]
    fn audit_badges(action: &str, expected: BadgeCategory) {
        assert_eq!(audit_badge(action), expected);
    }
}
