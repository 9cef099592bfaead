use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Placeholder stored for optional free-text fields the intake form left blank.
pub const PLACEHOLDER: &str = "-";

/// Canonical job lifecycle labels. The field itself is an open set: records
/// written by other clients may carry values outside this list, so matching
/// code must never assume the set is closed.
pub mod status {
    pub const IN_PROGRESS: &str = "In Progress";
    pub const COMPLETED: &str = "Completed";
    pub const DELIVERED: &str = "Delivered";
}

/// Canonical payment status labels. Open set, same caveat as [`status`].
pub mod payment {
    pub const UNPAID: &str = "Unpaid";
    pub const DOWNPAYMENT: &str = "Downpayment";
    pub const PAID: &str = "Paid";
}

/// One lab work order, tracked from receipt through delivery and payment.
///
/// Mirrors the record layout under the store's `sales` namespace. Monetary
/// fields use `Decimal`; `date_received` stays a string because the store
/// holds whatever the intake form submitted, and downstream date bucketing
/// must tolerate malformed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct JobRecord {
    pub id: String,
    pub date_received: String,
    pub doctor: String,
    pub description: String,
    #[serde(default)]
    pub units: u32,
    #[serde(default = "default_placeholder")]
    pub shade: String,
    #[serde(default = "default_placeholder")]
    pub tech_metal: String,
    #[serde(default = "default_placeholder")]
    pub tech_build_up: String,
    #[serde(default = "default_placeholder")]
    pub messenger_pick_up: String,
    #[serde(default = "default_placeholder")]
    pub messenger_deliver: String,
    #[serde(default = "default_placeholder")]
    pub date_deliver: String,
    pub amount: Decimal,
    #[serde(default)]
    pub amount_paid: Decimal,
    #[serde(default = "default_payment_status")]
    pub payment_status: String,
    pub status: String,
    /// Creation instant, epoch milliseconds. Immutable.
    pub timestamp: i64,
    /// Id of the user who created the record. Immutable.
    pub created_by: String,
}

fn default_placeholder() -> String {
    PLACEHOLDER.to_string()
}

fn default_payment_status() -> String {
    payment::UNPAID.to_string()
}

impl JobRecord {
    /// Outstanding sum owed. Always recomputed, never cached; may be negative
    /// for legacy overpaid records.
    pub fn balance(&self) -> Decimal {
        self.amount - self.amount_paid
    }

    /// Payment status with the empty-field fallback applied.
    pub fn effective_payment_status(&self) -> &str {
        if self.payment_status.trim().is_empty() {
            payment::UNPAID
        } else {
            &self.payment_status
        }
    }

    /// `date_received` parsed as a calendar date, if well formed.
    pub fn received_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date_received, "%Y-%m-%d").ok()
    }
}

/// Intake payload for a new lab job. Status is not accepted here: every job
/// starts life as `In Progress`.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewJob {
    #[validate(custom = "validate_calendar_date")]
    pub date_received: String,
    #[validate(length(min = 1, message = "Doctor is required"))]
    pub doctor: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[serde(default)]
    pub units: u32,
    pub shade: Option<String>,
    pub tech_metal: Option<String>,
    pub tech_build_up: Option<String>,
    pub messenger_pick_up: Option<String>,
    pub messenger_deliver: Option<String>,
    pub date_deliver: Option<String>,
    pub amount: Decimal,
    #[serde(default)]
    pub amount_paid: Decimal,
    pub payment_status: Option<String>,
}

/// Merge-style update: only the provided fields change. `date_received`,
/// `timestamp`, and `created_by` are never editable.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct JobUpdate {
    pub status: Option<String>,
    pub doctor: Option<String>,
    pub description: Option<String>,
    pub units: Option<u32>,
    pub shade: Option<String>,
    pub tech_metal: Option<String>,
    pub tech_build_up: Option<String>,
    pub messenger_pick_up: Option<String>,
    pub messenger_deliver: Option<String>,
    pub date_deliver: Option<String>,
    pub amount: Option<Decimal>,
    pub amount_paid: Option<Decimal>,
    pub payment_status: Option<String>,
}

impl JobUpdate {
    /// Applies the provided fields onto an existing record.
    pub fn apply_to(&self, record: &mut JobRecord) {
        if let Some(status) = &self.status {
            record.status = status.clone();
        }
        if let Some(doctor) = &self.doctor {
            record.doctor = doctor.clone();
        }
        if let Some(description) = &self.description {
            record.description = description.clone();
        }
        if let Some(units) = self.units {
            record.units = units;
        }
        if let Some(shade) = &self.shade {
            record.shade = or_placeholder(shade);
        }
        if let Some(tech_metal) = &self.tech_metal {
            record.tech_metal = or_placeholder(tech_metal);
        }
        if let Some(tech_build_up) = &self.tech_build_up {
            record.tech_build_up = or_placeholder(tech_build_up);
        }
        if let Some(messenger_pick_up) = &self.messenger_pick_up {
            record.messenger_pick_up = or_placeholder(messenger_pick_up);
        }
        if let Some(messenger_deliver) = &self.messenger_deliver {
            record.messenger_deliver = or_placeholder(messenger_deliver);
        }
        if let Some(date_deliver) = &self.date_deliver {
            record.date_deliver = or_placeholder(date_deliver);
        }
        if let Some(amount) = self.amount {
            record.amount = amount;
        }
        if let Some(amount_paid) = self.amount_paid {
            record.amount_paid = amount_paid;
        }
        if let Some(payment_status) = &self.payment_status {
            record.payment_status = payment_status.clone();
        }
    }
}

/// Blank optional text collapses to the stored placeholder.
pub fn or_placeholder(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}

fn validate_calendar_date(value: &str) -> Result<(), ValidationError> {
    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok() {
        Ok(())
    } else {
        let mut err = ValidationError::new("date");
        err.message = Some("Expected a YYYY-MM-DD calendar date".into());
        Err(err)
    }
}
