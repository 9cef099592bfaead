use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{error, info, instrument};
use validator::Validate;

use crate::auth::AuthUser;
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::{audit::actions, job::status, JobRecord, JobUpdate, NewJob, PLACEHOLDER};
use crate::store::RecordStore;

use super::AuditService;

/// Write path for job records. Reads go through the ledger; everything
/// that mutates the table funnels through here so audit entries and
/// events are emitted consistently.
#[derive(Clone)]
pub struct JobService {
    store: Arc<dyn RecordStore>,
    event_sender: Arc<EventSender>,
    audit: AuditService,
}

impl JobService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        event_sender: Arc<EventSender>,
        audit: AuditService,
    ) -> Self {
        Self {
            store,
            event_sender,
            audit,
        }
    }

    #[instrument(skip(self, new_job, actor), fields(doctor = %new_job.doctor))]
    pub async fn create_job(
        &self,
        new_job: NewJob,
        actor: &AuthUser,
    ) -> Result<JobRecord, ServiceError> {
        new_job.validate()?;
        check_payment_bounds(new_job.amount, new_job.amount_paid)?;

        // New work always starts on the bench, whatever the client sent.
        let record = JobRecord {
            id: String::new(),
            date_received: new_job.date_received,
            doctor: new_job.doctor,
            description: new_job.description,
            units: new_job.units,
            shade: or_placeholder(new_job.shade),
            tech_metal: or_placeholder(new_job.tech_metal),
            tech_build_up: or_placeholder(new_job.tech_build_up),
            messenger_pick_up: or_placeholder(new_job.messenger_pick_up),
            messenger_deliver: or_placeholder(new_job.messenger_deliver),
            date_deliver: or_placeholder(new_job.date_deliver),
            amount: new_job.amount,
            amount_paid: new_job.amount_paid,
            payment_status: new_job
                .payment_status
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| crate::models::job::payment::UNPAID.to_string()),
            status: status::IN_PROGRESS.to_string(),
            timestamp: Utc::now().timestamp_millis(),
            created_by: actor.user_id.clone(),
        };

        let created = self.store.create_job(record).await?;
        info!(job_id = %created.id, "job record created");

        if let Err(e) = self
            .event_sender
            .send(Event::JobCreated(created.id.clone()))
            .await
        {
            error!("Failed to send event: {}", e);
        }
        self.audit
            .record(
                &actor.name,
                actions::CREATE,
                format!("Added job for {}: {}", created.doctor, created.description),
            )
            .await;

        Ok(created)
    }

    #[instrument(skip(self, update, actor), fields(job_id = %id))]
    pub async fn update_job(
        &self,
        id: &str,
        update: JobUpdate,
        actor: &AuthUser,
    ) -> Result<JobRecord, ServiceError> {
        let existing = self
            .store
            .get_job(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Job {id} not found")))?;

        let amount = update.amount.unwrap_or(existing.amount);
        let amount_paid = update.amount_paid.unwrap_or(existing.amount_paid);
        check_payment_bounds(amount, amount_paid)?;
        if let Some(doctor) = &update.doctor {
            if doctor.trim().is_empty() {
                return Err(ServiceError::ValidationError(
                    "doctor must not be empty".into(),
                ));
            }
        }
        if let Some(description) = &update.description {
            if description.trim().is_empty() {
                return Err(ServiceError::ValidationError(
                    "description must not be empty".into(),
                ));
            }
        }

        let old_status = existing.status.clone();
        let updated = self
            .store
            .update_job(id, update)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Job {id} not found")))?;

        if let Err(e) = self
            .event_sender
            .send(Event::JobUpdated(updated.id.clone()))
            .await
        {
            error!("Failed to send event: {}", e);
        }
        if updated.status != old_status {
            if let Err(e) = self
                .event_sender
                .send(Event::JobStatusChanged {
                    job_id: updated.id.clone(),
                    old_status,
                    new_status: updated.status.clone(),
                })
                .await
            {
                error!("Failed to send event: {}", e);
            }
        }
        self.audit
            .record(
                &actor.name,
                actions::UPDATE,
                format!(
                    "Updated job for {}. Status: {}",
                    updated.doctor, updated.status
                ),
            )
            .await;

        Ok(updated)
    }

    #[instrument(skip(self, actor), fields(job_id = %id))]
    pub async fn delete_job(&self, id: &str, actor: &AuthUser) -> Result<JobRecord, ServiceError> {
        let removed = self
            .store
            .delete_job(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Job {id} not found")))?;

        if let Err(e) = self
            .event_sender
            .send(Event::JobDeleted(removed.id.clone()))
            .await
        {
            error!("Failed to send event: {}", e);
        }
        self.audit
            .record(
                &actor.name,
                actions::DELETE,
                format!("Deleted job for {} ({})", removed.doctor, removed.description),
            )
            .await;

        Ok(removed)
    }

    pub async fn get_job(&self, id: &str) -> Result<JobRecord, ServiceError> {
        self.store
            .get_job(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Job {id} not found")))
    }

    /// Fetches a job and records the print in the trail.
    #[instrument(skip(self, actor), fields(job_id = %id))]
    pub async fn job_for_receipt(
        &self,
        id: &str,
        actor: &AuthUser,
    ) -> Result<JobRecord, ServiceError> {
        let job = self.get_job(id).await?;

        if let Err(e) = self
            .event_sender
            .send(Event::ReceiptPrinted(job.id.clone()))
            .await
        {
            error!("Failed to send event: {}", e);
        }
        self.audit
            .record(
                &actor.name,
                actions::PRINT,
                format!("Printed receipt for {}", job.doctor),
            )
            .await;

        Ok(job)
    }

    /// Records an export of `rows` filtered records.
    pub async fn record_export(&self, rows: usize, actor: &AuthUser) {
        if let Err(e) = self.event_sender.send(Event::LedgerExported { rows }).await {
            error!("Failed to send event: {}", e);
        }
        self.audit
            .record(
                &actor.name,
                actions::EXPORT,
                format!("Exported {rows} records to CSV."),
            )
            .await;
    }
}

fn or_placeholder(value: Option<String>) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s,
        _ => PLACEHOLDER.to_string(),
    }
}

fn check_payment_bounds(amount: Decimal, amount_paid: Decimal) -> Result<(), ServiceError> {
    if amount < Decimal::ZERO || amount_paid < Decimal::ZERO {
        return Err(ServiceError::ValidationError(
            "amounts must not be negative".into(),
        ));
    }
    if amount_paid > amount {
        return Err(ServiceError::ValidationError(
            "amount_paid must not exceed amount".into(),
        ));
    }
    Ok(())
}
