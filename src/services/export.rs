//! Plain-text renderings of the ledger: the spreadsheet-ready CSV and the
//! half-letter receipt slip.

use std::fmt::Write;

use crate::errors::ServiceError;
use crate::models::JobRecord;

pub const CSV_HEADER: &str = "Date Received,Doctor,Description,Units,Shade,Technician (Metal),Technician (Build Up),Messenger (Pick Up),Messenger (Deliver),Date Delivered,Total Amount,Payment Status,Amount Paid,Balance,Job Status";

const RECEIPT_RULE: &str = "----------------------------------------";

/// Renders the filtered view as CSV. Free-text fields are quoted; an empty
/// view is an error rather than a header-only file.
pub fn jobs_to_csv(jobs: &[JobRecord]) -> Result<String, ServiceError> {
    if jobs.is_empty() {
        return Err(ServiceError::NothingToExport);
    }

    let mut out = String::with_capacity(64 * (jobs.len() + 1));
    out.push_str(CSV_HEADER);
    out.push('\n');

    for job in jobs {
        let row = [
            job.date_received.clone(),
            quote(&job.doctor),
            quote(&job.description),
            job.units.to_string(),
            quote(&job.shade),
            quote(&job.tech_metal),
            quote(&job.tech_build_up),
            quote(&job.messenger_pick_up),
            quote(&job.messenger_deliver),
            quote(&job.date_deliver),
            job.amount.to_string(),
            job.effective_payment_status().to_string(),
            job.amount_paid.to_string(),
            job.balance().to_string(),
            job.status.clone(),
        ]
        .join(",");
        out.push_str(&row);
        out.push('\n');
    }

    Ok(out)
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Renders the printable receipt slip for one job.
pub fn job_to_receipt(job: &JobRecord) -> String {
    let mut out = String::new();

    // write! into a String cannot fail
    let _ = writeln!(out, "{:^40}", "DENTAL LAB SYSTEM");
    let _ = writeln!(out);
    let _ = writeln!(out, "Rec'd: {}", job.date_received);
    let _ = writeln!(out, "Doctor: {}", job.doctor);
    let _ = writeln!(out, "{RECEIPT_RULE}");
    let _ = writeln!(out, "JOB DETAILS");
    let _ = writeln!(out, "Desc: {}", job.description);
    let _ = writeln!(out, "Units: {} | Shade: {}", job.units, job.shade);
    let _ = writeln!(out, "Tech (Metal): {}", job.tech_metal);
    let _ = writeln!(out, "Tech (Build Up): {}", job.tech_build_up);
    let _ = writeln!(out, "{RECEIPT_RULE}");
    let _ = writeln!(out, "LOGISTICS & STATUS");
    let _ = writeln!(
        out,
        "Pick Up: {} | Deliver: {}",
        job.messenger_pick_up, job.messenger_deliver
    );
    let _ = writeln!(out, "Date Delivered: {}", job.date_deliver);
    let _ = writeln!(out, "Job Status: {}", job.status);
    let _ = writeln!(out, "{RECEIPT_RULE}");
    let _ = writeln!(out, "BILLING INFO");
    let _ = writeln!(out, "Total Amount: Php {}", job.amount);
    let _ = writeln!(out, "Amount Paid: Php {}", job.amount_paid);
    let _ = writeln!(out, "Balance: Php {}", job.balance());
    let _ = writeln!(out, "Payment Status: {}", job.effective_payment_status());
    let _ = writeln!(out);
    let _ = writeln!(out, "{:^40}", "Thank you for your business!");

    out
}

/// Filename suggested for CSV downloads, dated like the console's.
pub fn export_filename(today: chrono::NaiveDate) -> String {
    format!("DentalLab_Sales_{}.csv", today)
}
