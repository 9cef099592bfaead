pub mod audit;
pub mod job;
pub mod user;

pub use audit::{actions, AuditEntry};
pub use job::{JobRecord, JobUpdate, NewJob, PLACEHOLDER};
pub use user::{UserProfile, UserRecord};
