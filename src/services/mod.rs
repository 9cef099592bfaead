pub mod audit;
pub mod export;
pub mod jobs;

pub use audit::AuditService;
pub use jobs::JobService;
