//! Handlers installed around the application handler: admin guard first, audit logging.

mod admin_guard;
mod audit_log;

pub use admin_guard::AdminGuardHandler;
pub use audit_log::AuditLogHandler;
