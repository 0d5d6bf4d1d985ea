pub mod trail;

pub use trail::{AuditEvent, AuditTrail};
