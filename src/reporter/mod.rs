pub mod csv;
pub mod json;
pub mod progress;
pub mod terminal;

use crate::audit::AuditRun;

pub trait Reporter {
    fn report(&self, run: &AuditRun) -> String;
}
