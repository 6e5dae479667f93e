//! Human-readable record numbers shown on the console (`ORD-1A2B3C4D5E6F`).
//!
//! Numbers are unique per table. A collision surfaces as a unique violation
//! on insert and the insert is retried with a fresh id.

use uuid::Uuid;

/// Inserts tried before a number collision is reported as an error.
pub const MAX_ATTEMPTS: u32 = 3;

fn short(id: Uuid) -> String {
    id.simple().to_string()[..12].to_uppercase()
}

pub fn order_code(id: Uuid) -> String {
    format!("ORD-{}", short(id))
}

pub fn account_code(id: Uuid) -> String {
    format!("ACC-{}", short(id))
}
