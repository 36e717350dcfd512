//! Submission intake and read endpoints. Intake persists the record,
//! enqueues the scoring task, and returns without waiting for the score.

pub mod handlers;
pub mod validate;
