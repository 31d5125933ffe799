//! Booking-conflict and team-eligibility checks
//!
//! Both checks are single read-only queries against the external store. When
//! the store cannot answer, the verdict comes from a named [`FailurePolicy`]
//! instead of the error being surfaced.

mod checker;
mod policy;

pub use checker::EligibilityChecker;
pub use policy::{FailurePolicy, BOOKING_CONFLICT_POLICY, TEAM_CREATION_POLICY};
