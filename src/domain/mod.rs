//! Domain layer - Core booking rules and entities

pub mod eligibility;
pub mod error;
pub mod reservation;
pub mod team;
pub mod user;

pub use eligibility::{EligibilityChecker, FailurePolicy};
pub use error::DomainError;
pub use reservation::{
    OverlapQuery, Reservation, ReservationId, ReservationRepository, ReservationStatus,
    ResourceId, TimeSlot,
};
pub use team::{Team, TeamId, TeamMembership, TeamRepository, TeamRole};
pub use user::{Actor, UserId, UserRole};
