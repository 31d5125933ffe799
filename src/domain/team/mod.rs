//! Team domain module
//!
//! Players organise into teams. A user may own at most one team; ownership is
//! recorded as a membership row with the `owner` role.

mod entity;
mod repository;
mod validation;

pub use entity::{Team, TeamId, TeamMembership, TeamRole};
pub use repository::TeamRepository;
pub use validation::{validate_team_description, validate_team_name, TeamValidationError};

#[cfg(test)]
pub use repository::MockTeamRepository;
