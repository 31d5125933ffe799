//! Reservation domain module
//!
//! A reservation books one resource (a court) for a time-of-day interval on a
//! single date. Intervals are half-open: a booking ending at 10:00 does not
//! collide with one starting at 10:00.

mod entity;
mod repository;
mod validation;

pub use entity::{
    Reservation, ReservationId, ReservationStatus, ResourceId, TimeSlot,
};
pub use repository::{OverlapQuery, ReservationRepository};
pub use validation::{
    parse_date, parse_time, validate_notes, validate_resource_id, ReservationValidationError,
};

#[cfg(test)]
pub use repository::MockReservationRepository;
