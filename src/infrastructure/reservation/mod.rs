//! Reservation infrastructure implementations

mod in_memory;
mod postgres_repository;
mod service;

pub use in_memory::InMemoryReservationRepository;
pub use postgres_repository::PostgresReservationRepository;
pub use service::{CreateReservationRequest, ReservationService};
