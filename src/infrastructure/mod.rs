//! Infrastructure layer - storage backends, services and process setup

pub mod auth;
pub mod logging;
pub mod reservation;
pub mod storage;
pub mod team;
