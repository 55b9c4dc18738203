mod allocator;
mod manager;

use abi::{Reservation, ReservationQuery, SpotNumber};
use async_trait::async_trait;
use sqlx::SqlitePool;

pub use allocator::SpotAllocator;

#[derive(Debug, Clone)]
pub struct ReservationManager {
    pool: SqlitePool,
    allocator: SpotAllocator,
}

#[async_trait]
pub trait Rsvp {
    /// make a reservation on the lowest-numbered available spot
    async fn reserve(&self, rsvp: Reservation) -> Result<Reservation, abi::Error>;
    /// find the first reservation matching the email or the vehicle
    async fn lookup(&self, query: ReservationQuery) -> Result<Reservation, abi::Error>;
    /// list all reservations
    async fn list(&self) -> Result<Vec<Reservation>, abi::Error>;
    /// move a reservation to another available spot
    async fn modify(
        &self,
        query: ReservationQuery,
        new_spot: SpotNumber,
    ) -> Result<Reservation, abi::Error>;
    /// cancel the reservation holding exactly this (email, spot) pair
    async fn cancel(&self, email: String, spot: SpotNumber) -> Result<(), abi::Error>;
}
