use std::str::FromStr;
use std::time::Duration;

use abi::{Config, DbConfig, Reservation, ReservationQuery, SpotNumber};
use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};

use crate::{ReservationManager, Rsvp, SpotAllocator};

static MIGRATOR: Migrator = sqlx::migrate!("../migrations");

#[async_trait]
impl Rsvp for ReservationManager {
    async fn reserve(&self, mut rsvp: Reservation) -> Result<Reservation, abi::Error> {
        rsvp.validate()?;

        // mutations start with a write so the transaction holds the write lock before reading
        let mut tx = self.pool.begin().await?;
        let spot = match self.allocator.claim_available(&mut *tx).await? {
            Some(spot) => spot,
            None => {
                warn!(email = %rsvp.email, "no available parking spots");
                return Err(abi::Error::NoCapacity);
            }
        };

        rsvp.id = Reservation::generate_id();
        rsvp.spot = spot;
        sqlx::query(
            "INSERT INTO reservations (id, name, email, vehicle, spot) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&rsvp.id)
        .bind(&rsvp.name)
        .bind(&rsvp.email)
        .bind(&rsvp.vehicle)
        .bind(rsvp.spot)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        info!(id = %rsvp.id, spot, "reservation confirmed");
        Ok(rsvp)
    }

    async fn lookup(&self, query: ReservationQuery) -> Result<Reservation, abi::Error> {
        let mut conn = self.pool.acquire().await?;
        find_by_contact(&mut *conn, &query)
            .await?
            .ok_or(abi::Error::NotFound)
    }

    async fn list(&self) -> Result<Vec<Reservation>, abi::Error> {
        let rsvps = sqlx::query_as(
            "SELECT id, name, email, vehicle, spot FROM reservations ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rsvps)
    }

    async fn modify(
        &self,
        query: ReservationQuery,
        new_spot: SpotNumber,
    ) -> Result<Reservation, abi::Error> {
        let mut tx = self.pool.begin().await?;
        let claimed = self.allocator.claim(&mut *tx, new_spot).await?;

        // a missing reservation wins over an unavailable spot
        let rsvp = find_by_contact(&mut *tx, &query)
            .await?
            .ok_or(abi::Error::NotFound)?;
        if !claimed {
            debug!(id = %rsvp.id, new_spot, "requested spot is not available");
            return Err(abi::Error::SpotUnavailable(new_spot));
        }

        sqlx::query("UPDATE reservations SET spot = ? WHERE id = ?")
            .bind(new_spot)
            .bind(&rsvp.id)
            .execute(&mut *tx)
            .await?;
        self.allocator.mark_available(&mut *tx, rsvp.spot).await?;
        tx.commit().await?;

        info!(id = %rsvp.id, old_spot = rsvp.spot, new_spot, "reservation moved");
        Ok(Reservation {
            spot: new_spot,
            ..rsvp
        })
    }

    async fn cancel(&self, email: String, spot: SpotNumber) -> Result<(), abi::Error> {
        let mut tx = self.pool.begin().await?;
        let id: Option<String> =
            sqlx::query_scalar("DELETE FROM reservations WHERE email = ? AND spot = ? RETURNING id")
                .bind(&email)
                .bind(spot)
                .fetch_optional(&mut *tx)
                .await?;
        let id = id.ok_or(abi::Error::NotFound)?;
        self.allocator.mark_available(&mut *tx, spot).await?;
        tx.commit().await?;

        info!(%id, spot, "reservation canceled");
        Ok(())
    }
}

impl ReservationManager {
    pub fn new(pool: SqlitePool, capacity: u32) -> Self {
        let allocator = SpotAllocator::new(pool.clone(), capacity);
        Self { pool, allocator }
    }

    pub async fn from_config(config: &Config) -> Result<Self, abi::Error> {
        let pool = connect(&config.db).await?;
        let manager = Self::new(pool, config.parking.capacity);
        manager.init().await?;
        Ok(manager)
    }

    /// Apply pending migrations and seed the spots. Safe to run on every start.
    pub async fn init(&self) -> Result<(), abi::Error> {
        MIGRATOR.run(&self.pool).await?;
        self.allocator.seed().await
    }

    pub fn allocator(&self) -> &SpotAllocator {
        &self.allocator
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

async fn connect(config: &DbConfig) -> Result<SqlitePool, abi::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .busy_timeout(Duration::from_millis(config.busy_timeout_ms));
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;
    Ok(pool)
}

async fn find_by_contact(
    conn: &mut SqliteConnection,
    query: &ReservationQuery,
) -> Result<Option<Reservation>, abi::Error> {
    let rsvp = sqlx::query_as(
        "SELECT id, name, email, vehicle, spot FROM reservations
         WHERE email = ? OR vehicle = ? ORDER BY rowid LIMIT 1",
    )
    .bind(query.email.as_deref())
    .bind(query.vehicle.as_deref())
    .fetch_optional(conn)
    .await?;
    Ok(rsvp)
}

/// A single-connection in-memory database with the schema applied.
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    MIGRATOR.run(&pool).await.unwrap();
    pool
}
