use abi::{Spot, SpotNumber, SpotStatus};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

/// Owns the status column of `parking_spots`.
///
/// Methods that flip a status take a connection so they can join the caller's
/// transaction.
#[derive(Debug, Clone)]
pub struct SpotAllocator {
    pool: SqlitePool,
    capacity: u32,
}

impl SpotAllocator {
    pub fn new(pool: SqlitePool, capacity: u32) -> Self {
        Self { pool, capacity }
    }

    /// Create spots `1..=capacity`. Existing rows keep their status.
    pub async fn seed(&self) -> Result<(), abi::Error> {
        let mut tx = self.pool.begin().await?;
        for spot in 1..=i64::from(self.capacity) {
            sqlx::query("INSERT OR IGNORE INTO parking_spots (spot, status) VALUES (?, 'available')")
                .bind(spot)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        debug!(capacity = self.capacity, "parking spots seeded");
        Ok(())
    }

    pub async fn find_available(
        &self,
        conn: &mut SqliteConnection,
    ) -> Result<Option<SpotNumber>, abi::Error> {
        let spot = sqlx::query_scalar(
            "SELECT spot FROM parking_spots WHERE status = 'available' ORDER BY spot LIMIT 1",
        )
        .fetch_optional(conn)
        .await?;
        Ok(spot)
    }

    /// `find_available` followed by `mark_occupied`, fused into one statement so it can
    /// open a write transaction.
    pub async fn claim_available(
        &self,
        conn: &mut SqliteConnection,
    ) -> Result<Option<SpotNumber>, abi::Error> {
        let spot = sqlx::query_scalar(
            "UPDATE parking_spots SET status = 'occupied' WHERE spot = (
                SELECT spot FROM parking_spots WHERE status = 'available' ORDER BY spot LIMIT 1
            ) RETURNING spot",
        )
        .fetch_optional(conn)
        .await?;
        Ok(spot)
    }

    /// Occupy `spot` if it exists and is available. Returns whether it was claimed.
    pub async fn claim(
        &self,
        conn: &mut SqliteConnection,
        spot: SpotNumber,
    ) -> Result<bool, abi::Error> {
        let ret = sqlx::query(
            "UPDATE parking_spots SET status = 'occupied' WHERE spot = ? AND status = 'available'",
        )
        .bind(spot)
        .execute(conn)
        .await?;
        Ok(ret.rows_affected() == 1)
    }

    pub async fn mark_occupied(
        &self,
        conn: &mut SqliteConnection,
        spot: SpotNumber,
    ) -> Result<(), abi::Error> {
        self.set_status(conn, spot, SpotStatus::Occupied).await
    }

    pub async fn mark_available(
        &self,
        conn: &mut SqliteConnection,
        spot: SpotNumber,
    ) -> Result<(), abi::Error> {
        self.set_status(conn, spot, SpotStatus::Available).await
    }

    pub async fn get(&self, spot: SpotNumber) -> Result<Option<Spot>, abi::Error> {
        let spot = sqlx::query_as("SELECT spot, status FROM parking_spots WHERE spot = ?")
            .bind(spot)
            .fetch_optional(&self.pool)
            .await?;
        Ok(spot)
    }

    pub async fn status(&self, spot: SpotNumber) -> Result<Option<SpotStatus>, abi::Error> {
        Ok(self.get(spot).await?.map(|spot| spot.status))
    }

    async fn set_status(
        &self,
        conn: &mut SqliteConnection,
        spot: SpotNumber,
        status: SpotStatus,
    ) -> Result<(), abi::Error> {
        sqlx::query("UPDATE parking_spots SET status = ? WHERE spot = ?")
            .bind(status)
            .bind(spot)
            .execute(conn)
            .await?;
        Ok(())
    }
}
