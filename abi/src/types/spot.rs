use serde::{Deserialize, Serialize};

pub type SpotNumber = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SpotStatus {
    Available,
    Occupied,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Spot {
    #[sqlx(rename = "spot")]
    pub number: SpotNumber,
    pub status: SpotStatus,
}
