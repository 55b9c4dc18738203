use serde::{Deserialize, Serialize};

use crate::{Error, SpotNumber};

pub type ReservationId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reservation {
    pub id: ReservationId,
    pub name: String,
    pub email: String,
    pub vehicle: String,
    pub spot: SpotNumber,
}

impl Reservation {
    /// A reservation that has not been persisted yet: no id, no spot.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        vehicle: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            email: email.into(),
            vehicle: vehicle.into(),
            spot: 0,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("vehicle", &self.vehicle),
        ] {
            if value.trim().is_empty() {
                return Err(Error::InvalidInput(format!("{} is required.", field)));
            }
        }
        Ok(())
    }

    pub fn generate_id() -> ReservationId {
        uuid::Uuid::new_v4().to_string()
    }
}
