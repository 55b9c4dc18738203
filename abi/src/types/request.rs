use serde::{Deserialize, Serialize};

use crate::{Reservation, SpotNumber};

/// Matches a reservation by email or by vehicle plate. An absent field never matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationQuery {
    pub email: Option<String>,
    pub vehicle: Option<String>,
}

impl ReservationQuery {
    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            vehicle: None,
        }
    }

    pub fn by_vehicle(vehicle: impl Into<String>) -> Self {
        Self {
            email: None,
            vehicle: Some(vehicle.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveRequest {
    pub name: String,
    pub email: String,
    pub vehicle: String,
}

impl From<ReserveRequest> for Reservation {
    fn from(req: ReserveRequest) -> Self {
        Reservation::new(req.name, req.email, req.vehicle)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupParams {
    pub email: Option<String>,
    pub license_plate: Option<String>,
}

impl From<LookupParams> for ReservationQuery {
    fn from(params: LookupParams) -> Self {
        Self {
            email: params.email,
            vehicle: params.license_plate,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyRequest {
    pub email: Option<String>,
    pub vehicle: Option<String>,
    pub new_spot: SpotNumber,
}

impl ModifyRequest {
    pub fn query(&self) -> ReservationQuery {
        ReservationQuery {
            email: self.email.clone(),
            vehicle: self.vehicle.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelRequest {
    pub email: String,
    pub spot: SpotNumber,
}
