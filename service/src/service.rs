use abi::{CancelRequest, LookupParams, ModifyRequest, Reservation, ReserveRequest};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use reservation::Rsvp;
use serde::Serialize;

use crate::{ApiError, RsvpService};

#[derive(Debug, Serialize)]
pub(crate) struct MessageResponse {
    message: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReservationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    reservation: Reservation,
}

#[derive(Debug, Serialize)]
pub(crate) struct VehiclesResponse {
    vehicles: Vec<Reservation>,
}

pub(crate) async fn reserve(
    State(svc): State<RsvpService>,
    payload: Result<Json<ReserveRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ReservationResponse>), ApiError> {
    let Json(req) = payload?;
    let reservation = svc.manager.reserve(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ReservationResponse {
            message: Some("Reservation confirmed!"),
            reservation,
        }),
    ))
}

pub(crate) async fn lookup(
    State(svc): State<RsvpService>,
    params: Result<Query<LookupParams>, QueryRejection>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let Query(params) = params?;
    let reservation = svc.manager.lookup(params.into()).await?;
    Ok(Json(ReservationResponse {
        message: None,
        reservation,
    }))
}

pub(crate) async fn list(
    State(svc): State<RsvpService>,
) -> Result<Json<VehiclesResponse>, ApiError> {
    let vehicles = svc.manager.list().await?;
    Ok(Json(VehiclesResponse { vehicles }))
}

pub(crate) async fn modify(
    State(svc): State<RsvpService>,
    payload: Result<Json<ModifyRequest>, JsonRejection>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let Json(req) = payload?;
    let reservation = svc.manager.modify(req.query(), req.new_spot).await?;
    Ok(Json(ReservationResponse {
        message: Some("Parking spot updated successfully."),
        reservation,
    }))
}

pub(crate) async fn cancel(
    State(svc): State<RsvpService>,
    payload: Result<Json<CancelRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(req) = payload?;
    svc.manager.cancel(req.email, req.spot).await?;
    Ok(Json(MessageResponse {
        message: "Reservation canceled successfully.",
    }))
}
