#[path = "../src/test_utils.rs"]
mod test_utils;

use abi::Reservation;
use reqwest::{Client, StatusCode};
use reservation_service::{serve, RsvpService};
use serde_json::{json, Value};
use test_utils::TestConfig;
use tokio::net::TcpListener;

async fn spawn_server(tconfig: &TestConfig) -> String {
    let service = RsvpService::from_config(tconfig).await.unwrap();
    let listener = TcpListener::bind(tconfig.server.addr()).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        serve(listener, service, std::future::pending())
            .await
            .unwrap();
    });
    format!("http://{}/api/parking", addr)
}

#[tokio::test]
async fn http_server_should_work() {
    let tconfig = TestConfig::default();
    let url = spawn_server(&tconfig).await;
    let client = Client::new();

    // first we make a reservation
    let resp = client
        .post(format!("{}/reserve", url))
        .json(&json!({
            "name": "John Doe",
            "email": "john@example.com",
            "vehicle": "AB123CD",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Reservation confirmed!");
    let rsvp: Reservation = serde_json::from_value(body["reservation"].clone()).unwrap();
    assert!(!rsvp.id.is_empty());
    assert_eq!(rsvp.spot, 1);

    // then we look it up by email and by plate
    for query in [("email", "john@example.com"), ("licensePlate", "AB123CD")] {
        let resp = client
            .get(format!("{}/reservation", url))
            .query(&[query])
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body, json!({ "reservation": rsvp }));
    }

    let resp = client
        .get(format!("{}/parked-vehicles", url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "vehicles": [rsvp] }));

    // then we move it to spot 5
    let resp = client
        .put(format!("{}/modify", url))
        .json(&json!({ "email": "john@example.com", "newSpot": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Parking spot updated successfully.");
    assert_eq!(body["reservation"]["spot"], 5);
    assert_eq!(body["reservation"]["id"], rsvp.id.as_str());

    // a second driver gets the freed spot 1, so moving onto it must fail
    let resp = client
        .post(format!("{}/reserve", url))
        .json(&json!({
            "name": "Alice",
            "email": "alice@example.com",
            "vehicle": "XY987ZW",
        }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["reservation"]["spot"], 1);

    let resp = client
        .put(format!("{}/modify", url))
        .json(&json!({ "vehicle": "AB123CD", "newSpot": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "New spot is not available.");

    // then we cancel it
    let resp = client
        .delete(format!("{}/cancel", url))
        .json(&json!({ "email": "john@example.com", "spot": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Reservation canceled successfully.");

    let resp = client
        .get(format!("{}/reservation", url))
        .query(&[("email", "john@example.com")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Reservation not found.");

    let resp = client
        .delete(format!("{}/cancel", url))
        .json(&json!({ "email": "john@example.com", "spot": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .put(format!("{}/modify", url))
        .json(&json!({ "email": "john@example.com", "newSpot": 7 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = client
        .get(format!("{}/parked-vehicles", url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["vehicles"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn full_lot_should_reject_reservation() {
    let tconfig = TestConfig::new(1);
    let url = spawn_server(&tconfig).await;
    let client = Client::new();

    let body = json!({
        "name": "John Doe",
        "email": "john@example.com",
        "vehicle": "AB123CD",
    });
    let resp = client
        .post(format!("{}/reserve", url))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .post(format!("{}/reserve", url))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "message": "No available parking spots." }));
}

#[tokio::test]
async fn malformed_requests_should_be_rejected() {
    let tconfig = TestConfig::default();
    let url = spawn_server(&tconfig).await;
    let client = Client::new();

    // vehicle is missing
    let resp = client
        .post(format!("{}/reserve", url))
        .json(&json!({ "name": "John Doe", "email": "john@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert!(body["message"].is_string());

    let resp = client
        .post(format!("{}/reserve", url))
        .json(&json!({ "name": "", "email": "john@example.com", "vehicle": "AB123CD" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "name is required.");

    let resp = client
        .put(format!("{}/modify", url))
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = client
        .get(format!("{}/parked-vehicles", url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "vehicles": [] }));
}
