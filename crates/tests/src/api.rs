/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/

use actix_web::{
    body::to_bytes,
    http::StatusCode,
    test,
    web::Data,
    App, ResponseError,
};
use ride_service::{
    common::types::*,
    domain::{api, types::ui::ride::RidesResponse},
    environment::{read_dhall_config, AppState},
    middleware::*,
    sqlite::{error::StoreError, store::RideStore},
    tools::error::{AppError, ErrorBody},
};
use serde_json::json;
use tracing_actix_web::TracingLogger;

use crate::fixtures::john_body;

macro_rules! ride_app {
    () => {
        ride_app!(AppState::with_store(
            RideStore::in_memory().expect("Failed to open in-memory ride store")
        ))
    };
    ($state:expr) => {{
        let state = $state;
        let max_allowed_req_size = state.max_allowed_req_size;
        test::init_service(
            App::new()
                .app_data(Data::new(state))
                .app_data(api::json_config(max_allowed_req_size))
                .app_data(api::payload_config(max_allowed_req_size))
                .wrap(LogIncomingRequestBody)
                .wrap(CheckContentLength)
                .wrap(IncomingRequestMetrics)
                .wrap(TracingLogger::<DomainRootSpanBuilder>::new())
                .configure(api::handler),
        )
        .await
    }};
}

/// State with the bundled size limit and body logging switched on.
fn logging_state(max_allowed_req_size: usize) -> AppState {
    AppState {
        log_unprocessible_req_body: vec![
            "UNPROCESSIBLE_REQUEST".to_string(),
            "VALIDATION_ERROR".to_string(),
        ],
        max_allowed_req_size,
        ..AppState::with_store(RideStore::in_memory().expect("Failed to open in-memory ride store"))
    }
}

async fn rendered_error(err: actix_web::Error) -> (StatusCode, ErrorBody) {
    let resp = err.error_response();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body())
        .await
        .expect("Failed to read error body");
    let body: ErrorBody = serde_json::from_slice(&bytes).expect("Invalid error body");
    (status, body)
}

fn error_body(error_code: &str, message: &str) -> ErrorBody {
    ErrorBody {
        error_code: error_code.to_string(),
        message: message.to_string(),
    }
}

#[actix_web::test]
async fn health_check_reports_healthy() {
    let app = ride_app!();

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "Healthy");
}

#[actix_web::test]
async fn create_ride_returns_stored_row() {
    let app = ride_app!();

    let req = test::TestRequest::post()
        .uri("/rides")
        .set_json(john_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!([{
            "rideID": 1,
            "startLat": 50.0,
            "startLong": 50.0,
            "endLat": 50.0,
            "endLong": 50.0,
            "riderName": "John Rider",
            "driverName": "John Driver",
            "driverVehicle": "Foo Vehicle"
        }])
    );
}

#[actix_web::test]
async fn create_ride_coerces_numeric_strings() {
    let app = ride_app!();

    let mut body = john_body();
    body["start_lat"] = json!("-33.5");
    body["end_long"] = json!(" 151.25 ");

    let req = test::TestRequest::post().uri("/rides").set_json(body).to_request();
    let rides: Vec<Ride> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(rides.len(), 1);
    assert_eq!(rides[0].start_lat, Latitude(-33.5));
    assert_eq!(rides[0].end_long, Longitude(151.25));
}

#[actix_web::test]
async fn create_ride_rejects_invalid_details() {
    let app = ride_app!();

    let cases = [
        ("start_lat", json!(-91), "Start latitude and longitude must be between -90 - 90 and -180 to 180 degrees respectively"),
        ("start_long", json!("east"), "Start latitude and longitude must be between -90 - 90 and -180 to 180 degrees respectively"),
        ("start_lat", json!(true), "Start latitude and longitude must be between -90 - 90 and -180 to 180 degrees respectively"),
        ("start_long", json!({ "degrees": 10 }), "Start latitude and longitude must be between -90 - 90 and -180 to 180 degrees respectively"),
        ("end_lat", json!([10, 20]), "End latitude and longitude must be between -90 - 90 and -180 to 180 degrees respectively"),
        ("end_long", json!(181), "End latitude and longitude must be between -90 - 90 and -180 to 180 degrees respectively"),
        ("end_lat", json!(null), "End latitude and longitude must be between -90 - 90 and -180 to 180 degrees respectively"),
        ("rider_name", json!(""), "Rider name must be a non empty string"),
        ("driver_name", json!(42), "Driver name must be a non empty string"),
        ("driver_vehicle", json!(""), "Driver vehicle must be a non empty string"),
    ];

    for (field, value, message) in cases {
        let mut body = john_body();
        body[field] = value;

        let req = test::TestRequest::post().uri("/rides").set_json(body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "field {field}");

        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body, error_body("VALIDATION_ERROR", message));
    }

    // Nothing was persisted by the rejected requests.
    let resp = test::call_service(&app, test::TestRequest::get().uri("/rides").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn create_ride_with_missing_fields() {
    let app = ride_app!();

    let req = test::TestRequest::post()
        .uri("/rides")
        .set_json(json!({ "rider_name": "John Rider" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.error_code, "VALIDATION_ERROR");
    assert!(body.message.starts_with("Start latitude"));
}

#[actix_web::test]
async fn malformed_body_is_unprocessable() {
    let app = ride_app!();

    let req = test::TestRequest::post()
        .uri("/rides")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"start_lat\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.error_code, "UNPROCESSIBLE_REQUEST");
}

#[actix_web::test]
async fn oversized_body_is_rejected() {
    let store = RideStore::in_memory().expect("Failed to open in-memory ride store");
    let app = ride_app!(AppState {
        max_allowed_req_size: 16,
        ..AppState::with_store(store)
    });

    let req = test::TestRequest::post()
        .uri("/rides")
        .set_json(john_body())
        .to_request();
    let err = match test::try_call_service(&app, req).await {
        Ok(resp) => panic!("Oversized body reached the handler: {}", resp.status()),
        Err(err) => err,
    };

    let (status, body) = rendered_error(err).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body.error_code, "LARGE_PAYLOAD_SIZE");
}

#[actix_web::test]
async fn size_guard_runs_before_body_logging() {
    let app = ride_app!(logging_state(512_000));

    let mut body = john_body();
    body["rider_name"] = json!("x".repeat(600_000));

    let req = test::TestRequest::post().uri("/rides").set_json(body).to_request();
    let err = match test::try_call_service(&app, req).await {
        Ok(resp) => panic!("Oversized body reached the handler: {}", resp.status()),
        Err(err) => err,
    };

    let (status, body) = rendered_error(err).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body.error_code, "LARGE_PAYLOAD_SIZE");
    assert!(body.message.contains("512000"));
}

#[actix_web::test]
async fn bodies_within_the_limit_are_buffered_and_stored() {
    let app = ride_app!(logging_state(512_000));

    let mut body = john_body();
    body["rider_name"] = json!("x".repeat(300_000));

    let req = test::TestRequest::post().uri("/rides").set_json(body).to_request();
    let rides: Vec<Ride> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(rides.len(), 1);
    assert_eq!(rides[0].rider_name.clone().inner().len(), 300_000);
}

#[actix_web::test]
async fn listing_and_paging_an_empty_table() {
    let app = ride_app!();

    for uri in ["/rides", "/rides/1/5"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "uri {uri}");

        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(
            body,
            error_body("RIDES_NOT_FOUND_ERROR", "Could not find any rides")
        );
    }
}

#[actix_web::test]
async fn paging_through_rides() {
    let app = ride_app!();

    for _ in 0..7 {
        let req = test::TestRequest::post()
            .uri("/rides")
            .set_json(john_body())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get().uri("/rides/1/5").to_request();
    let page: RidesResponse = test::call_and_read_body_json(&app, req).await;
    let ids: Vec<RideId> = page.data.iter().map(|ride| ride.ride_id).collect();
    assert_eq!(ids, (1..=5).map(RideId).collect::<Vec<_>>());

    let req = test::TestRequest::get().uri("/rides/2/5").to_request();
    let page: RidesResponse = test::call_and_read_body_json(&app, req).await;
    let ids: Vec<RideId> = page.data.iter().map(|ride| ride.ride_id).collect();
    assert_eq!(ids, vec![RideId(6), RideId(7)]);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/rides/3/5").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(
        body,
        error_body(
            "VALIDATION_ERROR",
            "Page number provided exceeds total number of ride details"
        )
    );

    let req = test::TestRequest::get().uri("/rides").to_request();
    let all: RidesResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.data.len(), 7);
}

#[actix_web::test]
async fn page_parameters_must_be_positive_integers() {
    let app = ride_app!();

    for uri in ["/rides/0/5", "/rides/1/0", "/rides/-1/5", "/rides/a/5", "/rides/1/b"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "uri {uri}");

        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(
            body,
            error_body(
                "VALIDATION_ERROR",
                "Page number and count must be positive integers"
            )
        );
    }
}

#[actix_web::test]
async fn fetching_a_ride_by_id() {
    let app = ride_app!();

    let req = test::TestRequest::post()
        .uri("/rides")
        .set_json(john_body())
        .to_request();
    let created: Vec<Ride> = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get().uri("/rides/1").to_request();
    let found: RidesResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(found.data, created);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/rides/99").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(
        body,
        error_body("RIDES_NOT_FOUND_ERROR", "Could not find any rides")
    );

    let resp = test::call_service(&app, test::TestRequest::get().uri("/rides/a").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body, error_body("VALIDATION_ERROR", "Id must be of type Number"));
}

#[actix_web::test]
async fn server_errors_render_an_opaque_message() {
    let err = AppError::from(StoreError::Worker("disk I/O error at /var/db".to_string()));
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = to_bytes(err.error_response().into_body())
        .await
        .expect("Failed to read error body");
    let body: ErrorBody = serde_json::from_slice(&bytes).expect("Invalid error body");
    assert_eq!(body, error_body("SERVER_ERROR", "Unknown error"));
}

#[actix_web::test]
async fn bundled_config_parses() {
    let config_path = concat!(env!("CARGO_MANIFEST_DIR"), "/../ride_service/dhall_config/ride_service.dhall");
    let config = read_dhall_config(config_path).expect("Failed to read bundled config");
    assert_eq!(config.port, 8081);
    assert!(config.max_allowed_req_size > 0);
}
