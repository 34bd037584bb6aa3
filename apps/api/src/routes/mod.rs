pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::distance::handlers as distance;
use crate::places::handlers as places;
use crate::proposal::handlers as proposal;
use crate::render::handlers as render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Places proxy
        .route(
            "/api/v1/places/autocomplete",
            get(places::handle_autocomplete),
        )
        .route("/api/v1/places/geocode", post(places::handle_geocode))
        .route("/api/v1/places/search", post(places::handle_places_search))
        // Distance estimation
        .route("/api/v1/distance", post(distance::handle_distance))
        .route("/api/v1/distance/estimate", post(distance::handle_estimate))
        .route(
            "/api/v1/distance/flight-mileage",
            post(distance::handle_flight_mileage),
        )
        .route("/api/v1/airports", get(distance::handle_search_airports))
        .route(
            "/api/v1/airports/:code/flights-url",
            get(distance::handle_flights_url),
        )
        // Service catalog
        .route(
            "/api/v1/services",
            get(proposal::handle_list_services).post(proposal::handle_create_service),
        )
        .route(
            "/api/v1/services/:id",
            put(proposal::handle_update_service).delete(proposal::handle_delete_service),
        )
        .route(
            "/api/v1/services/:id/proposal-types",
            post(proposal::handle_toggle_proposal_type),
        )
        // Proposal drafts
        .route(
            "/api/v1/proposals",
            get(proposal::handle_list_proposals).post(proposal::handle_create_proposal),
        )
        .route(
            "/api/v1/proposals/:id",
            get(proposal::handle_get_proposal)
                .patch(proposal::handle_patch_proposal)
                .delete(proposal::handle_delete_proposal),
        )
        .route(
            "/api/v1/proposals/:id/services",
            post(proposal::handle_add_line_item),
        )
        .route(
            "/api/v1/proposals/:id/services/:service_id",
            patch(proposal::handle_update_line_item).delete(proposal::handle_remove_line_item),
        )
        .route(
            "/api/v1/proposals/:id/available-services",
            get(proposal::handle_available_services),
        )
        .route(
            "/api/v1/proposals/:id/reimbursables",
            get(proposal::handle_get_reimbursables).put(proposal::handle_put_reimbursables),
        )
        .route(
            "/api/v1/proposals/:id/validation",
            get(proposal::handle_validation),
        )
        .route(
            "/api/v1/reimbursables/calculate",
            post(proposal::handle_calculate_reimbursables),
        )
        // Document output
        .route("/api/v1/proposals/:id/pdf", get(render::handle_proposal_pdf))
        .route(
            "/api/v1/proposals/:id/preview",
            get(render::handle_proposal_preview),
        )
        .route("/api/v1/render/pdf", post(render::handle_render_pdf))
        .route("/api/v1/render/preview", post(render::handle_render_preview))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::{Config, DEFAULT_OFFICE_ADDRESS, DEFAULT_PLACES_BASE_URL};
    use crate::distance::test_support::StubGeocoder;
    use crate::places::PlacesClient;

    const PROJECT: &str = "100 Main St, Hoover, AL 35244";

    fn app_with(geocoder: StubGeocoder) -> Router {
        let places = PlacesClient::new(None, DEFAULT_PLACES_BASE_URL, 1).unwrap();
        build_router(AppState::new(Config::for_tests(), places, Arc::new(geocoder)))
    }

    fn app() -> Router {
        app_with(
            StubGeocoder::default()
                .with(DEFAULT_OFFICE_ADDRESS, 33.2440, -86.8164)
                .with(PROJECT, 33.4054, -86.8114),
        )
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = send(app, method, uri, body).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create_draft(app: &Router) -> String {
        let (status, body) = send_json(
            app,
            Method::POST,
            "/api/v1/proposals",
            Some(json!({
                "header": { "date": "March 3, 2025", "proposal_title": "Water Testing Proposal" },
                "payment_type": "hourly",
                "proposal_type": "water-testing",
                "client": {
                    "company_name": "Acme Builders",
                    "client_title": "Mr.",
                    "first_name": "Sam",
                    "last_name": "Reed",
                    "email": "sam@acme.test",
                    "phone": "2056632220",
                    "address": PROJECT
                },
                "project": { "name": "Oak Tower", "use_company_address": true }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send_json(&app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "proposal-api");
    }

    #[tokio::test]
    async fn test_draft_lifecycle() {
        let app = app();
        let id = create_draft(&app).await;

        let (status, doc) = send_json(&app, Method::GET, &format!("/api/v1/proposals/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(doc["client"]["phone"], "(205) 663-2220");
        assert_eq!(doc["selected_services"].as_array().unwrap().len(), 4);

        let (status, item) = send_json(
            &app,
            Method::POST,
            &format!("/api/v1/proposals/{id}/services"),
            Some(json!({ "service_id": "6" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(item["id"], "6");

        let (status, body) = send_json(
            &app,
            Method::POST,
            &format!("/api/v1/proposals/{id}/services"),
            Some(json!({ "service_id": "6" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");

        let (status, item) = send_json(
            &app,
            Method::PATCH,
            &format!("/api/v1/proposals/{id}/services/6"),
            Some(json!({ "price": 1500.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(item["price"], 1500.0);

        // The catalog entry keeps its own price.
        let (_, services) = send_json(&app, Method::GET, "/api/v1/services", None).await;
        let entry = services
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s["id"] == "6")
            .unwrap()
            .clone();
        assert_eq!(entry["suggested_price"], 1000.0);

        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!("/api/v1/proposals/{id}/services/6"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/proposals/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, body) = send_json(&app, Method::GET, &format!("/api/v1/proposals/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_reimbursables_and_validation() {
        let app = app();
        let id = create_draft(&app).await;

        let (status, body) = send_json(
            &app,
            Method::PUT,
            &format!("/api/v1/proposals/{id}/reimbursables"),
            Some(json!({ "mileage": { "miles": 45.0 }, "meal_count": 2.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totals"]["meals_total"], 50.0);
        let mileage = body["totals"]["mileage_total"].as_f64().unwrap();
        assert!((mileage - 70.0).abs() < 1e-9);

        let (status, report) = send_json(
            &app,
            Method::GET,
            &format!("/api/v1/proposals/{id}/validation"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["progress"], 86);
    }

    #[tokio::test]
    async fn test_calculate_without_draft() {
        let (status, body) = send_json(
            &app(),
            Method::POST,
            "/api/v1/reimbursables/calculate",
            Some(json!({ "hotel_cost": 90.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let hotel = body["hotel_total"].as_f64().unwrap();
        assert!((hotel - 100.0).abs() < 1e-9);
        assert_eq!(body["details"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_pdf_download() {
        let app = app();
        let id = create_draft(&app).await;

        let request = Request::builder()
            .uri(format!("/api/v1/proposals/{id}/pdf"))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Oak Tower_March 3, 2025.pdf\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_preview_from_body() {
        let (status, bytes) = send(
            &app(),
            Method::POST,
            "/api/v1/render/preview",
            Some(json!({
                "header": { "date": "March 3, 2025", "proposal_title": "Roof Assessment" },
                "project": { "name": "Oak Tower", "location": PROJECT }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(bytes).unwrap();
        assert!(html.contains("<title>Roof Assessment</title>"));
        assert!(html.contains("CONSULTING SERVICES TERMS AND CONDITIONS"));
    }

    #[tokio::test]
    async fn test_distance_with_geocoder() {
        let (status, body) = send_json(
            &app(),
            Method::POST,
            "/api/v1/distance",
            Some(json!({ "origin": DEFAULT_OFFICE_ADDRESS, "destination": PROJECT })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["distance"]["text"].as_str().unwrap().ends_with(" mi"));
        assert!(body["distance"]["value"].as_f64().unwrap() > 0.0);
    }

    #[tokio::test]
    async fn test_distance_requires_both_ends() {
        let (status, body) = send_json(
            &app(),
            Method::POST,
            "/api/v1/distance",
            Some(json!({ "origin": DEFAULT_OFFICE_ADDRESS })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_estimate_falls_back_to_city_table() {
        let app = app_with(StubGeocoder::unconfigured());
        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/v1/distance/estimate",
            Some(json!({ "address": "500 Broadway, Nashville, TN 37203" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["method"], "city-lookup");
        assert_eq!(body["miles"], 200.0);
    }

    #[tokio::test]
    async fn test_places_without_key() {
        let app = app();
        let (status, body) = send_json(
            &app,
            Method::GET,
            "/api/v1/places/autocomplete?input=947%201st%20Ave",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "NOT_CONFIGURED");

        let (status, _) = send_json(&app, Method::GET, "/api/v1/places/autocomplete?input=", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_airport_search_and_flights_url() {
        let app = app();
        let (status, body) = send_json(&app, Method::GET, "/api/v1/airports?q=nashville", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body
            .as_array()
            .unwrap()
            .iter()
            .any(|a| a["code"] == "BNA"));

        let (status, body) = send_json(&app, Method::GET, "/api/v1/airports/bna/flights-url", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["origin"], "BHM");

        let (status, _) = send_json(&app, Method::GET, "/api/v1/airports/ZZZ/flights-url", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    async fn send_raw(app: &Router, uri: &str, body: &'static str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_body() {
        let app = app();
        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/v1/proposals",
            Some(json!({ "payment_type": "bogus" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");

        let (status, body) = send_raw(&app, "/api/v1/proposals", "{\"header\":").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (_, drafts) = send_json(&app, Method::GET, "/api/v1/proposals", None).await;
        assert!(drafts.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_with_empty_body() {
        let (status, body) = send_json(&app(), Method::POST, "/api/v1/proposals", None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["proposal_type"].is_null());
        assert!(body["selected_services"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_body_rejections_use_error_envelope() {
        let app = app();
        let (status, body) = send_raw(&app, "/api/v1/distance/estimate", "{}").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");

        let (status, body) = send_raw(&app, "/api/v1/distance", "not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
