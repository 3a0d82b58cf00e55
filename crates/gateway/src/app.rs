use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{
        gateway::{get_snapshot, post_action},
        health::healthz,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // Browser clients call the gateway cross-origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(get_snapshot).post(post_action))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use lifelines_core::gateway::Snapshot;
    use lifelines_core::timeline::{demo_events, demo_people};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn body_json(response: axum::response::Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    fn post(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("Content-Type", "text/plain;charset=utf-8")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_healthz() {
        let app = create_app(AppState::new());

        let response = app
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_snapshot_of_demo_data() {
        let app = create_app(AppState::with_demo_data());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/?format=json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let snapshot: Snapshot = serde_json::from_slice(&body).unwrap();
        assert_eq!(snapshot.people, demo_people());
        assert_eq!(snapshot.events, demo_events());
    }

    #[tokio::test]
    async fn test_snapshot_requires_json_format() {
        let app = create_app(AppState::new());

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/?format=csv").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "status": "error", "message": "Unsupported format: csv" })
        );

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_add_person_assigns_id() {
        let state = AppState::new();
        let app = create_app(state.clone());

        let response = app
            .oneshot(post(json!({
                "action": "addPerson",
                "payload": { "name": "Ada", "birthDate": "1990-01-05", "color": "bg-blue-100" }
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["name"], "Ada");
        assert_eq!(body["data"]["birthDate"], "1990-01-05");
        assert!(!body["data"]["id"].as_str().unwrap().is_empty());
        assert_eq!(state.people.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_add_event_then_fetch() {
        let app = create_app(AppState::new());

        let response = app
            .clone()
            .oneshot(post(json!({
                "action": "addEvent",
                "payload": {
                    "personId": "1",
                    "title": "Moved to Lisbon",
                    "type": "Travel",
                    "startDate": "2019-05-01"
                }
            })))
            .await
            .unwrap();
        let added = body_json(response).await;
        assert_eq!(added["status"], "success");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/?format=json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let snapshot: Snapshot = serde_json::from_slice(&body).unwrap();

        assert_eq!(snapshot.events.len(), 1);
        assert_eq!(snapshot.events[0].id, added["data"]["id"].as_str().unwrap());
        assert_eq!(snapshot.events[0].end_date, None);
    }

    #[tokio::test]
    async fn test_unknown_action_is_error_envelope() {
        let app = create_app(AppState::new());

        let response = app
            .oneshot(post(json!({ "action": "renamePerson", "payload": {} })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "status": "error", "message": "Unknown action: renamePerson" })
        );
    }

    #[tokio::test]
    async fn test_unparsable_body_is_error_envelope() {
        let app = create_app(AppState::new());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .body(Body::from("not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "error");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn test_invalid_event_is_rejected() {
        let state = AppState::new();
        let app = create_app(state.clone());

        let response = app
            .oneshot(post(json!({
                "action": "addEvent",
                "payload": {
                    "personId": "1",
                    "title": "Degree",
                    "type": "Education",
                    "startDate": "2012-09-01",
                    "endDate": "2010-06-01"
                }
            })))
            .await
            .unwrap();

        assert_eq!(
            body_json(response).await,
            json!({
                "status": "error",
                "message": "Invalid event: End date must be after or equal to start date"
            })
        );
        assert!(state.events.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete_by_id() {
        let state = AppState::with_demo_data();
        let app = create_app(state.clone());
        let id = demo_people()[0].id.clone();

        let response = app
            .clone()
            .oneshot(post(json!({
                "action": "updatePerson",
                "payload": { "id": id, "color": "bg-red-100" }
            })))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["color"], "bg-red-100");
        assert_eq!(body["data"]["name"], demo_people()[0].name.as_str());

        let response = app
            .clone()
            .oneshot(post(json!({ "action": "deletePerson", "payload": { "id": id } })))
            .await
            .unwrap();
        assert_eq!(
            body_json(response).await,
            json!({ "status": "success", "data": { "id": id } })
        );
        assert_eq!(state.people.read().await.len(), demo_people().len() - 1);

        let response = app
            .oneshot(post(json!({ "action": "deletePerson", "payload": { "id": id } })))
            .await
            .unwrap();
        assert_eq!(
            body_json(response).await,
            json!({ "status": "error", "message": format!("Person not found: {id}") })
        );
    }

    #[tokio::test]
    async fn test_update_with_unknown_category_is_rejected() {
        let state = AppState::with_demo_data();
        let app = create_app(state.clone());

        let response = app
            .clone()
            .oneshot(post(json!({
                "action": "updateEvent",
                "payload": { "id": "e1", "type": "Vacation" }
            })))
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["status"], "error");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid event"));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/?format=json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let snapshot: Snapshot = serde_json::from_slice(&body).unwrap();
        assert_eq!(snapshot.events, demo_events());
    }

    #[tokio::test]
    async fn test_update_with_invalid_fields_is_rejected() {
        let state = AppState::with_demo_data();
        let app = create_app(state.clone());
        let person_id = demo_people()[0].id.clone();

        let cases = [
            json!({ "action": "updatePerson", "payload": { "id": person_id, "birthDate": "someday" } }),
            json!({ "action": "updatePerson", "payload": { "id": person_id, "name": "  " } }),
            json!({ "action": "updateEvent", "payload": { "id": "e1", "personId": true } }),
            json!({ "action": "updateEvent", "payload": { "id": "e1", "endDate": "1900-01-01" } }),
        ];
        for case in cases {
            let response = app.clone().oneshot(post(case.clone())).await.unwrap();
            let body = body_json(response).await;
            assert_eq!(body["status"], "error", "{case} should be rejected");
        }

        let people: Vec<Value> = state
            .people
            .read()
            .await
            .records()
            .into_iter()
            .map(Value::Object)
            .collect();
        assert_eq!(
            serde_json::from_value::<Vec<lifelines_core::timeline::Person>>(Value::Array(people))
                .unwrap(),
            demo_people()
        );
    }

    #[tokio::test]
    async fn test_update_requires_id() {
        let app = create_app(AppState::with_demo_data());

        let response = app
            .oneshot(post(json!({ "action": "updateEvent", "payload": { "title": "x" } })))
            .await
            .unwrap();

        assert_eq!(
            body_json(response).await,
            json!({ "status": "error", "message": "Missing id in payload" })
        );
    }
}
