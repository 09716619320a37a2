//! `/graphql` served through the ingress router.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use api_ingress::{ApiIngress, ApiIngressConfig};
use runtime::ServerConfig;
use users_info::{UsersInfo, UsersInfoConfig};

fn app(config: UsersInfoConfig) -> Router {
    ApiIngress::new(ServerConfig::default(), ApiIngressConfig::default())
        .with_module(Arc::new(UsersInfo::new(config)))
        .build_router()
        .expect("router should build")
}

fn graphql_post(query: &str) -> Request<Body> {
    Request::post("/graphql")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "query": query }).to_string()))
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn post_executes_queries() {
    let response = app(UsersInfoConfig::default())
        .oneshot(graphql_post("{ user(id: \"1\") { name email } }"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let json = body_json(response).await;
    assert_eq!(
        json["data"]["user"],
        json!({ "name": "Ana García", "email": "ana@email.com" })
    );
}

#[tokio::test]
async fn state_is_shared_across_requests() {
    let app = app(UsersInfoConfig::default());

    let created = body_json(
        app.clone()
            .oneshot(graphql_post(
                "mutation { addUser(name: \"Nina\", email: \"nina@email.com\", age: 22) { id } }",
            ))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(created["data"]["addUser"]["id"], "5");

    let found = body_json(
        app.oneshot(graphql_post("{ searchUsers(name: \"nina\") { id age } }"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(found["data"]["searchUsers"], json!([{ "id": "5", "age": 22 }]));
}

#[tokio::test]
async fn not_found_travels_in_the_errors_array() {
    let response = app(UsersInfoConfig::default())
        .oneshot(graphql_post(
            "mutation { updateUser(id: \"42\", name: \"Nobody\") { id } }",
        ))
        .await
        .unwrap();

    // GraphQL errors still ride on a 200
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["updateUser"], Value::Null);
    assert_eq!(json["errors"][0]["extensions"]["code"], "USERS_NOT_FOUND");
}

#[tokio::test]
async fn get_serves_graphiql_by_default() {
    let response = app(UsersInfoConfig::default())
        .oneshot(Request::get("/graphql").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"), "{content_type}");

    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.to_lowercase().contains("graphiql"));
}

#[tokio::test]
async fn get_executes_when_graphiql_is_off() {
    let app = app(UsersInfoConfig {
        enable_graphiql: false,
        ..Default::default()
    });

    let response = app
        .oneshot(
            Request::get("/graphql?query=%7B%20users%20%7B%20id%20%7D%20%7D")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["users"].as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn health_and_graphql_coexist() {
    let response = app(UsersInfoConfig::default())
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
