#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use jobly::jobly_auth::create_token;
use jobly::jobly_config::{CorsConfig, JwtConfig};
use jobly::jobly_core::AppError;
use jobly::jobly_db::{DataStore, Row, SqlParam};
use jobly::router::init_router;
use jobly::state::AppState;

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes";

/// In-memory store that records every statement and answers with row sets
/// queued up front, in order.
#[derive(Default)]
pub struct ScriptedStore {
    calls: Mutex<Vec<(String, Vec<SqlParam>)>>,
    orderings: Mutex<Vec<String>>,
    responses: Mutex<Vec<Vec<Row>>>,
}

impl ScriptedStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, rows: Vec<Row>) {
        self.responses.lock().unwrap().insert(0, rows);
    }

    pub fn calls(&self) -> Vec<(String, Vec<SqlParam>)> {
        self.calls.lock().unwrap().clone()
    }

    /// `ORDER BY` lists passed to ordered reads, in call order.
    pub fn orderings(&self) -> Vec<String> {
        self.orderings.lock().unwrap().clone()
    }
}

#[async_trait]
impl DataStore for ScriptedStore {
    async fn execute(&self, query: &str, params: Vec<SqlParam>) -> Result<Vec<Row>, AppError> {
        self.calls.lock().unwrap().push((query.to_string(), params));
        Ok(self.responses.lock().unwrap().pop().unwrap_or_default())
    }

    async fn execute_ordered(
        &self,
        query: &str,
        params: Vec<SqlParam>,
        order_by: &str,
    ) -> Result<Vec<Row>, AppError> {
        self.orderings.lock().unwrap().push(order_by.to_string());
        self.execute(query, params).await
    }
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig::with_secret(TEST_SECRET)
}

pub fn setup_test_app(store: Arc<ScriptedStore>) -> axum::Router {
    let state = AppState::new(store, jwt_config(), CorsConfig::default());
    init_router(state)
}

pub fn u1_token() -> String {
    create_token("u1", false, &jwt_config()).unwrap()
}

pub fn admin_token() -> String {
    create_token("admin", true, &jwt_config()).unwrap()
}

pub fn job_row(id: i32, title: &str, salary: Option<i32>, equity: Option<&str>) -> Row {
    json!({
        "id": id,
        "title": title,
        "salary": salary,
        "equity": equity,
        "companyHandle": "c1"
    })
}

pub fn company_row() -> Row {
    json!({
        "handle": "c1",
        "name": "C1",
        "description": "Desc1",
        "numEmployees": 1,
        "logoUrl": "http://c1.img"
    })
}

pub async fn send(
    app: axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
