#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use pathweaver_api::errors::MalformedRequestPolicy;
use pathweaver_api::generation::generator::{GenerationSettings, PathGenerator};
use pathweaver_api::llm_client::{CompletionModel, LlmError};
use pathweaver_api::models::profile::UserProfile;
use pathweaver_api::models::resource::ResourceRecord;
use pathweaver_api::profiles::{ProfileStore, ProfileStoreError};
use pathweaver_api::resources::{ResourceIndex, ResourceIndexError};
use pathweaver_api::routes::build_router;
use pathweaver_api::state::AppState;

/// Profile store that always finds nothing, counting lookups.
#[derive(Default)]
pub struct EmptyProfiles {
    pub lookups: Mutex<Vec<String>>,
}

#[async_trait]
impl ProfileStore for EmptyProfiles {
    async fn get(&self, user_id: &str) -> Result<Option<UserProfile>, ProfileStoreError> {
        self.lookups.lock().unwrap().push(user_id.to_string());
        Ok(None)
    }
}

/// Resource index returning a fixed list, or failing like a dropped connection.
pub struct FixedIndex {
    pub results: Option<Vec<ResourceRecord>>,
}

#[async_trait]
impl ResourceIndex for FixedIndex {
    async fn search(
        &self,
        _query: &str,
        _fields: &[&str],
        _limit: usize,
    ) -> Result<Vec<ResourceRecord>, ResourceIndexError> {
        match &self.results {
            Some(results) => Ok(results.clone()),
            None => Err(ResourceIndexError::Api {
                status: 502,
                message: "connection reset by peer".to_string(),
            }),
        }
    }
}

/// Completion model answering every prompt with the same envelope.
pub struct CannedModel {
    pub envelope: String,
    pub prompts: Mutex<Vec<String>>,
}

impl CannedModel {
    pub fn replying(text: &str) -> Self {
        Self {
            envelope: json!({
                "id": "msg_test",
                "type": "message",
                "content": [{"type": "text", "text": text}],
                "usage": {"input_tokens": 512, "output_tokens": 256}
            })
            .to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionModel for CannedModel {
    async fn complete(
        &self,
        prompt: &str,
        _max_tokens: u32,
        _temperature: f32,
    ) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.envelope.clone())
    }
}

pub fn valid_path() -> Value {
    json!({
        "prerequisites": ["JavaScript fundamentals", "HTML and CSS"],
        "steps": [
            {
                "title": "Components and JSX",
                "description": "Write function components and render JSX.",
                "estimated_time": "3 hours",
                "resources": [{"title": "React docs", "url": "https://react.dev/learn"}]
            },
            {
                "title": "State and props",
                "description": "Manage state with useState and pass props.",
                "estimated_time": "4 hours",
                "resources": []
            },
            {
                "title": "Effects",
                "description": "Synchronise with external systems using useEffect.",
                "estimated_time": "2 hours",
                "resources": [{"title": "You Might Not Need an Effect"}]
            }
        ]
    })
}

pub struct TestApp {
    pub router: Router,
    pub profiles: Arc<EmptyProfiles>,
    pub model: Arc<CannedModel>,
}

pub fn build_test_app(
    index: FixedIndex,
    model: CannedModel,
    policy: MalformedRequestPolicy,
) -> TestApp {
    let profiles = Arc::new(EmptyProfiles::default());
    let model = Arc::new(model);

    let generator = PathGenerator::new(
        profiles.clone(),
        Arc::new(index),
        model.clone(),
        GenerationSettings::default(),
    );

    let router = build_router(AppState {
        generator: Arc::new(generator),
        malformed_requests: policy,
    });

    TestApp {
        router,
        profiles,
        model,
    }
}

pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .header("origin", "http://localhost:8501")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    post_raw(app, uri, &body.to_string()).await
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("origin", "http://localhost:8501")
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
