#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/superstore-analytics/superstore/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod form;
pub mod handlers;
pub mod view;

pub use error::{ErrorBody, WebError};
pub use form::OrderForm;

use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use superstore::Predictor;
use tera::Tera;
use tower_http::trace::TraceLayer;

const INDEX_TEMPLATE: &str = "index.html";

/// Shared state of the handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    predictor: Arc<Predictor>,
    templates: Arc<Tera>,
}

impl AppState {
    /// Compile the page templates around a loaded predictor.
    pub fn new(predictor: Arc<Predictor>) -> Result<Self, WebError> {
        let mut templates = Tera::default();
        templates.add_raw_template(INDEX_TEMPLATE, include_str!("../templates/index.html"))?;
        Ok(Self {
            predictor,
            templates: Arc::new(templates),
        })
    }

    /// The loaded predictor.
    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/predict", post(handlers::predict_form))
        .route("/api/predict", post(handlers::predict_json))
        .route("/api/options", get(handlers::options))
        .route("/api/metrics", get(handlers::metrics))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Router over a predictor, with compiled templates.
pub fn app(predictor: Arc<Predictor>) -> Result<Router, WebError> {
    Ok(router(AppState::new(predictor)?))
}
