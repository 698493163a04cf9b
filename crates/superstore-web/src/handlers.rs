//! Route handlers.

use crate::error::WebError;
use crate::form::OrderForm;
use crate::view::PageView;
use crate::{AppState, INDEX_TEMPLATE};
use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::Json;
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;
use superstore::{FieldOptions, OrderInputRecord, PredictError, Prediction};
use superstore_output::format_currency;
use superstore_output::report::caption;

fn render(state: &AppState, view: &PageView) -> Result<Html<String>, WebError> {
    let context = tera::Context::from_serialize(view)?;
    Ok(Html(state.templates.render(INDEX_TEMPLATE, &context)?))
}

/// `GET /`: the empty form.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let view = PageView::new(state.predictor(), OrderForm::default());
    render(&state, &view)
}

/// `POST /predict`: predict and render the form page.
pub async fn predict_form(
    State(state): State<AppState>,
    form: Result<Form<OrderForm>, FormRejection>,
) -> Result<Response, WebError> {
    let predictor = state.predictor();
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            let err = WebError::from(rejection);
            tracing::info!(error = %err, "form rejected");
            let view = PageView::new(predictor, OrderForm::default()).with_error(err.to_string());
            let page = render(&state, &view)?;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };
    let order = OrderInputRecord::from(form.clone());
    let view = PageView::new(predictor, form);

    match predictor.predict(&order) {
        Ok(result) => {
            tracing::info!(
                predicted = %format_currency(result.predicted_sales),
                expected = %format_currency(result.expected_by_formula),
                "form prediction"
            );
            Ok(render(&state, &view.with_result(predictor, result))?.into_response())
        }
        Err(err @ PredictError::Model(_)) => Err(err.into()),
        Err(err) => {
            tracing::info!(error = %err, kind = err.kind(), "order rejected");
            let page = render(&state, &view.with_error(err.to_string()))?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
    }
}

/// `POST /api/predict`: predict from a JSON order.
pub async fn predict_json(
    State(state): State<AppState>,
    form: Result<Json<OrderForm>, JsonRejection>,
) -> Result<Json<Prediction>, WebError> {
    let Json(form) = form?;
    let order = OrderInputRecord::from(form);
    let prediction = state.predictor().predict_with_features(&order)?;
    tracing::info!(
        predicted = %format_currency(prediction.result.predicted_sales),
        "api prediction"
    );
    Ok(Json(prediction))
}

/// `GET /api/options`: option lists with their codes.
pub async fn options(State(state): State<AppState>) -> Json<Vec<FieldOptions>> {
    Json(state.predictor().options())
}

/// Body of `GET /api/metrics`.
#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    /// Model display name
    pub model: String,
    /// Coefficient of determination
    pub r2: f64,
    /// Mean absolute error
    pub mae: f64,
    /// Root mean squared error
    pub rmse: f64,
    /// Footer line
    pub caption: String,
}

/// `GET /api/metrics`: static model scores.
pub async fn metrics(State(state): State<AppState>) -> Json<MetricsResponse> {
    let predictor = state.predictor();
    let metrics = predictor.metrics();
    Json(MetricsResponse {
        model: predictor.model_name().to_string(),
        r2: metrics.r2,
        mae: metrics.mae,
        rmse: metrics.rmse,
        caption: caption(predictor.model_name(), metrics),
    })
}

/// `GET /health`.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
