use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::criteria::{Category, Criterion, CriterionId, CRITERIA, RUBRIC_VERSION};
use super::domain::{EvaluationId, EvaluationSubmission};
use super::repository::{EvaluationRepository, RepositoryError};
use super::service::{CoachingService, CoachingServiceError};

/// Router builder exposing the coaching rubric and evaluation endpoints.
pub fn coaching_router<R>(service: Arc<CoachingService<R>>) -> Router
where
    R: EvaluationRepository + 'static,
{
    Router::new()
        .route("/api/v1/coaching/criteria", get(criteria_handler))
        .route("/api/v1/coaching/score", post(preview_handler::<R>))
        .route("/api/v1/coaching/report", get(report_handler::<R>))
        .route("/api/v1/coaching/evaluations", post(submit_handler::<R>))
        .route(
            "/api/v1/coaching/evaluations/:evaluation_id",
            get(evaluation_handler::<R>),
        )
        .route(
            "/api/v1/coaching/evaluations/:evaluation_id/ratings",
            put(update_ratings_handler::<R>),
        )
        .route(
            "/api/v1/coaching/representatives/:employee_id/evaluations",
            get(history_handler::<R>),
        )
        .with_state(service)
}

/// Body of the preview and rating update endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RatingsPayload {
    #[serde(default)]
    pub ratings: BTreeMap<CriterionId, f64>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReportQuery {
    top: Option<usize>,
}

#[derive(Debug, Serialize)]
struct CategoryView {
    category: Category,
    label: &'static str,
    max_points: f64,
}

#[derive(Debug, Serialize)]
struct RubricView {
    version: u16,
    categories: Vec<CategoryView>,
    criteria: &'static [Criterion],
}

pub(crate) async fn criteria_handler() -> Response {
    let categories = Category::ordered()
        .into_iter()
        .map(|category| CategoryView {
            category,
            label: category.label(),
            max_points: category.max_points(),
        })
        .collect();

    let view = RubricView {
        version: RUBRIC_VERSION,
        categories,
        criteria: &CRITERIA,
    };
    (StatusCode::OK, Json(view)).into_response()
}

pub(crate) async fn preview_handler<R>(
    State(service): State<Arc<CoachingService<R>>>,
    Json(payload): Json<RatingsPayload>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    match service.preview(payload.ratings) {
        Ok(scorecard) => (StatusCode::OK, Json(scorecard)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<CoachingService<R>>>,
    Json(submission): Json<EvaluationSubmission>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    match service.submit(submission) {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn evaluation_handler<R>(
    State(service): State<Arc<CoachingService<R>>>,
    Path(evaluation_id): Path<String>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    match service.get(&EvaluationId(evaluation_id)) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_ratings_handler<R>(
    State(service): State<Arc<CoachingService<R>>>,
    Path(evaluation_id): Path<String>,
    Json(payload): Json<RatingsPayload>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    match service.update_ratings(&EvaluationId(evaluation_id), payload.ratings) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn history_handler<R>(
    State(service): State<Arc<CoachingService<R>>>,
    Path(employee_id): Path<String>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    match service.history(&employee_id) {
        Ok(records) => {
            let views: Vec<_> = records.iter().map(|record| record.summary_view()).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn report_handler<R>(
    State(service): State<Arc<CoachingService<R>>>,
    Query(query): Query<ReportQuery>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    let top = query
        .top
        .unwrap_or_else(|| service.default_top_performers());
    match service.team_report(top) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: CoachingServiceError) -> Response {
    let status = match &error {
        CoachingServiceError::Rating(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CoachingServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        CoachingServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        CoachingServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}
