use std::str::FromStr;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    domain::{keywords::extract_keywords, qna::QnaRepository, QueryType},
    routes::ApiError,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(search_questions))
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    question: String,
    #[serde(rename = "type")]
    query_type: String,
    #[serde(default)]
    from_idx: i64,
    #[serde(default = "default_to_idx")]
    to_idx: i64,
}

fn default_to_idx() -> i64 {
    20
}

#[derive(Debug, Serialize)]
struct SearchResponse {
    matching_questions: Vec<String>,
    #[serde(rename = "totalNumbers")]
    total_numbers: i64,
}

fn validate_pagination(from_idx: i64, to_idx: i64) -> Result<(), ApiError> {
    if from_idx < 0 || to_idx <= 0 || to_idx < from_idx {
        return Err(ApiError::bad_request("Invalid pagination parameters"));
    }
    Ok(())
}

#[instrument(
    name = "POST /search",
    skip(app_state, body),
    fields(
        query_type = %body.query_type,
        from_idx = body.from_idx,
        to_idx = body.to_idx,
    )
)]
async fn search_questions(
    State(app_state): State<AppState>,
    Json(body): Json<SearchBody>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query_type =
        QueryType::from_str(&body.query_type).map_err(|_| ApiError::invalid_query_type())?;
    validate_pagination(body.from_idx, body.to_idx)?;

    let keywords = extract_keywords(body.question.trim());
    if keywords.is_empty() {
        tracing::info!("no usable keywords in query");
        return Ok(Json(SearchResponse {
            matching_questions: Vec::new(),
            total_numbers: 0,
        }));
    }

    let limit = body.to_idx - body.from_idx;
    let page = app_state
        .qna_repo()
        .keyword_search(query_type, &keywords, limit, body.from_idx)
        .await?;

    Ok(Json(SearchResponse {
        matching_questions: page.matching_questions,
        total_numbers: page.total,
    }))
}
