use std::str::FromStr;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    domain::{qna::QnaRepository, QueryType},
    routes::ApiError,
    AppState,
};

const POPULAR_LIMIT: i64 = 10;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(popular_questions))
}

#[derive(Debug, Deserialize)]
struct PopularQuestionsBody {
    #[serde(rename = "type")]
    query_type: String,
}

#[derive(Debug, Serialize)]
struct PopularQuestionsResponse {
    popular_questions: Vec<String>,
}

#[instrument(name = "POST /popular-questions", skip(app_state))]
async fn popular_questions(
    State(app_state): State<AppState>,
    Json(body): Json<PopularQuestionsBody>,
) -> Result<Json<PopularQuestionsResponse>, ApiError> {
    let query_type =
        QueryType::from_str(&body.query_type).map_err(|_| ApiError::invalid_query_type())?;

    let questions = app_state
        .qna_repo()
        .popular_questions(query_type, POPULAR_LIMIT)
        .await?;

    Ok(Json(PopularQuestionsResponse {
        popular_questions: questions,
    }))
}
