use std::str::FromStr;

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    domain::{canned, qna::ChatResponse, QueryType},
    routes::ApiError,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(ask_question))
}

#[derive(Debug, Deserialize)]
struct ChatBody {
    question: String,
    #[serde(rename = "type")]
    query_type: String,
}

#[instrument(name = "POST /chat", skip(app_state, body), fields(query_type = %body.query_type))]
async fn ask_question(
    State(app_state): State<AppState>,
    Json(body): Json<ChatBody>,
) -> Result<Json<ChatResponse>, ApiError> {
    let query_type =
        QueryType::from_str(&body.query_type).map_err(|_| ApiError::invalid_query_type())?;

    // Greetings and thanks never reach the retrieval pipeline.
    if let Some(reply) = canned::canned_reply(&body.question) {
        return Ok(Json(ChatResponse::canned(reply)));
    }

    let response = app_state
        .qna_service()
        .ask(&body.question, query_type)
        .await?;

    Ok(Json(response))
}
