use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use sqlx::PgPool;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{app_state::AppState, config::Settings, routes};

pub fn create(connection_pool: PgPool, config: Settings) -> Router<()> {
    let app_state = AppState::new(connection_pool, &config);

    let api = Router::new()
        .nest("/chat", routes::chat::router())
        .nest("/popular-questions", routes::popular_questions::router())
        .nest("/search", routes::search::router());

    // The frontend is served from a separate origin, so CORS stays open.
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/", get(|| async { "qna-api" }))
        .nest("/api", api)
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
