// HTTP request handlers
use crate::application::boards::{compose, Board, BoardKind};
use crate::application::gateway::DataSourceGateway;
use crate::application::request_resolver::RequestResolver;
use crate::infrastructure::session::MemorySessionStorage;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{
        sse::{Event, Sse},
        IntoResponse, Response,
    },
    routing::get,
    Json, Router,
};
use futures::stream;
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::StreamExt;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/boards/:board", get(get_board))
        .route("/boards/:board/events", get(stream_board))
        .route("/notices", get(list_notices))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Compose a board for one request. The caller's auth ticket headers are
/// forwarded to the backend.
fn mount(kind: BoardKind, headers: &HeaderMap, state: &AppState) -> Board {
    let session = MemorySessionStorage::from_headers(headers);
    let resolver = RequestResolver::new(state.config.clone(), Some(Arc::new(session)));
    let gateway = DataSourceGateway::new(
        state.transport.clone(),
        resolver,
        state.notices.clone(),
        state.settings.use_mock,
    );

    let descriptors = kind.descriptors(&state.settings.app_base_url);
    compose(
        kind,
        &gateway,
        &descriptors,
        Duration::from_millis(state.settings.min_display_ms),
    )
}

/// Mount a board, wait for every chart to settle and return the snapshot.
pub async fn get_board(
    Path(board): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let kind = match board.parse::<BoardKind>() {
        Ok(kind) => kind,
        Err(e) => return (StatusCode::NOT_FOUND, e).into_response(),
    };

    let board = mount(kind, &headers, &state);
    board.settled().await;

    Json(board.snapshot()).into_response()
}

/// Progressive variant of `get_board`: one server-sent event per chart as it
/// resolves, named after the chart, then a final `done` event carrying the
/// settled snapshot.
pub async fn stream_board(
    Path(board): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let kind = match board.parse::<BoardKind>() {
        Ok(kind) => kind,
        Err(e) => return (StatusCode::NOT_FOUND, e).into_response(),
    };

    let board = mount(kind, &headers, &state);
    let charts = board
        .updates()
        .filter_map(|(chart, data)| data.map(|data| Event::default().event(chart).json_data(data)));
    let done = stream::once(async move {
        board.settled().await;
        Event::default().event("done").json_data(board.snapshot())
    });

    Sse::new(charts.chain(done)).into_response()
}

/// Most recent notices, oldest first.
pub async fn list_notices(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.notices.recent())
}
