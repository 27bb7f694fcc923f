use std::sync::Arc;

use anyhow::Context;
use axum::{
    Form, Router,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tracing::{error, info};
use weather_core::{DisplayView, WeatherLookup};

use crate::page::Pages;

const MAX_FORM_BYTES: usize = 16 * 1024;

#[derive(Debug, Clone)]
pub struct AppState {
    lookup: WeatherLookup,
    pages: Arc<Pages>,
}

impl AppState {
    pub fn new(lookup: WeatherLookup, pages: Pages) -> Self {
        Self { lookup, pages: Arc::new(pages) }
    }
}

/// Submitted form. A missing `city` field is treated like an empty one;
/// when `city` is repeated the last value wins.
#[derive(Debug, Default, PartialEq)]
pub struct WeatherForm {
    city: String,
}

impl WeatherForm {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let city = pairs
            .into_iter()
            .rev()
            .find_map(|(name, value)| (name == "city").then_some(value))
            .unwrap_or_default();
        Self { city }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(show_form))
        .route("/weather", post(get_weather))
        .layer(DefaultBodyLimit::max(MAX_FORM_BYTES))
        .with_state(state)
}

pub async fn serve(bind: &str, state: AppState) -> anyhow::Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {bind}"))?;
    let addr = listener.local_addr().context("Failed to read bound address")?;
    info!(%addr, "weather dashboard listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated unexpectedly")
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl-C received, shutting down"),
        Err(err) => {
            error!(error = %err, "failed to listen for Ctrl-C; running until killed");
            std::future::pending::<()>().await;
        }
    }
}

/// `GET /`: the empty form.
async fn show_form(State(state): State<AppState>) -> Response {
    render(&state.pages, &DisplayView::Empty)
}

/// `POST /weather`: look the city up and re-render the form with the outcome.
///
/// Lookup failures still render with 200; they are part of the page.
async fn get_weather(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let form = WeatherForm::from_pairs(pairs);
    let view = state.lookup.lookup(&form.city).await;
    render(&state.pages, &view)
}

fn render(pages: &Pages, view: &DisplayView) -> Response {
    match pages.index(view) {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            error!(error = %err, "failed to render page");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}
