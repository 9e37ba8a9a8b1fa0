//! HTTP display surface: a JSON API plus an embedded single-page demo that
//! drives it. The server keeps no cross-request state; every request builds
//! its own session, so concurrent users are fully isolated.

use std::collections::BTreeMap;
use std::net::SocketAddr;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::Config;
use crate::display::{self, SessionView, SimulationView};
use crate::projection::SimulationResult;
use crate::session::Session;

#[derive(Clone)]
struct ApiState {
    config: Config,
}

#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    ok: bool,
    error: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorBody {
            ok: false,
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, ApiError>;

#[derive(Debug, Clone, Default, Deserialize)]
struct SimulateRequest {
    /// Rule name -> active. Omitted rules keep the recommended pre-checked
    /// state.
    #[serde(default)]
    rules: BTreeMap<String, bool>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct SimulateResponse {
    result: SimulationResult,
    view: SimulationView,
}

#[derive(Debug, Serialize)]
struct ConfirmResponse {
    message: String,
}

pub async fn run_server(config: Config, bind: SocketAddr) -> Result<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = ApiState { config };
    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/v1/catalog", get(catalog))
        .route("/v1/simulate", post(simulate))
        .route("/v1/confirm", post(confirm))
        .route("/v1/config", get(show_config))
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("rule impact simulator listening on http://{bind}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> Json<ApiResponse<HealthResponse>> {
    ok(HealthResponse { status: "ok" })
}

async fn show_config(State(state): State<ApiState>) -> Json<ApiResponse<Config>> {
    ok(state.config)
}

async fn catalog(State(_state): State<ApiState>) -> Json<ApiResponse<SessionView>> {
    ok(display::session_view(&Session::new()))
}

async fn simulate(
    State(_state): State<ApiState>,
    Json(request): Json<SimulateRequest>,
) -> ApiResult<SimulateResponse> {
    let mut session = Session::new();
    session
        .apply_selection(&request.rules)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    let result = session.simulate();
    let view = display::simulation_view(session.baseline(), &result);
    Ok(ok(SimulateResponse { result, view }))
}

async fn confirm(State(_state): State<ApiState>) -> Json<ApiResponse<ConfirmResponse>> {
    let session = Session::new();
    ok(ConfirmResponse {
        message: session.confirm().to_string(),
    })
}

fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse { ok: true, data })
}

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Rule Impact Simulator</title>
<style>
  body { font-family: sans-serif; max-width: 640px; margin: 2rem auto; }
  .panel { display: inline-block; border: 1px solid #ccc; border-radius: 6px;
           padding: 0.8rem 1.2rem; margin-right: 1rem; }
  .panel .value { font-size: 1.6rem; font-weight: bold; }
  .bar { background: #4aa3df; height: 1rem; }
  .bar.current { background: #999; }
  label { display: block; margin: 0.4rem 0; }
  button { margin: 0.6rem 0.6rem 0.6rem 0; padding: 0.5rem 1rem; }
  #notice, #confirmation { border-left: 4px solid #4aa3df; padding: 0.5rem;
                           margin: 0.8rem 0; display: none; }
</style>
</head>
<body>
<h1>Rule impact simulator</h1>
<p id="date"></p>
<div id="baseline"></div>
<p id="advisory"></p>
<h2>Recommended scoring rules</h2>
<form id="rules"></form>
<button id="run">Simulate the impact of the adjustments</button>
<div id="outcome"></div>
<div id="notice"></div>
<h2>Take action</h2>
<button id="apply">Open the pre-configured rules</button>
<div id="confirmation"></div>
<script>
async function loadCatalog() {
  const res = await fetch('/v1/catalog');
  const body = await res.json();
  const view = body.data;
  document.getElementById('date').textContent = 'Analysis date: ' + view.analysis_date;
  document.getElementById('advisory').textContent = view.advisory;
  document.getElementById('baseline').innerHTML = view.baseline_panels.map(p =>
    '<div class="panel">' + p.label + '<div class="value">' + p.value_pct + ' %</div></div>'
  ).join('');
  document.getElementById('rules').innerHTML = view.toggles.map(t =>
    '<label><input type="checkbox" name="' + t.name + '"' + (t.active ? ' checked' : '') +
    '> ' + t.name + ' - ' + t.description + ' (estimated impact -' + t.impact +
    ' pts of acceptance)</label>'
  ).join('');
}
document.getElementById('run').addEventListener('click', async () => {
  const rules = {};
  document.querySelectorAll('#rules input').forEach(i => { rules[i.name] = i.checked; });
  const res = await fetch('/v1/simulate', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({ rules })
  });
  const body = await res.json();
  const view = body.data.view;
  document.getElementById('outcome').innerHTML =
    view.panels.map(p =>
      '<div class="panel">' + p.label + '<div class="value">' + p.value_pct +
      ' %</div>' + p.delta_pts + ' pts</div>'
    ).join('') +
    view.chart.map(r =>
      '<p>' + r.indicator +
      '<div class="bar current" style="width:' + r.current_pct + '%"></div>' +
      '<div class="bar" style="width:' + r.adjusted_pct + '%"></div></p>'
    ).join('');
  const notice = document.getElementById('notice');
  notice.textContent = view.notice;
  notice.style.display = 'block';
});
document.getElementById('apply').addEventListener('click', async () => {
  const res = await fetch('/v1/confirm', { method: 'POST' });
  const body = await res.json();
  const confirmation = document.getElementById('confirmation');
  confirmation.textContent = body.data.message;
  confirmation.style.display = 'block';
});
loadCatalog();
</script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> State<ApiState> {
        State(ApiState {
            config: Config::default(),
        })
    }

    #[tokio::test]
    async fn simulate_defaults_to_the_recommended_selection() {
        let response = simulate(state(), Json(SimulateRequest::default()))
            .await
            .expect("simulate failed");
        assert!(response.0.ok);
        assert_eq!(response.0.data.result.new_accept, 10);
        assert_eq!(response.0.data.result.new_refusal, 90);
    }

    #[tokio::test]
    async fn simulate_rejects_unknown_rule_names() {
        let mut rules = BTreeMap::new();
        rules.insert("SHOE_SIZE".to_string(), false);
        let error = simulate(state(), Json(SimulateRequest { rules }))
            .await
            .expect_err("unknown rule accepted");
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn catalog_exposes_pre_checked_toggles() {
        let response = catalog(state()).await;
        assert_eq!(response.0.data.toggles.len(), 4);
        assert!(response.0.data.toggles.iter().all(|t| t.active));
    }
}
