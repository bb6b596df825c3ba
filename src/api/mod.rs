use axum::{
    Router,
    extract::{Json, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::core::{
    ChartConfig, ProjectionInput, ProjectionSample, chart_svg, format_inr, project,
};
use crate::prefs::{AppState, PrefsStore, Theme};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

const MAX_MONTHLY: f64 = 1e9;
const MAX_YEARS: f64 = 80.0;
const MAX_RATE_PCT: f64 = 100.0;
const MAX_INFLATION_PCT: f64 = 50.0;

/// One-shot CLI projection. Defaults mirror the web form's initial scenario.
#[derive(Parser, Debug)]
#[command(
    name = "finlite",
    about = "SIP future-value estimator (monthly contributions, compound growth, inflation discount)"
)]
pub struct ProjectArgs {
    /// Monthly contribution in rupees
    #[arg(long, default_value_t = 10_000.0)]
    pub monthly: f64,
    /// Investment horizon in years
    #[arg(long, default_value_t = 10.0)]
    pub years: f64,
    /// Expected annual return in percent
    #[arg(long, default_value_t = 12.0)]
    pub rate: f64,
    /// Assumed annual inflation in percent
    #[arg(long, default_value_t = 6.0)]
    pub inflation: f64,
    /// Report the inflation-adjusted future value in the headline figure
    #[arg(long)]
    pub real: bool,
    /// Overlay the invested-amount line on the chart
    #[arg(long)]
    pub show_invested: bool,
    /// Print only the chart SVG instead of the JSON summary
    #[arg(long)]
    pub svg: bool,
}

/// Field names match the web form's inputs; absent fields read as zero.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectPayload {
    sip: Option<f64>,
    years: Option<f64>,
    rate: Option<f64>,
    inflation: Option<f64>,
    use_inflation: Option<bool>,
    show_invested: Option<bool>,
}

#[derive(Debug, Clone, Copy)]
struct ProjectRequest {
    input: ProjectionInput,
    use_inflation: bool,
    show_invested: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    future_value: f64,
    total_invested: f64,
    gain: f64,
    real_future_value: f64,
    future_value_display: String,
    total_invested_display: String,
    gain_display: String,
    hint: String,
    chart_meta: String,
    series: Vec<ProjectionSample>,
    chart_svg: String,
}

#[derive(Debug, Serialize)]
struct ThemeResponse {
    theme: Theme,
}

#[derive(Debug, Deserialize)]
struct ThemePayload {
    theme: Theme,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Missing fields coerce to 0 and everything clamps to its declared range,
/// so the pipeline below never sees an out-of-range or non-finite number.
fn clamp_field(value: Option<f64>, max: f64) -> f64 {
    let n = value.unwrap_or(0.0);
    if !n.is_finite() {
        return 0.0;
    }
    n.clamp(0.0, max)
}

fn request_from_payload(payload: ProjectPayload) -> ProjectRequest {
    ProjectRequest {
        input: ProjectionInput {
            monthly: clamp_field(payload.sip, MAX_MONTHLY),
            annual_rate_pct: clamp_field(payload.rate, MAX_RATE_PCT),
            years: clamp_field(payload.years, MAX_YEARS),
            inflation_rate_pct: clamp_field(payload.inflation, MAX_INFLATION_PCT),
        },
        use_inflation: payload.use_inflation.unwrap_or(false),
        show_invested: payload.show_invested.unwrap_or(false),
    }
}

fn request_from_args(args: &ProjectArgs) -> ProjectRequest {
    request_from_payload(ProjectPayload {
        sip: Some(args.monthly),
        years: Some(args.years),
        rate: Some(args.rate),
        inflation: Some(args.inflation),
        use_inflation: Some(args.real),
        show_invested: Some(args.show_invested),
    })
}

fn build_project_response(request: &ProjectRequest) -> ProjectResponse {
    let result = project(&request.input);
    let config = ChartConfig::new(request.show_invested);

    let headline = if request.use_inflation {
        result.real_future_value
    } else {
        result.future_value
    };
    let hint = if request.use_inflation {
        format!(
            "Real value (today\u{2019}s \u{20B9}), assuming {:.1}% inflation",
            request.input.inflation_rate_pct
        )
    } else {
        format!(
            "Nominal value at {:.1}% expected return",
            request.input.annual_rate_pct
        )
    };
    let chart_meta = format!(
        "{} points \u{2022} {} years \u{2022} {:.1}% p.a.",
        result.series.len(),
        request.input.years,
        request.input.annual_rate_pct
    );

    ProjectResponse {
        future_value: result.future_value,
        total_invested: result.total_invested,
        gain: result.gain,
        real_future_value: result.real_future_value,
        future_value_display: format_inr(headline),
        total_invested_display: format_inr(result.total_invested),
        gain_display: format_inr(result.gain),
        hint,
        chart_meta,
        chart_svg: chart_svg(&result.series, &config),
        series: result.series,
    }
}

/// Output for `finlite project`: the JSON summary, or the bare SVG document
/// when the caller only wants the drawing.
pub fn one_shot_output(args: &ProjectArgs) -> String {
    let request = request_from_args(args);
    if args.svg {
        let result = project(&request.input);
        chart_svg(&result.series, &ChartConfig::new(request.show_invested))
    } else {
        serde_json::to_string_pretty(&build_project_response(&request))
            .expect("response serializes")
    }
}

pub async fn run_http_server(port: u16, prefs_path: &str) -> std::io::Result<()> {
    let state = Arc::new(AppState::load(PrefsStore::new(prefs_path)));
    info!("loaded theme preference: {}", state.theme().as_str());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .route("/chart.svg", get(chart_handler))
        .route("/api/theme", get(theme_get_handler).post(theme_post_handler))
        .fallback(not_found_handler)
        .with_state(state);

    let listener = TcpListener::bind(addr).await?;
    println!("finlite listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(Query(payload): Query<ProjectPayload>) -> Response {
    project_handler_impl(payload)
}

async fn project_post_handler(Json(payload): Json<ProjectPayload>) -> Response {
    project_handler_impl(payload)
}

fn project_handler_impl(payload: ProjectPayload) -> Response {
    let request = request_from_payload(payload);
    debug!(
        "projecting monthly={} rate={} years={}",
        request.input.monthly, request.input.annual_rate_pct, request.input.years
    );
    json_response(StatusCode::OK, build_project_response(&request))
}

async fn chart_handler(Query(payload): Query<ProjectPayload>) -> Response {
    let request = request_from_payload(payload);
    let result = project(&request.input);
    let svg = chart_svg(&result.series, &ChartConfig::new(request.show_invested));
    with_cache_control((
        [(header::CONTENT_TYPE, "image/svg+xml; charset=utf-8")],
        svg,
    ))
}

async fn theme_get_handler(State(state): State<Arc<AppState>>) -> Response {
    json_response(
        StatusCode::OK,
        ThemeResponse {
            theme: state.theme(),
        },
    )
}

async fn theme_post_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ThemePayload>,
) -> Response {
    match state.set_theme(payload.theme) {
        Ok(()) => json_response(
            StatusCode::OK,
            ThemeResponse {
                theme: payload.theme,
            },
        ),
        Err(e) => {
            error!("theme persist failed: {e}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("failed to persist theme: {e}"),
            )
        }
    }
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
