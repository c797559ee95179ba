use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use insuriq::config::AppConfig;
use insuriq::error::AppError;
use insuriq::telemetry;
use insuriq::workflows::underwriting::{
    underwriting_router, ConstructionType, DecisionStatus, EvaluatorRegistry, PropertyInput,
    PropertyType, ProviderSet, StaticGazetteer, StaticGuidelineLibrary, UnderwritingPipeline,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "InsurIQ",
    about = "Run the automated NATCAT underwriting service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run one assessment against the reference providers and print the report
    Underwrite(UnderwriteArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct UnderwriteArgs {
    /// Property identifier for the report
    #[arg(long, default_value = "PROP-123")]
    property_id: String,
    /// Property type: residential, commercial, or industrial
    #[arg(long, default_value = "residential", value_parser = parse_property_type)]
    property_type: PropertyType,
    /// Free-text address to geocode
    #[arg(long, default_value = "123 Main St, Los Angeles, CA")]
    address: String,
    /// Construction type: wood, concrete, steel, masonry, or unknown
    #[arg(long, default_value = "wood", value_parser = parse_construction_type)]
    construction_type: ConstructionType,
    /// Year the structure was built
    #[arg(long, default_value_t = 1990)]
    year_built: i32,
    /// Number of floors
    #[arg(long, default_value_t = 2)]
    floors: u16,
    /// Whether the property has a basement
    #[arg(long)]
    basement: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Underwrite(args) => run_underwrite(args).await,
    }
}

fn parse_property_type(raw: &str) -> Result<PropertyType, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "residential" => Ok(PropertyType::Residential),
        "commercial" => Ok(PropertyType::Commercial),
        "industrial" => Ok(PropertyType::Industrial),
        other => Err(format!(
            "unknown property type '{other}' (expected residential, commercial, or industrial)"
        )),
    }
}

fn parse_construction_type(raw: &str) -> Result<ConstructionType, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "wood" => Ok(ConstructionType::Wood),
        "concrete" => Ok(ConstructionType::Concrete),
        "steel" => Ok(ConstructionType::Steel),
        "masonry" => Ok(ConstructionType::Masonry),
        "unknown" => Ok(ConstructionType::Unknown),
        other => Err(format!(
            "unknown construction type '{other}' (expected wood, concrete, steel, masonry, or unknown)"
        )),
    }
}

fn build_pipeline(config: &AppConfig) -> Result<UnderwritingPipeline, AppError> {
    let providers = ProviderSet::reference();
    let registry = EvaluatorRegistry::standard(&providers, &config.underwriting.weights)?;

    Ok(UnderwritingPipeline::new(
        Arc::new(registry),
        Arc::new(StaticGazetteer),
        Arc::new(StaticGuidelineLibrary),
        config.underwriting.clone(),
    ))
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let pipeline = Arc::new(build_pipeline(&config)?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(underwriting_router(pipeline))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "NATCAT underwriting service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn run_underwrite(args: UnderwriteArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let pipeline = build_pipeline(&config)?;

    let input = PropertyInput {
        property_id: args.property_id,
        property_type: args.property_type,
        address: args.address,
        construction_type: args.construction_type,
        year_built: args.year_built,
        floors: args.floors,
        has_basement: args.basement,
    };

    println!("Underwriting demo");
    println!(
        "Property {} at {} ({:?}, built {}, {} floor(s))",
        input.property_id, input.address, input.construction_type, input.year_built, input.floors
    );

    let result = pipeline.run(input).await?;

    println!();
    print!("{}", result.report);

    if !result.evaluation_failures.is_empty() {
        println!();
        println!(
            "Note: {} hazard evaluation(s) were degraded; see the report audit section.",
            result.evaluation_failures.len()
        );
    }

    println!();
    match result.decision.status {
        DecisionStatus::Stp => println!("Straight-through processing eligible."),
        DecisionStatus::Referred => println!("Requires manual underwriting review."),
    }

    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
