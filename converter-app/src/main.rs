//! # Currency Converter Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the repository adapter and the rate provider client
//! - Create the conversion service
//! - Start the HTTP server

mod config;

use opentelemetry::global;
use opentelemetry_sdk::{
    metrics::SdkMeterProvider, propagation::TraceContextPropagator, trace as sdktrace,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use converter_hex::{ConversionService, HttpServer};
use converter_repo::build_repo;
use exchange_rates::ExchangeRateApiClient;

use config::{Config, LogFormat};

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("converter-service"), provider))
}

fn init_meter() -> anyhow::Result<SdkMeterProvider> {
    let exporter = opentelemetry_otlp::MetricExporter::builder()
        .with_tonic()
        .build()?;

    let provider = SdkMeterProvider::builder()
        .with_periodic_exporter(exporter)
        .build();

    global::set_meter_provider(provider.clone());
    Ok(provider)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize OpenTelemetry tracing and metrics
    let (otel_tracer, otel_provider) = init_tracer()?;
    let meter_provider = init_meter()?;
    let telemetry = tracing_opentelemetry::layer().with_tracer(otel_tracer);

    let (json_logs, text_logs) = match LogFormat::from_env() {
        LogFormat::Json => (Some(tracing_subscriber::fmt::layer().json()), None),
        LogFormat::Text => (None, Some(tracing_subscriber::fmt::layer())),
    };

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,converter_app=debug,converter_hex=debug".into()),
        )
        .with(json_logs)
        .with(text_logs)
        .with(telemetry)
        .init();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!("Starting currency converter on port {}", config.port);
    tracing::info!(
        "Using database: {}",
        config.database_url.split("://").next().unwrap_or("unknown")
    );

    // Build repository (handles connection and migration)
    let repo = build_repo(&config.database_url).await?;

    // Build the rate provider client
    let provider_config = config.provider();
    tracing::info!(?provider_config, "Rate provider configured");
    let rates = ExchangeRateApiClient::new(provider_config)?;

    // Create the conversion service
    let service = ConversionService::new(repo, rates);

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces and metrics are flushed before exit
    let _ = meter_provider.shutdown();
    let _ = otel_provider.shutdown();
    Ok(())
}
