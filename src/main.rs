use std::path::Path;

use tokio::sync::watch;
use vani_core::bootstrap::{AppBuilder, resolve_config_path};
#[cfg(feature = "otel")]
use vani_core::config::Config;
use vani_gateway::GatewayServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_subscriber(&resolve_config_path());

    let app = AppBuilder::from_env().await?;
    tracing::info!(config = %app.config_path().display(), "configuration loaded");

    let (engine, transcriber) = app.build();
    tracing::info!(
        backends = ?engine.backend_names(),
        speech = transcriber.has_stt(),
        "translation engine ready"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {e:#}");
            return;
        }
        tracing::info!("received shutdown signal");
        let _ = shutdown_tx.send(true);
    });

    let gateway = &app.config().gateway;
    GatewayServer::new(
        &gateway.bind,
        gateway.port,
        engine,
        transcriber,
        shutdown_rx,
    )
    .with_max_body_size(gateway.max_body_size)
    .with_cors_origins(gateway.cors_origins.clone())
    .serve()
    .await?;

    Ok(())
}

fn init_subscriber(config_path: &Path) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer();

    #[cfg(feature = "otel")]
    {
        let config = Config::load(config_path).ok();
        let use_otlp = config
            .as_ref()
            .is_some_and(|c| c.observability.exporter == "otlp");

        if use_otlp {
            let endpoint = config
                .as_ref()
                .map_or("http://localhost:4317", |c| &c.observability.endpoint);

            match setup_otel_tracer(endpoint) {
                Ok(tracer) => {
                    let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt_layer)
                        .with(otel_layer)
                        .init();
                    return;
                }
                Err(e) => {
                    eprintln!("OTel initialization failed, falling back to fmt: {e}");
                }
            }
        }
    }

    #[cfg(not(feature = "otel"))]
    let _ = config_path;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[cfg(feature = "otel")]
fn setup_otel_tracer(endpoint: &str) -> anyhow::Result<opentelemetry_sdk::trace::SdkTracer> {
    use opentelemetry::trace::TracerProvider;
    use opentelemetry_otlp::WithExportConfig;

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    let tracer = provider.tracer("vani");
    opentelemetry::global::set_tracer_provider(provider);

    Ok(tracer)
}
