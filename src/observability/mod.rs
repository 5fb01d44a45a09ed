mod config;

use anyhow::Result;
use config::{LogTimestamps, ObservabilityConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global tracing subscriber for a process embedding the
/// membership calculators. Fails if a subscriber is already installed.
pub fn init_observability(component: &str) -> Result<()> {
    let config = ObservabilityConfig::from_env(component);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Local timestamps follow the host TZ, not the tenant zone.
    let fmt_layer = match config.timestamps {
        LogTimestamps::Local => tracing_subscriber::fmt::layer()
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
            .boxed(),
        LogTimestamps::Utc => tracing_subscriber::fmt::layer()
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::rfc_3339())
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()?;

    for warning in &config.warnings {
        warn!(
            service = %config.service_context.service_name,
            environment = %config.service_context.environment,
            component = %config.service_context.component,
            warning = %warning,
            "Observability config warning"
        );
    }

    info!(
        service = %config.service_context.service_name,
        environment = %config.service_context.environment,
        component = %config.service_context.component,
        "Observability initialized"
    );

    Ok(())
}
