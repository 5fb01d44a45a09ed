#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServiceContext {
    pub(crate) service_name: String,
    pub(crate) environment: String,
    pub(crate) component: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogTimestamps {
    Local,
    Utc,
}

#[derive(Debug, Clone)]
pub(crate) struct ObservabilityConfig {
    pub(crate) service_context: ServiceContext,
    pub(crate) timestamps: LogTimestamps,
    /// Warnings captured during config parsing so they can be logged after tracing is initialized.
    pub(crate) warnings: Vec<String>,
}

impl ObservabilityConfig {
    pub(crate) fn from_env(component: &str) -> Self {
        Self::from_lookup(component, |key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(component: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_string = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let component = component.trim().to_string();

        let service_name = env_string("SERVICE_NAME").unwrap_or_else(|| component.clone());
        let environment = env_string("STAGE").unwrap_or_else(|| "unknown".to_string());

        let mut warnings = Vec::new();
        let timestamps = match env_string("LOG_TIMESTAMPS").as_deref() {
            None | Some("local") => LogTimestamps::Local,
            Some("utc") => LogTimestamps::Utc,
            Some(other) => {
                warnings.push(format!(
                    "LOG_TIMESTAMPS={other} is not one of local|utc; using local time"
                ));
                LogTimestamps::Local
            }
        };

        Self {
            service_context: ServiceContext {
                service_name,
                environment,
                component,
            },
            timestamps,
            warnings,
        }
    }
}
