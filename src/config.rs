use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

// ============================================================================
// Application Configuration
// ============================================================================
//
// Sources, later ones winning:
// 1. Defaults
// 2. JSON file named by STOREFRONT_CONFIG (`AppConfig::load`)
// 3. Environment:
//    - RUST_LOG                           → log_filter
//    - STOREFRONT_ENFORCE_TERMINAL_STATUS → payment.enforce_terminal_status
//
// ============================================================================

pub const DEFAULT_LOG_FILTER: &str = "info,storefront_domain=debug";

const CONFIG_PATH_VAR: &str = "STOREFRONT_CONFIG";
const ENFORCE_TERMINAL_STATUS_VAR: &str = "STOREFRONT_ENFORCE_TERMINAL_STATUS";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    /// Reject payments for orders that are already PAID or FAILED
    pub enforce_terminal_status: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
    pub payment: PaymentConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            payment: PaymentConfig::default(),
        }
    }
}

impl AppConfig {
    /// Optional JSON file, then environment overrides
    pub fn load() -> Result<Self> {
        let base = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => {
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file {}", path))?;
                Self::from_json(&json)?
            }
            Err(_) => Self::default(),
        };

        base.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse configuration JSON")
    }

    /// Apply overrides from any key/value source
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(filter) = lookup("RUST_LOG") {
            if !filter.trim().is_empty() {
                self.log_filter = filter;
            }
        }

        if let Some(value) = lookup(ENFORCE_TERMINAL_STATUS_VAR) {
            self.payment.enforce_terminal_status = parse_bool(ENFORCE_TERMINAL_STATUS_VAR, &value)?;
        }

        Ok(self)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{} must be a boolean, got {:?}", key, other),
    }
}
