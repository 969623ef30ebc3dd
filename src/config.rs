use crate::analysis::{EngineSettings, StockLegMode, DEFAULT_GRID_POINTS};
use crate::errors::{EngineError, EngineResult};
use crate::models::normal::CdfMode;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub cdf_mode: CdfMode,
    pub stock_legs: StockLegMode,
    pub grid_points: usize,
    pub remote_base_url: String,
    pub remote_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> EngineResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from any variable source. `from_env` passes the process
    /// environment; tests pass a map.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> EngineResult<Self> {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let server_port = parse_var("SERVER_PORT", &var_or("SERVER_PORT", "8000"))?;
        let cdf_mode = parse_var("CDF_MODE", &var_or("CDF_MODE", "approximate"))?;
        let stock_legs = parse_var("STOCK_LEGS", &var_or("STOCK_LEGS", "excluded"))?;

        let grid_points: usize = parse_var(
            "GRID_POINTS",
            &var_or("GRID_POINTS", &DEFAULT_GRID_POINTS.to_string()),
        )?;
        if grid_points < 2 {
            return Err(EngineError::Config(format!(
                "GRID_POINTS: need at least 2 samples, got {grid_points}"
            )));
        }

        let remote_timeout_secs = parse_var(
            "REMOTE_TIMEOUT_SECS",
            &var_or("REMOTE_TIMEOUT_SECS", "10"),
        )?;

        Ok(Self {
            server_port,
            cdf_mode,
            stock_legs,
            grid_points,
            remote_base_url: var_or("REMOTE_BASE_URL", "http://127.0.0.1:8000"),
            remote_timeout_secs,
        })
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            cdf_mode: self.cdf_mode,
            stock_legs: self.stock_legs,
            grid_points: self.grid_points,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let settings = EngineSettings::default();
        Self {
            server_port: 8000,
            cdf_mode: settings.cdf_mode,
            stock_legs: settings.stock_legs,
            grid_points: settings.grid_points,
            remote_base_url: "http://127.0.0.1:8000".to_string(),
            remote_timeout_secs: 10,
        }
    }
}

fn parse_var<T>(key: &str, raw: &str) -> EngineResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| EngineError::Config(format!("{key}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> EngineResult<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_vars(|k| vars.get(k).cloned())
    }

    #[test]
    fn test_defaults_match_reference_settings() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.server_port, 8000);
        assert_eq!(cfg.engine_settings(), EngineSettings::default());
        assert_eq!(cfg.remote_base_url, "http://127.0.0.1:8000");
        assert_eq!(cfg.remote_timeout_secs, 10);
    }

    #[test]
    fn test_overrides() {
        let cfg = load(&[
            ("SERVER_PORT", "9100"),
            ("CDF_MODE", "exact"),
            ("STOCK_LEGS", "included"),
            ("GRID_POINTS", "50"),
        ])
        .unwrap();
        assert_eq!(cfg.server_port, 9100);
        assert_eq!(cfg.cdf_mode, CdfMode::Exact);
        assert_eq!(cfg.stock_legs, StockLegMode::Included);
        assert_eq!(cfg.grid_points, 50);
    }

    #[test]
    fn test_remote_overrides() {
        let cfg = load(&[
            ("REMOTE_BASE_URL", "http://analytics.internal:8100"),
            ("REMOTE_TIMEOUT_SECS", "3"),
        ])
        .unwrap();
        assert_eq!(cfg.remote_base_url, "http://analytics.internal:8100");
        assert_eq!(cfg.remote_timeout_secs, 3);
    }

    #[test]
    fn test_bad_values_name_the_variable() {
        for (key, value) in [
            ("SERVER_PORT", "not-a-port"),
            ("CDF_MODE", "gaussian"),
            ("STOCK_LEGS", "sometimes"),
            ("GRID_POINTS", "1"),
            ("REMOTE_TIMEOUT_SECS", "-3"),
        ] {
            match load(&[(key, value)]) {
                Err(EngineError::Config(msg)) => assert!(msg.contains(key), "{key}: {msg}"),
                other => panic!("{key}={value} should be a config error, got {other:?}"),
            }
        }
    }
}
