//! Frame driver configuration.
//!
//! Values come from `NODAL_*` environment variables, falling back to
//! defaults. [`FrameConfig::from_lookup`] takes any key lookup so tests do
//! not have to touch the process environment.

use crate::error::{Error, Result};
use crate::logging::DEFAULT_FILTER;

/// Environment variable for the number of frames to run.
pub const ENV_FRAMES: &str = "NODAL_FRAMES";
/// Environment variable for a fixed per-frame delta in seconds.
pub const ENV_FIXED_DELTA: &str = "NODAL_FIXED_DELTA";
/// Environment variable for the upper clamp on per-frame delta.
pub const ENV_MAX_DELTA: &str = "NODAL_MAX_DELTA";
/// Environment variable for the default log filter.
pub const ENV_LOG: &str = "NODAL_LOG";

/// Settings for the headless frame loop.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameConfig {
    /// Number of frames to run
    pub frames: u32,
    /// Use this delta (seconds) every frame instead of the wall clock
    pub fixed_delta: Option<f32>,
    /// Upper bound applied to every delta (seconds)
    pub max_delta: f32,
    /// Log filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            frames: 240,
            fixed_delta: None,
            max_delta: 0.1,
            log_filter: DEFAULT_FILTER.to_string(),
        }
    }
}

impl FrameConfig {
    /// Load the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_FRAMES) {
            config.frames = raw
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("{ENV_FRAMES}={raw:?}: {e}")))?;
        }
        if let Some(raw) = lookup(ENV_FIXED_DELTA) {
            config.fixed_delta = Some(parse_seconds(ENV_FIXED_DELTA, &raw)?);
        }
        if let Some(raw) = lookup(ENV_MAX_DELTA) {
            config.max_delta = parse_seconds(ENV_MAX_DELTA, &raw)?;
        }
        if let Some(raw) = lookup(ENV_LOG) {
            config.log_filter = raw;
        }

        Ok(config)
    }

    /// Delta for the next frame: the fixed delta if configured, otherwise
    /// `measured`, clamped to `max_delta` either way.
    pub fn frame_delta(&self, measured: f32) -> f32 {
        self.fixed_delta.unwrap_or(measured).min(self.max_delta)
    }
}

fn parse_seconds(key: &str, raw: &str) -> Result<f32> {
    let value: f32 = raw
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("{key}={raw:?}: {e}")))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::Config(format!(
            "{key} must be a positive number of seconds, got {value}"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = FrameConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, FrameConfig::default());
        assert_eq!(config.frames, 240);
        assert_eq!(config.fixed_delta, None);
    }

    #[test]
    fn test_overrides() {
        let config = FrameConfig::from_lookup(lookup_from(&[
            (ENV_FRAMES, "10"),
            (ENV_FIXED_DELTA, "0.016"),
            (ENV_MAX_DELTA, " 0.05 "),
            (ENV_LOG, "trace"),
        ]))
        .unwrap();

        assert_eq!(config.frames, 10);
        assert_eq!(config.fixed_delta, Some(0.016));
        assert_eq!(config.max_delta, 0.05);
        assert_eq!(config.log_filter, "trace");
    }

    #[test]
    fn test_rejects_garbage() {
        let err = FrameConfig::from_lookup(lookup_from(&[(ENV_FRAMES, "many")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().starts_with("Config error: NODAL_FRAMES"));

        let err = FrameConfig::from_lookup(lookup_from(&[(ENV_MAX_DELTA, "-1")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = FrameConfig::from_lookup(lookup_from(&[(ENV_FIXED_DELTA, "NaN")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_frame_delta_clamps() {
        let config = FrameConfig {
            max_delta: 0.1,
            ..FrameConfig::default()
        };
        assert_eq!(config.frame_delta(0.02), 0.02);
        assert_eq!(config.frame_delta(3.0), 0.1);

        let fixed = FrameConfig {
            fixed_delta: Some(0.5),
            max_delta: 0.25,
            ..FrameConfig::default()
        };
        assert_eq!(fixed.frame_delta(0.001), 0.25);
    }
}
