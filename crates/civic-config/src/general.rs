//! Result sizing for the `civic` list commands.

use serde::{Deserialize, Serialize};

const fn default_limit() -> u32 {
    20
}

const fn default_max_limit() -> u32 {
    500
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Rows returned when neither the command nor `--limit` asks for a count.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Hard cap on any requested count.
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,
}

impl GeneralConfig {
    /// The requested count, or `default_limit`, never above `max_limit`.
    /// A request of zero falls back to the default.
    #[must_use]
    pub fn resolve_limit(&self, requested: Option<u32>) -> u32 {
        requested
            .filter(|n| *n > 0)
            .unwrap_or(self.default_limit)
            .min(self.max_limit)
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_request_uses_default() {
        assert_eq!(GeneralConfig::default().resolve_limit(None), 20);
    }

    #[test]
    fn zero_request_uses_default() {
        assert_eq!(GeneralConfig::default().resolve_limit(Some(0)), 20);
    }

    #[test]
    fn requests_are_capped() {
        let general = GeneralConfig {
            default_limit: 20,
            max_limit: 100,
        };
        assert_eq!(general.resolve_limit(Some(50)), 50);
        assert_eq!(general.resolve_limit(Some(10_000)), 100);
    }

    #[test]
    fn default_above_cap_is_capped() {
        let general = GeneralConfig {
            default_limit: 50,
            max_limit: 10,
        };
        assert_eq!(general.resolve_limit(None), 10);
    }
}
