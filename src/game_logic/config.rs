use super::attacks::CheckDetection;

/// Environment variable selecting the check-detection strategy.
pub const CHECK_DETECTION_ENV: &str = "CHESS_CHECK_DETECTION";

/// Tunables for a [`GameEngine`](super::GameEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    pub check_detection: CheckDetection,
}

impl EngineConfig {
    /// Read configuration from the process environment.
    ///
    /// Unset or unrecognised values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(value) = lookup(CHECK_DETECTION_ENV) {
            match value.parse() {
                Ok(check_detection) => config.check_detection = check_detection,
                Err(e) => log::warn!("{CHECK_DETECTION_ENV}: {e}, using default"),
            }
        }
        config
    }
}

impl From<CheckDetection> for EngineConfig {
    fn from(check_detection: CheckDetection) -> Self {
        Self { check_detection }
    }
}
