//! Error type for setup paths (settings, assets, canvas wiring)
//!
//! The per-frame simulation never fails: pool exhaustion drops requests and
//! off-screen entities are reclaimed. Everything here happens before the
//! first frame.

use std::fmt;

#[derive(Debug)]
pub enum GameError {
    /// The loop was started before every image in the manifest loaded
    AssetsNotReady { loaded: usize, expected: usize },
    /// A settings value is outside its allowed range
    InvalidSettings { field: &'static str, reason: String },
    /// Settings JSON could not be parsed
    SettingsParse(serde_json::Error),
    /// Canvas or DOM lookup failed during web setup
    Canvas(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssetsNotReady { loaded, expected } => {
                write!(f, "assets not ready: {loaded} of {expected} images loaded")
            }
            Self::InvalidSettings { field, reason } => {
                write!(f, "invalid setting `{field}`: {reason}")
            }
            Self::SettingsParse(err) => write!(f, "failed to parse settings: {err}"),
            Self::Canvas(msg) => write!(f, "canvas setup failed: {msg}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SettingsParse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        Self::SettingsParse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = GameError::AssetsNotReady {
            loaded: 1,
            expected: 2,
        };
        assert_eq!(err.to_string(), "assets not ready: 1 of 2 images loaded");

        let err = GameError::InvalidSettings {
            field: "player.fire_cooldown",
            reason: "must be at least 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid setting `player.fire_cooldown`: must be at least 1"
        );
    }

    #[test]
    fn test_parse_error_has_source() {
        let parse_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = GameError::from(parse_err);
        assert!(std::error::Error::source(&err).is_some());
    }
}
