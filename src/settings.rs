use crate::error::{PlayerError, Result};
use serde_json::Value;
use std::collections::BTreeMap;

/// Raw `data-*` attributes of a host container, keyed by their dataset name
/// (`data-loop-set` is stored as `loopSet`).
pub type HostAttributes = BTreeMap<String, String>;

pub const ATTR_CONNECTED: &str = "connected";
pub const ATTR_VOLUME: &str = "volume";
pub const ATTR_LOOP_SET: &str = "loopSet";
pub const ATTR_PLAY_NEXT: &str = "playNext";

/// Dataset keys a host container may carry.
pub const KNOWN_ATTRIBUTES: [&str; 4] = [ATTR_CONNECTED, ATTR_VOLUME, ATTR_LOOP_SET, ATTR_PLAY_NEXT];

/// Player settings read once from host markup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSettings {
    /// Only one connected player may be audible at a time.
    pub connected: bool,
    pub loop_at_end: bool,
    pub play_next_on_end: bool,
    pub initial_volume: f64,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            connected: true,
            loop_at_end: false,
            play_next_on_end: true,
            initial_volume: 0.75,
        }
    }
}

impl PlayerSettings {
    /// Parse host attributes into settings. Bad values are logged and the
    /// default for that field is kept.
    pub fn from_attributes(attributes: &HostAttributes) -> Self {
        let defaults = Self::default();

        let connected = parse_flag(attributes, ATTR_CONNECTED)
            .unwrap_or_else(warn_default)
            .unwrap_or(defaults.connected);
        let loop_at_end = parse_flag(attributes, ATTR_LOOP_SET)
            .unwrap_or_else(warn_default)
            .unwrap_or(defaults.loop_at_end);
        let play_next_on_end = parse_flag(attributes, ATTR_PLAY_NEXT)
            .unwrap_or_else(warn_default)
            .unwrap_or(defaults.play_next_on_end);
        let initial_volume = parse_volume(attributes, ATTR_VOLUME)
            .unwrap_or_else(warn_default)
            .unwrap_or(defaults.initial_volume)
            .clamp(0.0, 1.0);

        Self {
            connected,
            loop_at_end,
            play_next_on_end,
            initial_volume,
        }
    }
}

fn warn_default<T>(err: PlayerError) -> Option<T> {
    tracing::warn!("{err}; using default");
    None
}

fn invalid(name: &str, value: &str) -> PlayerError {
    PlayerError::InvalidAttribute {
        name: name.to_string(),
        value: value.to_string(),
    }
}

/// Boolean attribute: absent is `None`, a bare attribute is `true`,
/// anything else must be a JSON boolean.
pub fn parse_flag(attributes: &HostAttributes, name: &str) -> Result<Option<bool>> {
    match attributes.get(name).map(|raw| raw.trim()) {
        None => Ok(None),
        Some("") => Ok(Some(true)),
        Some(raw) => serde_json::from_str::<bool>(raw)
            .map(Some)
            .map_err(|_| invalid(name, raw)),
    }
}

/// Volume attribute, unclamped. A JSON number is taken as is. A bare
/// attribute reads as `true`, and booleans map to full or zero volume.
pub fn parse_volume(attributes: &HostAttributes, name: &str) -> Result<Option<f64>> {
    let raw = match attributes.get(name).map(|raw| raw.trim()) {
        None => return Ok(None),
        Some("") => return Ok(Some(1.0)),
        Some(raw) => raw,
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Bool(full)) => Ok(Some(if full { 1.0 } else { 0.0 })),
        Ok(Value::Number(n)) => n
            .as_f64()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or_else(|| invalid(name, raw)),
        _ => Err(invalid(name, raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn attrs(pairs: &[(&str, &str)]) -> HostAttributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn missing_attributes_use_defaults() {
        let settings = PlayerSettings::from_attributes(&HostAttributes::new());
        assert_eq!(settings, PlayerSettings::default());
        assert!(settings.connected);
        assert!(settings.play_next_on_end);
        assert!(!settings.loop_at_end);
        assert_relative_eq!(settings.initial_volume, 0.75);
    }

    #[test]
    fn bare_flag_means_true() {
        let settings = PlayerSettings::from_attributes(&attrs(&[("loopSet", "")]));
        assert!(settings.loop_at_end);
    }

    #[test]
    fn valued_attributes_are_parsed() {
        let settings = PlayerSettings::from_attributes(&attrs(&[
            ("connected", "false"),
            ("playNext", "false"),
            ("volume", "0.3"),
        ]));
        assert!(!settings.connected);
        assert!(!settings.play_next_on_end);
        assert_relative_eq!(settings.initial_volume, 0.3);
    }

    #[test]
    fn volume_is_clamped() {
        let settings = PlayerSettings::from_attributes(&attrs(&[("volume", "4")]));
        assert_relative_eq!(settings.initial_volume, 1.0);
    }

    #[test]
    fn bare_volume_means_full_volume() {
        let settings = PlayerSettings::from_attributes(&attrs(&[("volume", "")]));
        assert_relative_eq!(settings.initial_volume, 1.0);

        let settings = PlayerSettings::from_attributes(&attrs(&[("volume", "false")]));
        assert_relative_eq!(settings.initial_volume, 0.0);
    }

    #[test]
    fn bad_values_fall_back_to_defaults() {
        let settings = PlayerSettings::from_attributes(&attrs(&[
            ("connected", "sometimes"),
            ("volume", "loud"),
            ("loopSet", "1"),
        ]));
        assert!(settings.connected);
        assert!(!settings.loop_at_end);
        assert_relative_eq!(settings.initial_volume, 0.75);
    }

    #[test]
    fn parse_flag_reports_the_offending_value() {
        let err = parse_flag(&attrs(&[("playNext", "yes")]), "playNext").unwrap_err();
        assert_eq!(
            err,
            PlayerError::InvalidAttribute {
                name: "playNext".to_string(),
                value: "yes".to_string(),
            }
        );
    }
}
