//! Options handed over by the hosting download manager.
//!
//! The host stores these as a flat JSON bag with its own key names
//! (`dbs`, `qualityFallback`), so the serde renames are part of the
//! contract and must not change.

use serde::{Deserialize, Serialize};

use crate::error::ResolveError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Account cookie string, verbatim from the browser. Unlocks
    /// member-only qualities; anonymous requests still work.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie: Option<String>,
    /// Request HDR renditions.
    pub hdr: bool,
    /// Request Dolby Vision and Dolby Audio renditions.
    #[serde(rename = "dbs")]
    pub dolby: bool,
    /// Preferred quality code (`qn`). None lets the fallback policy decide.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<u32>,
    /// What to do when the preferred quality is not offered.
    #[serde(rename = "qualityFallback")]
    pub quality_fallback: QualityFallback,
}

impl Settings {
    /// Parses the settings bag the host hands over at plugin load.
    pub fn from_json(value: serde_json::Value) -> Result<Self, ResolveError> {
        Ok(serde_json::from_value(value)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityFallback {
    /// Highest offered quality code.
    #[default]
    Best,
    /// Lowest offered quality code.
    Worst,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_settings_deserialize_host_keys() {
        let json = json!({
            "cookie": "SESSDATA=abc123",
            "hdr": true,
            "dbs": true,
            "quality": 80,
            "qualityFallback": "worst"
        });
        let settings: Settings = serde_json::from_value(json).unwrap();
        assert_eq!(settings.cookie, Some("SESSDATA=abc123".to_string()));
        assert!(settings.hdr);
        assert!(settings.dolby);
        assert_eq!(settings.quality, Some(80));
        assert_eq!(settings.quality_fallback, QualityFallback::Worst);
    }

    #[test]
    fn test_settings_defaults_on_empty_object() {
        let settings: Settings = serde_json::from_value(json!({})).unwrap();
        assert_eq!(settings.cookie, None);
        assert!(!settings.hdr);
        assert!(!settings.dolby);
        assert_eq!(settings.quality, None);
        assert_eq!(settings.quality_fallback, QualityFallback::Best);
    }

    #[test]
    fn test_settings_from_json_rejects_wrong_shapes() {
        assert!(Settings::from_json(json!({"quality": 80})).is_ok());
        let result = Settings::from_json(json!({"quality": "eighty"}));
        assert!(matches!(result, Err(ResolveError::Json(_))));
    }

    #[test]
    fn test_settings_serialize_keeps_host_keys() {
        let settings = Settings {
            dolby: true,
            quality: Some(116),
            ..Default::default()
        };
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(
            value,
            json!({"hdr": false, "dbs": true, "quality": 116, "qualityFallback": "best"})
        );
    }
}
