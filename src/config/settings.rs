//! User-chosen alarm settings
//!
//! `AppSettings` is the full record stored under `appSettings` and pushed to
//! the front end on startup. `AppSettingsPatch` is what a save request
//! carries: only the fields present are applied.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::constants::validation::MAX_OPACITY_PERCENT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmPm {
    #[serde(rename = "AM")]
    Am,
    #[serde(rename = "PM")]
    Pm,
}

impl AmPm {
    pub fn label(&self) -> &'static str {
        match self {
            AmPm::Am => "AM",
            AmPm::Pm => "PM",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressBarType {
    Segments,
    Percentage,
}

/// Clamp a stored or requested opacity into 0..=100
fn clamp_opacity(raw: i64) -> u8 {
    let clamped = raw.clamp(0, i64::from(MAX_OPACITY_PERCENT));
    if clamped != raw {
        warn!(opacity = raw, clamped, "opacity out of range, clamping");
    }
    clamped as u8
}

fn deserialize_opacity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    i64::deserialize(deserializer).map(clamp_opacity)
}

fn deserialize_opacity_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
    Option::<i64>::deserialize(deserializer).map(|raw| raw.map(clamp_opacity))
}

/// Fields missing from a stored record read as their defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// Two-digit hour, "01" through "12"
    pub alarm_hour: String,
    /// Two-digit minute, "00" through "59"
    pub alarm_minute: String,
    pub alarm_am_pm: AmPm,
    /// Window opacity percentage used by the timer view
    #[serde(deserialize_with = "deserialize_opacity")]
    pub opacity: u8,
    pub show_progress_bar: bool,
    pub progress_bar_type: ProgressBarType,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            alarm_hour: "07".to_string(),
            alarm_minute: "00".to_string(),
            alarm_am_pm: AmPm::Am,
            opacity: 100,
            show_progress_bar: true,
            progress_bar_type: ProgressBarType::Segments,
        }
    }
}

impl AppSettings {
    /// Shallow merge: every field present in `patch` replaces ours,
    /// everything else is kept.
    pub fn merge(&mut self, patch: AppSettingsPatch) {
        if let Some(hour) = patch.alarm_hour {
            self.alarm_hour = hour;
        }
        if let Some(minute) = patch.alarm_minute {
            self.alarm_minute = minute;
        }
        if let Some(am_pm) = patch.alarm_am_pm {
            self.alarm_am_pm = am_pm;
        }
        if let Some(opacity) = patch.opacity {
            self.opacity = opacity.min(MAX_OPACITY_PERCENT);
        }
        if let Some(show) = patch.show_progress_bar {
            self.show_progress_bar = show;
        }
        if let Some(kind) = patch.progress_bar_type {
            self.progress_bar_type = kind;
        }
    }

    /// "07:00 AM"
    pub fn alarm_label(&self) -> String {
        format!("{}:{} {}", self.alarm_hour, self.alarm_minute, self.alarm_am_pm.label())
    }
}

/// Partial `AppSettings` carried by a persist-settings request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarm_hour: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarm_minute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarm_am_pm: Option<AmPm>,
    #[serde(
        default,
        deserialize_with = "deserialize_opacity_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub opacity: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_progress_bar: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_bar_type: Option<ProgressBarType>,
}

impl AppSettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overlay the present fields onto a raw stored record. Keys the patch
    /// does not carry, including ones this build does not know, are kept.
    pub fn merge_into(&self, record: &mut Map<String, Value>) -> serde_json::Result<()> {
        let mut patch = self.clone();
        patch.opacity = patch.opacity.map(|opacity| opacity.min(MAX_OPACITY_PERCENT));
        if let Value::Object(fields) = serde_json::to_value(&patch)? {
            record.extend(fields);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_seeded_record() {
        let json = serde_json::to_value(AppSettings::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "alarmHour": "07",
                "alarmMinute": "00",
                "alarmAmPm": "AM",
                "opacity": 100,
                "showProgressBar": true,
                "progressBarType": "segments"
            })
        );
    }

    #[test]
    fn test_merge_only_replaces_present_fields() {
        let mut settings = AppSettings::default();
        let patch: AppSettingsPatch = serde_json::from_str(r#"{"opacity": 50}"#).unwrap();

        settings.merge(patch);

        assert_eq!(settings.opacity, 50);
        assert_eq!(settings, AppSettings { opacity: 50, ..AppSettings::default() });
    }

    #[test]
    fn test_merge_keeps_earlier_values_across_saves() {
        let mut settings = AppSettings::default();
        settings.merge(AppSettingsPatch {
            alarm_hour: Some("09".to_string()),
            alarm_am_pm: Some(AmPm::Pm),
            ..Default::default()
        });
        settings.merge(AppSettingsPatch {
            progress_bar_type: Some(ProgressBarType::Percentage),
            ..Default::default()
        });

        assert_eq!(settings.alarm_hour, "09");
        assert_eq!(settings.alarm_am_pm, AmPm::Pm);
        assert_eq!(settings.progress_bar_type, ProgressBarType::Percentage);
        assert_eq!(settings.alarm_minute, "00");
        assert!(settings.show_progress_bar);
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut settings = AppSettings::default();
        let patch = AppSettingsPatch::default();
        assert!(patch.is_empty());
        settings.merge(patch);
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_stored_opacity_is_clamped_on_read() {
        let settings: AppSettings = serde_json::from_str(r#"{"opacity": 180}"#).unwrap();
        assert_eq!(settings.opacity, 100);

        let settings: AppSettings = serde_json::from_str(r#"{"opacity": -5}"#).unwrap();
        assert_eq!(settings.opacity, 0);
    }

    #[test]
    fn test_partial_record_fills_missing_fields_from_defaults() {
        let settings: AppSettings =
            serde_json::from_str(r#"{"alarmHour": "09", "alarmAmPm": "PM"}"#).unwrap();

        assert_eq!(settings.alarm_hour, "09");
        assert_eq!(settings.alarm_am_pm, AmPm::Pm);
        assert_eq!(settings.alarm_minute, "00");
        assert_eq!(settings.opacity, 100);
    }

    #[test]
    fn test_patch_with_out_of_range_opacity_keeps_other_fields() {
        let patch: AppSettingsPatch =
            serde_json::from_str(r#"{"opacity": 300, "alarmMinute": "15"}"#).unwrap();

        assert_eq!(patch.opacity, Some(100));
        assert_eq!(patch.alarm_minute.as_deref(), Some("15"));
    }

    #[test]
    fn test_merge_clamps_opacity() {
        let mut settings = AppSettings::default();
        settings.merge(AppSettingsPatch { opacity: Some(180), ..Default::default() });
        assert_eq!(settings.opacity, 100);
    }

    #[test]
    fn test_merge_into_keeps_unpatched_and_unknown_keys() {
        let mut record = serde_json::json!({"alarmHour": "09", "theme": "dark"})
            .as_object()
            .cloned()
            .unwrap();
        let patch = AppSettingsPatch { opacity: Some(50), ..Default::default() };

        patch.merge_into(&mut record).unwrap();

        assert_eq!(
            Value::Object(record),
            serde_json::json!({"alarmHour": "09", "theme": "dark", "opacity": 50})
        );
    }

    #[test]
    fn test_alarm_label() {
        let settings = AppSettings {
            alarm_hour: "11".to_string(),
            alarm_minute: "45".to_string(),
            alarm_am_pm: AmPm::Pm,
            ..AppSettings::default()
        };
        assert_eq!(settings.alarm_label(), "11:45 PM");
    }
}
