use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock, time::Duration};

use crate::analyzer::AnalyzerConfig;
use crate::detect::{DetectionSensitivity, DetectorConfig};

/// User-tunable analysis knobs persisted between runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSettings {
    pub sensitivity: DetectionSensitivity,
    /// Seconds between analysis ticks. The UI offers 1, 2 and 5.
    pub frequency_secs: u64,
    pub skip_frozen_frames: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            sensitivity: DetectionSensitivity::Medium,
            frequency_secs: 1,
            skip_frozen_frames: false,
        }
    }
}

impl AnalysisSettings {
    pub fn validate(&self) -> Result<()> {
        if self.frequency_secs == 0 {
            bail!("analysis frequency must be at least one second");
        }
        Ok(())
    }

    /// Runtime analyzer configuration for these settings.
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            interval: Duration::from_secs(self.frequency_secs),
            detector: DetectorConfig::for_sensitivity(self.sensitivity),
            skip_frozen_frames: self.skip_frozen_frames,
            ..AnalyzerConfig::default()
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<AnalysisSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            AnalysisSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn analysis(&self) -> AnalysisSettings {
        self.data.read().unwrap().clone()
    }

    pub fn update_analysis(&self, settings: AnalysisSettings) -> Result<()> {
        settings.validate()?;
        {
            let mut guard = self.data.write().unwrap();
            *guard = settings;
            self.persist(&guard)?;
        }
        Ok(())
    }

    pub fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)?;
        let data: AnalysisSettings = serde_json::from_str(&contents)?;
        let mut guard = self.data.write().unwrap();
        *guard = data;
        Ok(())
    }

    fn persist(&self, data: &AnalysisSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::detect::config::SKIN_CUTOFF_LOW;

    use super::*;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir().join(format!("poisecam-settings-{}.json", Uuid::new_v4()))
    }

    #[test]
    fn settings_round_trip_through_disk() {
        let path = scratch_path();
        let store = SettingsStore::new(path.clone()).unwrap();
        assert_eq!(store.analysis(), AnalysisSettings::default());

        let custom = AnalysisSettings {
            sensitivity: DetectionSensitivity::Low,
            frequency_secs: 5,
            skip_frozen_frames: true,
        };
        store.update_analysis(custom.clone()).unwrap();

        let reopened = SettingsStore::new(path.clone()).unwrap();
        assert_eq!(reopened.analysis(), custom);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn corrupt_settings_fall_back_to_defaults() {
        let path = scratch_path();
        fs::write(&path, "not valid json").unwrap();

        let store = SettingsStore::new(path.clone()).unwrap();
        assert_eq!(store.analysis(), AnalysisSettings::default());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn zero_frequency_is_rejected() {
        let path = scratch_path();
        let store = SettingsStore::new(path.clone()).unwrap();

        let bad = AnalysisSettings {
            frequency_secs: 0,
            ..AnalysisSettings::default()
        };
        assert!(store.update_analysis(bad).is_err());
        assert_eq!(store.analysis(), AnalysisSettings::default());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn settings_map_onto_the_analyzer_config() {
        let settings = AnalysisSettings {
            sensitivity: DetectionSensitivity::Low,
            frequency_secs: 2,
            skip_frozen_frames: true,
        };
        let config = settings.analyzer_config();

        assert_eq!(config.interval, Duration::from_secs(2));
        assert_eq!(config.detector.skin_ratio_cutoff, SKIN_CUTOFF_LOW);
        assert!(config.skip_frozen_frames);
    }

    #[test]
    fn reload_picks_up_external_edits() {
        let path = scratch_path();
        let store = SettingsStore::new(path.clone()).unwrap();

        let edited = AnalysisSettings {
            frequency_secs: 5,
            ..AnalysisSettings::default()
        };
        fs::write(&path, serde_json::to_string_pretty(&edited).unwrap()).unwrap();

        store.reload().unwrap();
        assert_eq!(store.analysis(), edited);

        let _ = fs::remove_file(path);
    }
}
