use crate::ai::AISettings;
use crate::platforms::{default_platforms, PlatformConfig, DEFAULT_PLATFORM_ID};
use crate::store::{SettingsStore, StoreError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    pub platforms: Vec<PlatformConfig>,
    pub default_platform: String,
    #[serde(default)]
    pub ai: AISettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            platforms: default_platforms(),
            default_platform: DEFAULT_PLATFORM_ID.to_string(),
            ai: AISettings::default(),
        }
    }
}

impl Settings {
    /// Rebuild the registry from the fixed list, keeping persisted
    /// `enabled` flags, and make sure the default id is registered.
    pub fn normalize(&mut self) {
        let persisted = std::mem::take(&mut self.platforms);
        self.platforms = default_platforms()
            .into_iter()
            .map(|mut platform| {
                if let Some(saved) = persisted.iter().find(|p| p.id == platform.id) {
                    platform.enabled = saved.enabled;
                }
                platform
            })
            .collect();

        for saved in &persisted {
            if self.platform(&saved.id).is_none() {
                log::warn!("Ignoring unknown platform '{}' in settings", saved.id);
            }
        }

        if self.platform(&self.default_platform).is_none() {
            let fallback = self
                .platforms
                .first()
                .map(|p| p.id.clone())
                .unwrap_or_else(|| DEFAULT_PLATFORM_ID.to_string());
            log::warn!(
                "Default platform '{}' is not registered, using '{}'",
                self.default_platform,
                fallback
            );
            self.default_platform = fallback;
        }
    }

    pub fn platform(&self, id: &str) -> Option<&PlatformConfig> {
        self.platforms.iter().find(|p| p.id == id)
    }

    /// Platforms offered for selection.
    pub fn enabled_platforms(&self) -> impl Iterator<Item = &PlatformConfig> {
        self.platforms.iter().filter(|p| p.enabled)
    }

    pub fn set_platform_enabled(&mut self, id: &str, enabled: bool) -> Result<(), StoreError> {
        let platform = self
            .platforms
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::UnknownPlatform(id.to_string()))?;
        platform.enabled = enabled;
        Ok(())
    }

    pub fn set_default_platform(&mut self, id: &str) -> Result<(), StoreError> {
        if self.platform(id).is_none() {
            return Err(StoreError::UnknownPlatform(id.to_string()));
        }
        self.default_platform = id.to_string();
        Ok(())
    }
}

/// A single settings change requested from the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingChange {
    EnablePlatform(String),
    DisablePlatform(String),
    DefaultPlatform(String),
    AiEnabled(bool),
    ApiKey(String),
    Model(String),
    Endpoint(String),
}

pub fn apply_setting(store: &mut SettingsStore, change: SettingChange) -> Result<String, String> {
    let message = match &change {
        SettingChange::EnablePlatform(id) => format!("Enabled platform '{}'", id),
        SettingChange::DisablePlatform(id) => format!("Disabled platform '{}'", id),
        SettingChange::DefaultPlatform(id) => format!("Default platform set to '{}'", id),
        SettingChange::AiEnabled(true) => "AI transformation enabled".to_string(),
        SettingChange::AiEnabled(false) => "AI transformation disabled".to_string(),
        SettingChange::ApiKey(key) if key.trim().is_empty() => "API key cleared".to_string(),
        SettingChange::ApiKey(_) => "API key saved".to_string(),
        SettingChange::Model(model) => format!("Model set to '{}'", model),
        SettingChange::Endpoint(endpoint) => format!("Endpoint set to '{}'", endpoint),
    };

    store
        .update(|settings| match change {
            SettingChange::EnablePlatform(id) => settings.set_platform_enabled(&id, true),
            SettingChange::DisablePlatform(id) => settings.set_platform_enabled(&id, false),
            SettingChange::DefaultPlatform(id) => settings.set_default_platform(&id),
            SettingChange::AiEnabled(enabled) => {
                settings.ai.enabled = enabled;
                Ok(())
            }
            SettingChange::ApiKey(key) => {
                settings.ai.api_key = key.trim().to_string();
                Ok(())
            }
            SettingChange::Model(model) => {
                settings.ai.model = model;
                Ok(())
            }
            SettingChange::Endpoint(endpoint) => {
                settings.ai.endpoint = endpoint;
                Ok(())
            }
        })
        .map_err(|e| e.to_string())?;

    log::info!("{}", message);
    Ok(message)
}

fn mask_key(key: &str) -> String {
    if key.is_empty() {
        return "(not set)".to_string();
    }
    let tail: String = key
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{}", tail)
}

/// Human-readable settings summary. The API key is masked.
pub fn describe_settings(settings: &Settings) -> String {
    let mut lines = vec!["Platforms:".to_string()];
    for platform in &settings.platforms {
        let marker = if platform.id == settings.default_platform {
            " (default)"
        } else {
            ""
        };
        lines.push(format!(
            "  [{}] {:<12} {}{}",
            if platform.enabled { "x" } else { " " },
            platform.id,
            platform.name,
            marker
        ));
    }

    let ai = &settings.ai;
    lines.push("AI:".to_string());
    lines.push(format!("  enabled:  {}", ai.enabled));
    lines.push(format!("  api key:  {}", mask_key(&ai.api_key)));
    lines.push(format!("  model:    {}", ai.model));
    lines.push(format!("  endpoint: {}", ai.endpoint));
    if ai.enabled && !ai.is_usable() {
        lines.push("  note:     no API key set, rule-based formatting will be used".to_string());
    }

    lines.join("\n")
}
