//! # Rule Configuration
//!
//! Which rule groups and settings are enabled, and which bodies are never
//! touched.
//!
//! ```toml
//! blacklist = ["Sun"]
//!
//! [groups.celestial]
//! enabled = true
//! name = true
//! orbit = false
//! ```
//!
//! A group without `enabled`, or with `enabled = false`, is disabled. A rule
//! that declares a setting runs only if that setting is present and `true`.
//!
//! Every registered group must be present, and a group may only name
//! settings that one of its rules declares. A misspelt key such as `orbti`
//! rejects the whole pass with `InvalidConfig` instead of being ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{TweakError, TweakResult};
use crate::rule::RuleRegistry;

/// Enable flags of one rule group.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Master switch of the group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Per-setting switches.
    #[serde(flatten)]
    pub settings: BTreeMap<String, bool>,
}

impl GroupConfig {
    /// Whether the master switch is on.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled == Some(true)
    }

    /// Whether `setting` is present and on.
    #[must_use]
    pub fn setting_enabled(&self, setting: &str) -> bool {
        self.settings.get(setting).copied().unwrap_or(false)
    }
}

/// The complete rule configuration of a pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweakConfig {
    /// Names of bodies no rule may touch.
    #[serde(default)]
    pub blacklist: Vec<String>,
    /// Groups by identifier.
    #[serde(default)]
    pub groups: BTreeMap<String, GroupConfig>,
}

impl TweakConfig {
    /// Parses a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text is malformed.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// A configuration enabling every group and setting of `registry`.
    #[must_use]
    pub fn all_enabled(registry: &RuleRegistry) -> Self {
        let mut config = Self::default();
        for rule in registry.iter() {
            let group = config.groups.entry(rule.group().to_string()).or_default();
            group.enabled = Some(true);
            if let Some(setting) = rule.setting() {
                group.settings.insert(setting.to_string(), true);
            }
        }
        config
    }

    /// Turns one setting on or off, creating the group if needed.
    pub fn set(&mut self, group: &str, setting: &str, enabled: bool) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .settings
            .insert(setting.to_string(), enabled);
    }

    /// Turns a whole group on or off, creating it if needed.
    pub fn set_group(&mut self, group: &str, enabled: bool) {
        self.groups.entry(group.to_string()).or_default().enabled = Some(enabled);
    }

    /// Whether a rule of `group` declaring `setting` may run.
    #[must_use]
    pub fn rule_enabled(&self, group: &str, setting: Option<&str>) -> bool {
        let Some(config) = self.groups.get(group) else {
            return false;
        };
        config.is_enabled() && setting.map_or(true, |s| config.setting_enabled(s))
    }

    /// Whether `body` is excluded from generation.
    #[must_use]
    pub fn is_blacklisted(&self, body: &str) -> bool {
        self.blacklist.iter().any(|b| b == body)
    }

    /// Checks the configuration against the registered rules.
    ///
    /// # Errors
    ///
    /// `MissingGroup` if a registered rule's group is absent, `InvalidConfig`
    /// if a known group names a setting no rule of that group declares.
    pub fn validate_for(&self, registry: &RuleRegistry) -> TweakResult<()> {
        for group in registry.groups() {
            let Some(config) = self.groups.get(group) else {
                return Err(TweakError::MissingGroup(group.to_string()));
            };
            for setting in config.settings.keys() {
                let declared = registry
                    .iter()
                    .any(|rule| rule.group() == group && rule.setting() == Some(setting.as_str()));
                if !declared {
                    return Err(TweakError::InvalidConfig(format!(
                        "unknown setting {setting} in group {group}"
                    )));
                }
            }
        }
        Ok(())
    }
}
