//! Dashboard theme tokens.
//!
//! Token *names* are a stable contract other code references; token *values*
//! can be swapped through [`ThemeOverrides`], typically from the `[theme]`
//! table of the TOML config.

mod defaults;

use crate::utils::error::{Result, SchemaError};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorToken {
    pub light: String,
    pub dark: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Position in the animation, 0.0 to 1.0.
    pub offset: f64,
    pub properties: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub duration: String,
    pub easing: String,
    pub keyframes: Vec<Keyframe>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub colors: BTreeMap<String, ColorToken>,
    pub radius: BTreeMap<String, String>,
    pub durations: BTreeMap<String, String>,
    pub easings: BTreeMap<String, String>,
    pub animations: BTreeMap<String, Animation>,
    pub shadows: BTreeMap<String, String>,
}

/// A resolved token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenValue<'a> {
    Color(&'a ColorToken),
    Plain(&'a str),
    Animation(&'a Animation),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorOverride {
    pub light: Option<String>,
    pub dark: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationOverride {
    pub duration: Option<String>,
    pub easing: Option<String>,
    pub keyframes: Option<Vec<Keyframe>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeOverrides {
    pub colors: BTreeMap<String, ColorOverride>,
    pub radius: BTreeMap<String, String>,
    pub durations: BTreeMap<String, String>,
    pub easings: BTreeMap<String, String>,
    pub animations: BTreeMap<String, AnimationOverride>,
    pub shadows: BTreeMap<String, String>,
}

impl ThemeOverrides {
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
            && self.radius.is_empty()
            && self.durations.is_empty()
            && self.easings.is_empty()
            && self.animations.is_empty()
            && self.shadows.is_empty()
    }

    fn token_names(&self) -> Vec<String> {
        qualified_names([
            self.colors.keys().collect(),
            self.radius.keys().collect(),
            self.durations.keys().collect(),
            self.easings.keys().collect(),
            self.animations.keys().collect(),
            self.shadows.keys().collect(),
        ])
    }
}

/// `group.name` for each key, groups in [`ThemeConfig::GROUPS`] order.
fn qualified_names(keys: [Vec<&String>; 6]) -> Vec<String> {
    ThemeConfig::GROUPS
        .iter()
        .zip(keys)
        .flat_map(|(group, names)| names.into_iter().map(move |k| format!("{}.{}", group, k)))
        .collect()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        defaults::builtin()
    }
}

fn replace_plain(target: &mut BTreeMap<String, String>, source: &BTreeMap<String, String>) {
    for (name, value) in source {
        if let Some(slot) = target.get_mut(name) {
            *slot = value.clone();
        }
    }
}

impl ThemeConfig {
    pub const GROUPS: &'static [&'static str] = &[
        "colors",
        "radius",
        "durations",
        "easings",
        "animations",
        "shadows",
    ];

    /// Every token as `group.name`, grouped in [`ThemeConfig::GROUPS`] order.
    pub fn token_names(&self) -> Vec<String> {
        qualified_names([
            self.colors.keys().collect(),
            self.radius.keys().collect(),
            self.durations.keys().collect(),
            self.easings.keys().collect(),
            self.animations.keys().collect(),
            self.shadows.keys().collect(),
        ])
    }

    pub fn get(&self, token: &str) -> Option<TokenValue<'_>> {
        let (group, name) = token.split_once('.')?;
        match group {
            "colors" => self.colors.get(name).map(TokenValue::Color),
            "radius" => self.radius.get(name).map(|v| TokenValue::Plain(v)),
            "durations" => self.durations.get(name).map(|v| TokenValue::Plain(v)),
            "easings" => self.easings.get(name).map(|v| TokenValue::Plain(v)),
            "animations" => self.animations.get(name).map(TokenValue::Animation),
            "shadows" => self.shadows.get(name).map(|v| TokenValue::Plain(v)),
            _ => None,
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.get(token).is_some()
    }

    /// Swaps token values. Fails without changing anything when an override
    /// names a token that does not exist.
    pub fn apply_overrides(&mut self, overrides: &ThemeOverrides) -> Result<()> {
        let unknown: Vec<String> = overrides
            .token_names()
            .into_iter()
            .filter(|name| !self.contains(name))
            .collect();
        if !unknown.is_empty() {
            return Err(SchemaError::UnknownThemeToken {
                token: unknown.join(", "),
            });
        }

        for (name, color) in &overrides.colors {
            if let Some(slot) = self.colors.get_mut(name) {
                if let Some(light) = &color.light {
                    slot.light = light.clone();
                }
                if let Some(dark) = &color.dark {
                    slot.dark = dark.clone();
                }
            }
        }
        replace_plain(&mut self.radius, &overrides.radius);
        replace_plain(&mut self.durations, &overrides.durations);
        replace_plain(&mut self.easings, &overrides.easings);
        replace_plain(&mut self.shadows, &overrides.shadows);
        for (name, animation) in &overrides.animations {
            if let Some(slot) = self.animations.get_mut(name) {
                if let Some(duration) = &animation.duration {
                    slot.duration = duration.clone();
                }
                if let Some(easing) = &animation.easing {
                    slot.easing = easing.clone();
                }
                if let Some(keyframes) = &animation.keyframes {
                    slot.keyframes = keyframes.clone();
                }
            }
        }

        tracing::debug!("Applied {} theme override(s)", overrides.token_names().len());
        Ok(())
    }

    pub fn with_overrides(overrides: &ThemeOverrides) -> Result<Self> {
        let mut theme = Self::default();
        theme.apply_overrides(overrides)?;
        theme.validate()?;
        Ok(theme)
    }
}

impl Validate for ThemeConfig {
    fn validate(&self) -> Result<()> {
        for (name, color) in &self.colors {
            validate_non_empty_string(&format!("colors.{}.light", name), &color.light)?;
            validate_non_empty_string(&format!("colors.{}.dark", name), &color.dark)?;
        }
        for (group, table) in [
            ("radius", &self.radius),
            ("durations", &self.durations),
            ("easings", &self.easings),
            ("shadows", &self.shadows),
        ] {
            for (name, value) in table {
                validate_non_empty_string(&format!("{}.{}", group, name), value)?;
            }
        }
        for (name, animation) in &self.animations {
            let field = format!("animations.{}", name);
            validate_non_empty_string(&format!("{}.duration", field), &animation.duration)?;
            if animation.keyframes.is_empty() {
                return Err(SchemaError::ConfigValidationError {
                    field,
                    message: "animation needs at least one keyframe".to_string(),
                });
            }
            let mut last = -1.0;
            for frame in &animation.keyframes {
                if !(0.0..=1.0).contains(&frame.offset) || frame.offset <= last {
                    return Err(SchemaError::ConfigValidationError {
                        field,
                        message: format!(
                            "keyframe offsets must increase within 0..=1, got {}",
                            frame.offset
                        ),
                    });
                }
                last = frame.offset;
            }
        }
        Ok(())
    }
}
