//! Layout and session settings
//!
//! Stored as JSON next to the datasets; every field has a default so partial
//! files are accepted.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, StackError};
use crate::record::Category;

/// What the builder does with a record whose mastery level has no category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CategoryPolicy {
    /// Place the unit but leave it untagged (logged as a warning)
    #[default]
    SkipTag,
    /// Fail the whole build before any unit is placed
    RejectBuild,
}

impl CategoryPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryPolicy::SkipTag => "skip-tag",
            CategoryPolicy::RejectBuild => "reject-build",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "skip-tag" | "skip" => Some(CategoryPolicy::SkipTag),
            "reject-build" | "reject" => Some(CategoryPolicy::RejectBuild),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Layout ===
    /// Block extents (x = width across a layer, y = height, z = depth)
    pub block_size: Vec3,
    /// Gap between neighbouring blocks in a layer
    pub horizontal_spacing: f32,
    /// Gap between layers
    pub vertical_spacing: f32,
    /// Blocks per layer
    pub layer_capacity: usize,

    // === Session ===
    /// Countdown length used when the host does not pass one
    pub countdown_seconds: u32,
    /// Category removed when a countdown completes
    pub removed_category: Category,
    pub category_policy: CategoryPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            block_size: BLOCK_SIZE,
            horizontal_spacing: HORIZONTAL_SPACING,
            vertical_spacing: VERTICAL_SPACING,
            layer_capacity: LAYER_CAPACITY,

            countdown_seconds: COUNTDOWN_SECONDS,
            removed_category: Category::Glass,
            category_policy: CategoryPolicy::SkipTag,
        }
    }
}

impl Settings {
    /// Distance between neighbouring slot centres in a layer
    pub fn slot_stride(&self) -> f32 {
        self.block_size.x + self.horizontal_spacing
    }

    /// Vertical advance of the anchor per completed layer
    pub fn layer_rise(&self) -> f32 {
        self.block_size.y + self.vertical_spacing
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let settings = serde_json::from_str(json)?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file, falling back to defaults if it does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(StackError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.layer_capacity, 3);
        assert_eq!(settings.countdown_seconds, 10);
        assert_eq!(settings.removed_category, Category::Glass);
        assert!((settings.slot_stride() - 0.26).abs() < 1e-6);
        assert!((settings.layer_rise() - 0.16).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            Settings::from_json(r#"{ "countdown_seconds": 5, "category_policy": "RejectBuild" }"#)
                .unwrap();
        assert_eq!(settings.countdown_seconds, 5);
        assert_eq!(settings.category_policy, CategoryPolicy::RejectBuild);
        assert_eq!(settings.block_size, BLOCK_SIZE);
    }

    #[test]
    fn test_json_round_trip_and_bad_input() {
        let settings = Settings {
            removed_category: Category::Wood,
            ..Default::default()
        };
        let back = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(back, settings);

        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(StackError::Settings(_))
        ));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let settings = Settings::load("/nonexistent/stack-lab/settings.json").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_policy_names() {
        for policy in [CategoryPolicy::SkipTag, CategoryPolicy::RejectBuild] {
            assert_eq!(CategoryPolicy::from_str(policy.as_str()), Some(policy));
        }
        assert_eq!(CategoryPolicy::from_str("queue"), None);
    }
}
