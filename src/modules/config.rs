/*
Scene tunables.

Every number the scene uses lives here so a JSON file can override it on
native builds:

```json
{
"planet": "moon",
"surface": { "variant": "elastic", "segments": 20 },
"size": { "min": 10.0, "max": 200.0, "default": 60.0 }
}
```

Missing keys keep their defaults.
*/

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::modules::planet::Planet;
use crate::modules::shapes::ShapeKind;

/// Environment variable naming an alternative config file
pub const CONFIG_ENV: &str = "TRAMPOLINE_CONFIG";
/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "trampoline.json";

/// Which trampoline gets built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceVariant {
    /// One static high-restitution slab
    #[default]
    Rigid,
    /// Chain of segments joined by springs, pinned at both ends
    Elastic,
}

impl SurfaceVariant {
    pub fn label(&self) -> &'static str {
        match self {
            SurfaceVariant::Rigid => "Rigid",
            SurfaceVariant::Elastic => "Elastic",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            SurfaceVariant::Rigid => SurfaceVariant::Elastic,
            SurfaceVariant::Elastic => SurfaceVariant::Rigid,
        }
    }
}

/// How a new shape enters the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementMode {
    /// Press shows a ghost that follows the pointer, release commits
    #[default]
    Preview,
    /// Button click drops the shape at a random x near the top
    Drop,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub variant: SurfaceVariant,
    /// Vertical position of the trampoline as a fraction of canvas height
    pub height_fraction: f32,
    pub thickness: f32,
    /// Rigid slab width as a fraction of canvas width
    pub rigid_width_fraction: f32,
    /// Above 1.0 amplifies bounces
    pub restitution: f32,
    pub friction: f32,
    pub ground_thickness: f32,

    // === Elastic variant ===
    pub segments: usize,
    pub elastic_width_fraction: f32,
    pub segment_mass: f32,
    pub spring_stiffness: f32,
    pub spring_damping: f32,
    pub anchor_stiffness: f32,
    pub anchor_damping: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            variant: SurfaceVariant::Rigid,
            height_fraction: 0.78,
            thickness: 14.0,
            rigid_width_fraction: 0.6,
            restitution: 1.2,
            friction: 0.05,
            ground_thickness: 40.0,

            segments: 15,
            elastic_width_fraction: 0.7,
            segment_mass: 0.5,
            spring_stiffness: 20000.0,
            spring_damping: 100.0,
            anchor_stiffness: 200000.0,
            anchor_damping: 400.0,
        }
    }
}

/// Material shared by every user shape
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConfig {
    pub restitution: f32,
    pub friction: f32,
    /// Linear damping, rapier's closest thing to air friction
    pub air_friction: f32,
    pub angular_damping: f32,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            restitution: 0.8,
            friction: 0.1,
            air_friction: 0.05,
            angular_damping: 0.1,
        }
    }
}

/// Bounds and starting value of a slider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl SliderRange {
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default;
        }
        value.clamp(self.min, self.max)
    }

    fn validated(self, floor: f32) -> Self {
        let min = self.min.max(floor);
        let max = self.max.max(min);
        Self {
            min,
            max,
            default: if self.default.is_nan() {
                min
            } else {
                self.default.clamp(min, max)
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Pixels/s² for a gravity scalar of 1.0
    pub gravity_px: f32,
    /// Height of the control strip above the canvas
    pub ui_chrome_height: f32,
    /// Fixed physics timestep in seconds
    pub timestep: f32,
    /// Cap on physics steps per frame
    pub max_substeps: u32,
    pub planet: Planet,
    pub shape: ShapeKind,
    pub placement: PlacementMode,
    pub mass: SliderRange,
    pub size: SliderRange,
    pub surface: SurfaceConfig,
    pub material: MaterialConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            gravity_px: 980.0,
            ui_chrome_height: 96.0,
            timestep: 1.0 / 60.0,
            max_substeps: 4,
            planet: Planet::Earth,
            shape: ShapeKind::Circle,
            placement: PlacementMode::Preview,
            mass: SliderRange {
                min: 1.0,
                max: 20.0,
                default: 5.0,
            },
            size: SliderRange {
                min: 20.0,
                max: 120.0,
                default: 50.0,
            },
            surface: SurfaceConfig::default(),
            material: MaterialConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: SceneConfig = serde_json::from_str(&json)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config.validated())
    }

    /// Config from `$TRAMPOLINE_CONFIG` or `./trampoline.json`, else defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|| std::path::PathBuf::from(CONFIG_FILE));

        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("{err:#}; using defaults");
                Self::default()
            }
        }
    }

    /// Web builds have no file system
    #[cfg(target_arch = "wasm32")]
    pub fn load_or_default() -> Self {
        Self::default()
    }

    /// Clamp values that would break the scene.
    pub fn validated(mut self) -> Self {
        if !(self.gravity_px.is_finite() && self.gravity_px >= 0.0) {
            self.gravity_px = Self::default().gravity_px;
        }
        self.ui_chrome_height = self.ui_chrome_height.max(0.0);
        if !(self.timestep.is_finite() && self.timestep > 0.0) {
            self.timestep = Self::default().timestep;
        }
        self.max_substeps = self.max_substeps.max(1);
        self.mass = self.mass.validated(0.01);
        self.size = self.size.validated(1.0);

        let s = &mut self.surface;
        s.segments = s.segments.max(2);
        s.thickness = s.thickness.max(1.0);
        s.ground_thickness = s.ground_thickness.max(1.0);
        s.height_fraction = s.height_fraction.clamp(0.05, 0.95);
        s.rigid_width_fraction = s.rigid_width_fraction.clamp(0.05, 1.0);
        s.elastic_width_fraction = s.elastic_width_fraction.clamp(0.05, 1.0);
        s.segment_mass = s.segment_mass.max(0.01);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: SceneConfig =
            serde_json::from_str(r#"{ "planet": "moon", "surface": { "variant": "elastic" } }"#)
                .unwrap();
        assert_eq!(config.planet, Planet::Moon);
        assert_eq!(config.surface.variant, SurfaceVariant::Elastic);
        assert_eq!(config.surface.segments, 15);
        assert_eq!(config.shape, ShapeKind::Circle);
    }

    #[test]
    fn test_round_trip() {
        let config = SceneConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: SceneConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.size, config.size);
        assert_eq!(back.surface.variant, config.surface.variant);
    }

    #[test]
    fn test_validated_fixes_ranges() {
        let mut config = SceneConfig::default();
        config.size = SliderRange {
            min: 100.0,
            max: 10.0,
            default: 500.0,
        };
        config.surface.segments = 0;
        config.timestep = 0.0;
        let config = config.validated();
        assert!(config.size.min <= config.size.max);
        assert_eq!(config.size.default, config.size.max);
        assert_eq!(config.surface.segments, 2);
        assert!(config.timestep > 0.0);
    }

    #[test]
    fn test_slider_clamp_handles_nan() {
        let range = SceneConfig::default().mass;
        assert_eq!(range.clamp(f32::NAN), range.default);
        assert_eq!(range.clamp(1000.0), range.max);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let err = SceneConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read"));
    }
}
