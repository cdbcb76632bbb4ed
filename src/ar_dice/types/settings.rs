//! Application settings types and persistence
//!
//! Settings are stored as pretty-printed JSON. Every field has a default so a
//! partial file (or no file at all) still yields a complete configuration.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use super::die::RollConfig;
use super::session::ShakeConfig;
use crate::ar_dice::tracking::{PlaneDetection, SessionConfig, SimulatedPlane};

/// Simple serializable RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorSetting {
    #[serde(default)]
    pub a: f32,
    #[serde(default)]
    pub r: f32,
    #[serde(default)]
    pub g: f32,
    #[serde(default)]
    pub b: f32,
}

impl ColorSetting {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { a, r, g, b }
    }

    pub fn to_color(&self) -> Color {
        Color::srgba(self.r, self.g, self.b, self.a)
    }

    /// 8-bit sRGB channels in RGBA order.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b), channel(self.a)]
    }
}

/// Plane detection setting
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlaneDetectionSetting {
    #[default]
    #[serde(rename = "horizontal")]
    Horizontal,
    #[serde(rename = "vertical")]
    Vertical,
    #[serde(rename = "both")]
    Both,
}

impl PlaneDetectionSetting {
    pub fn to_runtime(self) -> PlaneDetection {
        match self {
            PlaneDetectionSetting::Horizontal => PlaneDetection::Horizontal,
            PlaneDetectionSetting::Vertical => PlaneDetection::Vertical,
            PlaneDetectionSetting::Both => PlaneDetection::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DieSetting {
    /// Edge length of the built-in cube die, in meters.
    #[serde(default = "default_die_edge")]
    pub edge: f32,

    /// glTF file to use instead of the built-in cube (path relative to the asset folder).
    #[serde(default)]
    pub asset: Option<String>,

    /// Bounding radius override. Required to rest a custom asset correctly;
    /// defaults to the cube's bounding sphere.
    #[serde(default)]
    pub bounding_radius: Option<f32>,

    #[serde(default = "default_die_color")]
    pub color: ColorSetting,
}

fn default_die_edge() -> f32 {
    0.1
}

fn default_die_color() -> ColorSetting {
    ColorSetting::rgba(0.85, 0.1, 0.1, 1.0)
}

impl Default for DieSetting {
    fn default() -> Self {
        Self {
            edge: default_die_edge(),
            asset: None,
            bounding_radius: None,
            color: default_die_color(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollSetting {
    #[serde(default = "default_spin_multiplier")]
    pub spin_multiplier: u32,

    #[serde(default = "default_roll_duration")]
    pub duration_secs: f32,

    /// Fixed seed for reproducible rolls; random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_spin_multiplier() -> u32 {
    RollConfig::default().spin_multiplier
}
fn default_roll_duration() -> f32 {
    RollConfig::default().duration_secs
}

impl Default for RollSetting {
    fn default() -> Self {
        Self {
            spin_multiplier: default_spin_multiplier(),
            duration_secs: default_roll_duration(),
            seed: None,
        }
    }
}

impl RollSetting {
    pub fn to_runtime(&self) -> RollConfig {
        RollConfig {
            spin_multiplier: self.spin_multiplier.max(1),
            duration_secs: self.duration_secs.max(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShakeSetting {
    #[serde(default = "default_shake_reversals")]
    pub reversals: u32,
    #[serde(default = "default_shake_window")]
    pub window_secs: f32,
    #[serde(default = "default_shake_min_speed")]
    pub min_speed: f32,
}

fn default_shake_reversals() -> u32 {
    ShakeConfig::default().reversals
}
fn default_shake_window() -> f32 {
    ShakeConfig::default().window_secs
}
fn default_shake_min_speed() -> f32 {
    ShakeConfig::default().min_speed
}

impl Default for ShakeSetting {
    fn default() -> Self {
        Self::from_runtime(&ShakeConfig::default())
    }
}

impl ShakeSetting {
    pub fn from_runtime(cfg: &ShakeConfig) -> Self {
        Self {
            reversals: cfg.reversals,
            window_secs: cfg.window_secs,
            min_speed: cfg.min_speed,
        }
    }

    pub fn to_runtime(&self) -> ShakeConfig {
        ShakeConfig {
            reversals: self.reversals.max(1),
            window_secs: self.window_secs,
            min_speed: self.min_speed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSetting {
    /// Grid cells along each side of the texture.
    #[serde(default = "default_grid_cells")]
    pub cells: u32,
    /// Texture width and height in pixels.
    #[serde(default = "default_grid_resolution")]
    pub resolution: u32,
    #[serde(default = "default_grid_line_color")]
    pub line_color: ColorSetting,
    #[serde(default = "default_grid_fill_color")]
    pub fill_color: ColorSetting,
}

fn default_grid_cells() -> u32 {
    8
}
fn default_grid_resolution() -> u32 {
    256
}
fn default_grid_line_color() -> ColorSetting {
    ColorSetting::rgba(1.0, 1.0, 1.0, 0.9)
}
fn default_grid_fill_color() -> ColorSetting {
    ColorSetting::rgba(0.2, 0.6, 1.0, 0.25)
}

impl Default for GridSetting {
    fn default() -> Self {
        Self {
            cells: default_grid_cells(),
            resolution: default_grid_resolution(),
            line_color: default_grid_line_color(),
            fill_color: default_grid_fill_color(),
        }
    }
}

/// A surface the simulated tracker will report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedPlaneSetting {
    pub center: [f32; 3],
    pub extent: [f32; 2],
    #[serde(default)]
    pub yaw_degrees: f32,
    #[serde(default)]
    pub detect_after_secs: f32,
}

impl SimulatedPlaneSetting {
    pub fn to_runtime(&self) -> SimulatedPlane {
        SimulatedPlane {
            center: Vec3::from_array(self.center),
            yaw: self.yaw_degrees.to_radians(),
            extent: Vec2::from_array(self.extent).max(Vec2::ZERO),
            detect_after: Duration::try_from_secs_f32(self.detect_after_secs.max(0.0))
                .unwrap_or(Duration::MAX),
        }
    }
}

fn default_simulated_planes() -> Vec<SimulatedPlaneSetting> {
    vec![
        // Table top in front of the viewer.
        SimulatedPlaneSetting {
            center: [0.0, -0.6, -1.2],
            extent: [1.2, 0.8],
            yaw_degrees: 0.0,
            detect_after_secs: 1.5,
        },
        // Floor further away, found a little later.
        SimulatedPlaneSetting {
            center: [0.6, -1.4, -2.6],
            extent: [3.0, 2.0],
            yaw_degrees: 15.0,
            detect_after_secs: 4.0,
        },
    ]
}

/// Persistent application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub plane_detection: PlaneDetectionSetting,

    #[serde(default)]
    pub die: DieSetting,

    #[serde(default)]
    pub roll: RollSetting,

    #[serde(default)]
    pub shake: ShakeSetting,

    #[serde(default)]
    pub grid: GridSetting,

    #[serde(default = "default_simulated_planes")]
    pub simulated_planes: Vec<SimulatedPlaneSetting>,

    /// Draw the tracker's feature points while surfaces are being detected.
    #[serde(default = "default_show_feature_points")]
    pub show_feature_points: bool,
}

fn default_show_feature_points() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            plane_detection: PlaneDetectionSetting::default(),
            die: DieSetting::default(),
            roll: RollSetting::default(),
            shake: ShakeSetting::default(),
            grid: GridSetting::default(),
            simulated_planes: default_simulated_planes(),
            show_feature_points: default_show_feature_points(),
        }
    }
}

impl AppSettings {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid settings JSON: {e}"))
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to serialize settings: {e}"))
    }

    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let json = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults when the file is absent or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings file at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load_from_file(path) {
            Ok(settings) => {
                info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                warn!("{err}; using default settings");
                Self::default()
            }
        }
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), String> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
            }
        }
        fs::write(path, json).map_err(|e| format!("Failed to write {}: {e}", path.display()))
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            plane_detection: self.plane_detection.to_runtime(),
        }
    }

    pub fn simulated_planes(&self) -> Vec<SimulatedPlane> {
        self.simulated_planes
            .iter()
            .map(SimulatedPlaneSetting::to_runtime)
            .collect()
    }

    /// Bounding radius used to rest dice on planes.
    pub fn die_bounding_radius(&self) -> f32 {
        self.die
            .bounding_radius
            .unwrap_or_else(|| super::die::DieTemplate::cube_bounding_radius(self.die.edge))
    }
}

/// Settings the running app was started with
#[derive(Resource, Clone, Debug, Default)]
pub struct ActiveSettings(pub AppSettings);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_yields_defaults() {
        let settings = AppSettings::from_json("{}").expect("parse empty object");
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_partial_sections_fill_missing_fields() {
        let settings =
            AppSettings::from_json(r#"{ "roll": { "seed": 12 }, "die": { "edge": 0.2 } }"#)
                .expect("parse partial settings");
        assert_eq!(settings.roll.seed, Some(12));
        assert_eq!(settings.roll.spin_multiplier, 5);
        assert_eq!(settings.roll.duration_secs, 1.0);
        assert_eq!(settings.die.edge, 0.2);
        assert!(settings.die.asset.is_none());
        assert_eq!(settings.simulated_planes.len(), 2);
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = AppSettings::default();
        settings.plane_detection = PlaneDetectionSetting::Both;
        settings.die.asset = Some("models/die.glb".to_string());
        settings.die.bounding_radius = Some(0.05);
        settings.simulated_planes.truncate(1);

        let json = settings.to_json().expect("serialize");
        assert!(json.contains("\"both\""));
        assert_eq!(AppSettings::from_json(&json).expect("parse"), settings);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = AppSettings::from_json("{ not json").unwrap_err();
        assert!(err.starts_with("Invalid settings JSON"));
    }

    #[test]
    fn test_die_bounding_radius_override() {
        let mut settings = AppSettings::default();
        let cube = settings.die_bounding_radius();
        assert!((cube - 0.1 * 3.0_f32.sqrt() / 2.0).abs() < 1e-6);

        settings.die.bounding_radius = Some(0.05);
        assert_eq!(settings.die_bounding_radius(), 0.05);
    }

    #[test]
    fn test_simulated_plane_conversion() {
        let plane = SimulatedPlaneSetting {
            center: [1.0, 2.0, 3.0],
            extent: [0.5, -1.0],
            yaw_degrees: 90.0,
            detect_after_secs: -2.0,
        }
        .to_runtime();
        assert_eq!(plane.center, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(plane.extent, Vec2::new(0.5, 0.0));
        assert!((plane.yaw - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(plane.detect_after, Duration::ZERO);
    }

    #[test]
    fn test_huge_detection_delay_saturates() {
        let plane = SimulatedPlaneSetting {
            center: [0.0; 3],
            extent: [1.0, 1.0],
            yaw_degrees: 0.0,
            detect_after_secs: f32::MAX,
        }
        .to_runtime();
        assert_eq!(plane.detect_after, Duration::MAX);
    }

    #[test]
    fn test_color_to_rgba8() {
        assert_eq!(
            ColorSetting::rgba(1.0, 0.0, 2.0, 0.5).to_rgba8(),
            [255, 0, 255, 128]
        );
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("ardice-settings-{}", std::process::id()));
        let path = dir.join("settings.json");

        let mut settings = AppSettings::default();
        settings.roll.seed = Some(3);
        settings.save_to_file(&path).expect("save settings");

        let loaded = AppSettings::load_from_file(&path).expect("load settings");
        assert_eq!(loaded, settings);

        let _ = fs::remove_dir_all(&dir);
    }
}
