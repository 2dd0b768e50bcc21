use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or validating a viewer configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Window creation and presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Pyramid".into(),
            width: 650,
            height: 480,
            vsync: true,
        }
    }
}

/// Per-frame render settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// RGBA clear color.
    pub clear_color: [f32; 4],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.81, 0.81, 0.80, 1.0],
        }
    }
}

/// Initial camera placement and projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 1.0, 1.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_degrees: 90.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Mouse controller tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Radians of rotation per pixel of cursor motion.
    pub rotation_scale: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            rotation_scale: 0.02,
        }
    }
}

/// Top-level viewer configuration. Every section is optional in the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub render: RenderConfig,
    pub camera: CameraConfig,
    pub controller: ControllerConfig,
}

impl ViewerConfig {
    /// Load a configuration file, picking the format from its extension
    /// (`.yaml`/`.yml` or `.json`). The result is validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let data = std::fs::read_to_string(path)?;
        let config: Self = match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&data)?,
            "json" => serde_json::from_str(&data)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        config.validate()?;

        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values that would produce a degenerate window or camera.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.window.width == 0 || self.window.height == 0 {
            return invalid("window size must be non-zero");
        }

        let cam = &self.camera;
        if !(cam.eye.is_finite() && cam.target.is_finite() && cam.up.is_finite()) {
            return invalid("camera vectors must be finite");
        }
        if !(cam.fov_degrees.is_finite() && cam.near.is_finite() && cam.far.is_finite()) {
            return invalid("camera projection values must be finite");
        }
        if !(cam.fov_degrees > 0.0 && cam.fov_degrees < 180.0) {
            return invalid("fov_degrees must be in (0, 180)");
        }
        if cam.near <= 0.0 {
            return invalid("near plane must be positive");
        }
        if cam.far <= cam.near {
            return invalid("far plane must be beyond the near plane");
        }
        let dir = cam.target - cam.eye;
        if dir.length_squared() <= f32::EPSILON {
            return invalid("camera eye and target must differ");
        }
        if dir.normalize().cross(cam.up).length_squared() <= f32::EPSILON {
            return invalid("camera up must not be parallel to the view direction");
        }

        let scale = self.controller.rotation_scale;
        if !scale.is_finite() || scale <= 0.0 {
            return invalid("rotation_scale must be positive");
        }
        Ok(())
    }
}
