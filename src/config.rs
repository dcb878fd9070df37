use crate::activity::PALETTE;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a JSON config file for the CLI.
pub const CONFIG_ENV_VAR: &str = "WATCH_PLANNER_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Dimensions of the watch face in SVG user units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceGeometry {
    pub width: f64,
    pub height: f64,
    pub center_x: f64,
    pub center_y: f64,
    /// Outer edge of the activity ring.
    pub outer_radius: f64,
    /// Inner edge of the activity ring.
    pub inner_radius: f64,
    pub rim_radius: f64,
    pub disc_radius: f64,
    pub tick_outer_radius: f64,
    pub tick_inner_radius: f64,
    pub hour_label_radius: f64,
    pub label_radius: f64,
    /// Total angular spread, in radians, used to fan out activity labels.
    pub label_fan: f64,
}

impl Default for FaceGeometry {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 400.0,
            center_x: 200.0,
            center_y: 200.0,
            outer_radius: 180.0,
            inner_radius: 140.0,
            rim_radius: 190.0,
            disc_radius: 135.0,
            tick_outer_radius: 185.0,
            tick_inner_radius: 175.0,
            hour_label_radius: 195.0,
            label_radius: 215.0,
            label_fan: 0.35,
        }
    }
}

impl FaceGeometry {
    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let radii = [
            ("outer_radius", self.outer_radius),
            ("inner_radius", self.inner_radius),
            ("label_radius", self.label_radius),
        ];
        for (name, value) in radii {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive number (got {value})"
                )));
            }
        }
        if self.inner_radius >= self.outer_radius {
            return Err(ConfigError::Invalid(format!(
                "inner_radius {} must be smaller than outer_radius {}",
                self.inner_radius, self.outer_radius
            )));
        }
        if !self.label_fan.is_finite() || self.label_fan < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "label_fan must be a non-negative number (got {})",
                self.label_fan
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub face: FaceGeometry,
    pub palette: Vec<String>,
    /// Directory exports are written to when the command gives none.
    pub export_dir: PathBuf,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            face: FaceGeometry::default(),
            palette: PALETTE.iter().map(|c| c.to_string()).collect(),
            export_dir: PathBuf::from("."),
        }
    }
}

impl PlannerConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], or the defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::load(PathBuf::from(path)),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.face.validate()?;
        if self.palette.is_empty() {
            return Err(ConfigError::Invalid("palette must not be empty".into()));
        }
        Ok(())
    }
}
