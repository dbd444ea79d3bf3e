//! Viewer configuration
//!
//! Stored as RON. Missing fields fall back to the defaults below, so a
//! config file only needs the values it changes.

use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::coords::WorldWindow;
use crate::error::{ensure_finite, GraphicsError};
use crate::math::{Point2D, Vec3};
use crate::raster::{CircleAlgorithm, LineAlgorithm, HEIGHT, TRIG_STEP, WIDTH};
use crate::transform3d::{ObjectKind, Plane, Projection, DEFAULT_ZOOM};

/// Default location, relative to the working directory
pub const CONFIG_PATH: &str = "assets/cg-raster.ron";

/// Error type for config operations
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(ron::error::SpannedError),
    Serialize(ron::Error),
    Invalid(GraphicsError),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

impl From<GraphicsError> for ConfigError {
    fn from(e: GraphicsError) -> Self {
        ConfigError::Invalid(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Serialize(e) => write!(f, "Serialize error: {}", e),
            ConfigError::Invalid(e) => write!(f, "Invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parameters used by the 2D transform keys
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform2DKeys {
    pub translate: Point2D,
    pub scale: Point2D,
    /// Degrees, about the shape centroid
    pub rotate: f64,
    pub shear: Point2D,
    pub reflect_x: bool,
    pub reflect_y: bool,
}

impl Default for Transform2DKeys {
    fn default() -> Self {
        Self {
            translate: Point2D::new(10.0, 10.0),
            scale: Point2D::new(1.5, 1.5),
            rotate: 15.0,
            shear: Point2D::new(0.5, 0.0),
            reflect_x: false,
            reflect_y: true,
        }
    }
}

/// Parameters used by the 3D transform keys
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform3DKeys {
    pub translate: Vec3,
    pub scale: Vec3,
    /// Degrees added per X/Y/Z key press
    pub rotate: f64,
    /// (xy, xz, yz)
    pub shear: Vec3,
    pub reflect: Plane,
    /// Degrees per arrow key press on the view sliders
    pub view_step: f64,
    /// Percent per +/- press
    pub zoom_step: f64,
}

impl Default for Transform3DKeys {
    fn default() -> Self {
        Self {
            translate: Vec3::new(10.0, 10.0, 10.0),
            scale: Vec3::new(1.2, 1.2, 1.2),
            rotate: 15.0,
            shear: Vec3::new(0.3, 0.0, 0.0),
            reflect: Plane::XY,
            view_step: 10.0,
            zoom_step: 10.0,
        }
    }
}

/// Everything the viewer reads at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub canvas_width: usize,
    pub canvas_height: usize,
    /// Screen pixels per canvas pixel
    pub pixel_scale: f32,
    pub window: WorldWindow,
    pub line_algorithm: LineAlgorithm,
    pub circle_algorithm: CircleAlgorithm,
    /// Radians between trigonometric circle samples
    pub trig_step: f64,
    pub square_size: f64,
    pub object_kind: ObjectKind,
    pub object_size: f64,
    /// Percent
    pub zoom: f64,
    pub projection: Projection,
    /// Eye distance used when toggling to perspective
    pub perspective_distance: f64,
    pub keys_2d: Transform2DKeys,
    pub keys_3d: Transform3DKeys,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            canvas_width: WIDTH,
            canvas_height: HEIGHT,
            pixel_scale: 1.5,
            window: WorldWindow::default(),
            line_algorithm: LineAlgorithm::default(),
            circle_algorithm: CircleAlgorithm::default(),
            trig_step: TRIG_STEP,
            square_size: 50.0,
            object_kind: ObjectKind::default(),
            object_size: 100.0,
            zoom: DEFAULT_ZOOM,
            projection: Projection::default(),
            perspective_distance: 500.0,
            keys_2d: Transform2DKeys::default(),
            keys_3d: Transform3DKeys::default(),
        }
    }
}

fn ensure_positive(name: &str, value: f64) -> Result<(), GraphicsError> {
    if ensure_finite(name, value)? <= 0.0 {
        return Err(GraphicsError::InvalidInput(format!("{} must be positive, got {}", name, value)));
    }
    Ok(())
}

impl ViewerConfig {
    /// Reject values the sessions would refuse anyway
    pub fn validate(&self) -> Result<(), GraphicsError> {
        if self.canvas_width <= 1 || self.canvas_height <= 1 {
            return Err(GraphicsError::DivisionByZero);
        }
        self.window.validate()?;
        ensure_positive("pixel_scale", self.pixel_scale as f64)?;
        ensure_positive("trig_step", self.trig_step)?;
        ensure_positive("square_size", self.square_size)?;
        ensure_positive("object_size", self.object_size)?;
        ensure_positive("zoom", self.zoom)?;
        ensure_positive("perspective_distance", self.perspective_distance)?;
        if let Projection::Perspective { distance } = self.projection {
            ensure_positive("projection distance", distance)?;
        }
        Ok(())
    }
}

/// Load a config from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ViewerConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    load_config_from_str(&contents)
}

/// Load a config from a RON string
pub fn load_config_from_str(s: &str) -> Result<ViewerConfig, ConfigError> {
    let config: ViewerConfig = ron::from_str(s)?;
    config.validate()?;
    Ok(config)
}

/// Save a config to a RON file
pub fn save_config<P: AsRef<Path>>(config: &ViewerConfig, path: P) -> Result<(), ConfigError> {
    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(config, pretty)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Config from [`CONFIG_PATH`] if present, otherwise defaults
pub fn load_or_default() -> ViewerConfig {
    let path = Path::new(CONFIG_PATH);
    if !path.exists() {
        log::info!("no config at {}, using defaults", CONFIG_PATH);
        return ViewerConfig::default();
    }
    match load_config(path) {
        Ok(config) => {
            log::info!("loaded config from {}", CONFIG_PATH);
            config
        }
        Err(e) => {
            log::warn!("ignoring {}: {}", CONFIG_PATH, e);
            ViewerConfig::default()
        }
    }
}
