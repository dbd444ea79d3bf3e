//! Viewer state and demo management
//!
//! Fixed set of demos, each with its own persistent state. Switching demos
//! keeps everything alive; the canvas is redrawn from state every frame.

use cg_raster::config::ViewerConfig;
use cg_raster::coords::{flip_row, map_coordinates, CoordinateReadout, Quadrant};
use cg_raster::error::{GraphicsError, Result};
use cg_raster::raster::{
    Canvas, Circle, CircleAlgorithm, Color, LineAlgorithm, Pixel, PixelSink, Segment, TrigCircle,
};
use cg_raster::transform2d::{ShapeSession, Transform2D};
use cg_raster::transform3d::{Axis, ObjectInfo, ObjectKind, ObjectSession, Projection, Transform3D, Viewport};

/// The available demos (fixed set, one number key each)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Demo {
    Coordinates = 0,
    Lines = 1,
    Circles = 2,
    Transform2D = 3,
    Transform3D = 4,
}

impl Demo {
    pub const ALL: [Demo; 5] = [
        Demo::Coordinates,
        Demo::Lines,
        Demo::Circles,
        Demo::Transform2D,
        Demo::Transform3D,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Demo::Coordinates => "Coordinates",
            Demo::Lines => "Lines",
            Demo::Circles => "Circles",
            Demo::Transform2D => "2D Transforms",
            Demo::Transform3D => "3D Transforms",
        }
    }

    pub fn from_index(i: usize) -> Option<Demo> {
        Demo::ALL.get(i).copied()
    }
}

/// Transform requested from the keyboard; parameters come from the config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKey {
    Translate,
    Scale,
    /// 2D rotation about the shape centroid
    Rotate,
    /// 3D rotation about one axis
    RotateAxis(Axis),
    Shear,
    Reflect,
}

const AXIS_COLOR: Color = Color { r: 220, g: 220, b: 220, a: 255 };
const MARKER_COLOR: Color = Color::RED;

/// Main viewer state containing all demo states
pub struct AppState {
    pub demo: Demo,
    pub config: ViewerConfig,
    pub canvas: Canvas,

    pub line_algorithm: LineAlgorithm,
    pub circle_algorithm: CircleAlgorithm,
    pub object_kind: ObjectKind,

    /// First click of a two-click gesture, cartesian
    pub pending: Option<Pixel>,
    pub lines: Vec<(LineAlgorithm, Segment)>,
    pub circles: Vec<(CircleAlgorithm, Circle)>,
    pub readout: Option<CoordinateReadout>,

    pub shapes: ShapeSession,
    pub objects: ObjectSession,

    /// Status message with expiry time
    status_message: Option<(String, f64)>,
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Result<Self> {
        config.validate()?;
        let mut objects = ObjectSession::new();
        objects.set_zoom(config.zoom)?;
        objects.set_projection(config.projection)?;

        Ok(Self {
            demo: Demo::Coordinates,
            canvas: Canvas::new(config.canvas_width, config.canvas_height),
            line_algorithm: config.line_algorithm,
            circle_algorithm: config.circle_algorithm,
            object_kind: config.object_kind,
            pending: None,
            lines: Vec::new(),
            circles: Vec::new(),
            readout: None,
            shapes: ShapeSession::new(),
            objects,
            status_message: None,
            config,
        })
    }

    pub fn set_demo(&mut self, demo: Demo) {
        self.demo = demo;
        self.pending = None;
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.canvas.width, self.canvas.height)
    }

    /// Set a status message that displays for a duration
    pub fn set_status(&mut self, message: &str, duration_secs: f64) {
        let expiry = macroquad::time::get_time() + duration_secs;
        self.status_message = Some((message.to_string(), expiry));
    }

    /// Get current status message if not expired
    pub fn get_status(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, expiry)) if macroquad::time::get_time() < *expiry => Some(msg.as_str()),
            _ => None,
        }
    }

    /// Show the outcome of an action; failures are also logged
    pub fn report(&mut self, outcome: Result<String>) {
        match outcome {
            Ok(msg) if msg.is_empty() => {}
            Ok(msg) => self.set_status(&msg, 3.0),
            Err(e) => {
                log::warn!("{}: {}", self.demo.label(), e);
                self.set_status(&e.to_string(), 5.0);
            }
        }
    }

    /// Tab: next algorithm (next object template in 3D)
    pub fn cycle_algorithm(&mut self) -> String {
        match self.demo {
            Demo::Coordinates => String::new(),
            Demo::Lines | Demo::Transform2D => {
                self.line_algorithm = self.line_algorithm.next();
                format!("Line algorithm: {}", self.line_algorithm.label())
            }
            Demo::Circles => {
                self.circle_algorithm = self.circle_algorithm.next();
                format!("Circle algorithm: {}", self.circle_algorithm.label())
            }
            Demo::Transform3D => {
                self.object_kind = self.object_kind.next();
                format!("Object: {} (G to generate)", self.object_kind.label())
            }
        }
    }

    /// Canvas pixel (row 0 at the top) to cartesian (origin at the center, y up)
    fn to_cartesian(&mut self, raster: Pixel) -> Pixel {
        self.canvas.centered().from_device(raster)
    }

    /// Mouse click on the canvas, in canvas pixels
    pub fn click(&mut self, raster: Pixel) -> Result<String> {
        match self.demo {
            Demo::Coordinates => {
                let device = Pixel::new(raster.x, flip_row(raster.y, self.canvas.height));
                let readout =
                    map_coordinates(device.x, device.y, self.canvas.width, self.canvas.height, &self.config.window)?;
                self.readout = Some(readout);
                Ok(format!("World ({:.2}, {:.2})", readout.world.x, readout.world.y))
            }
            Demo::Lines => {
                let p = self.to_cartesian(raster);
                match self.pending.take() {
                    None => {
                        self.pending = Some(p);
                        Ok(format!("Start ({}, {}), click the end point", p.x, p.y))
                    }
                    Some(start) => {
                        self.lines.push((self.line_algorithm, Segment::new(start, p)));
                        log::debug!("line {:?} -> {:?} ({})", start, p, self.line_algorithm.label());
                        Ok(format!("Line ({}, {}) -> ({}, {})", start.x, start.y, p.x, p.y))
                    }
                }
            }
            Demo::Circles => {
                let p = self.to_cartesian(raster);
                match self.pending.take() {
                    None => {
                        self.pending = Some(p);
                        Ok(format!("Center ({}, {}), click a point on the rim", p.x, p.y))
                    }
                    Some(center) => {
                        let circle = Circle::through(center, p);
                        self.circles.push((self.circle_algorithm, circle));
                        log::debug!("circle {:?} ({})", circle, self.circle_algorithm.label());
                        Ok(format!("Circle at ({}, {}), radius {}", center.x, center.y, circle.radius))
                    }
                }
            }
            Demo::Transform2D | Demo::Transform3D => Ok(String::new()),
        }
    }

    /// C: clear the active demo
    pub fn clear(&mut self) -> String {
        self.pending = None;
        match self.demo {
            Demo::Coordinates => self.readout = None,
            Demo::Lines => self.lines.clear(),
            Demo::Circles => self.circles.clear(),
            Demo::Transform2D => self.shapes.clear(),
            Demo::Transform3D => self.objects.clear(),
        }
        format!("{} cleared", self.demo.label())
    }

    /// G: generate the square / object
    pub fn generate(&mut self) -> Result<String> {
        match self.demo {
            Demo::Transform2D => {
                let size = self.config.square_size;
                self.shapes.generate_square(size)?;
                Ok(format!("Square of side {}", size))
            }
            Demo::Transform3D => {
                self.objects.generate(self.object_kind, self.config.object_size)?;
                Ok(format!("{} of size {}", self.object_kind.label(), self.config.object_size))
            }
            _ => Ok(String::new()),
        }
    }

    pub fn apply_transform(&mut self, key: TransformKey) -> Result<String> {
        match self.demo {
            Demo::Transform2D => {
                let transform = self.transform_2d(key)?;
                self.shapes.apply(transform)?;
                Ok(transform.to_string())
            }
            Demo::Transform3D => {
                let transform = self.transform_3d(key)?;
                self.objects.apply(transform)?;
                Ok(transform.to_string())
            }
            _ => Ok(String::new()),
        }
    }

    fn transform_2d(&self, key: TransformKey) -> Result<Transform2D> {
        let keys = &self.config.keys_2d;
        let transform = match key {
            TransformKey::Translate => Transform2D::Translate { dx: keys.translate.x, dy: keys.translate.y },
            TransformKey::Scale => Transform2D::Scale { sx: keys.scale.x, sy: keys.scale.y },
            TransformKey::Rotate => {
                let shape = self.shapes.shape().ok_or(GraphicsError::NoShapePresent)?;
                Transform2D::Rotate { degrees: keys.rotate, center: shape.centroid() }
            }
            TransformKey::Shear => Transform2D::Shear { shx: keys.shear.x, shy: keys.shear.y },
            TransformKey::Reflect => Transform2D::Reflect { flip_x: keys.reflect_x, flip_y: keys.reflect_y },
            TransformKey::RotateAxis(_) => {
                return Err(GraphicsError::InvalidInput("axis rotation needs the 3D demo".to_string()))
            }
        };
        Ok(transform)
    }

    fn transform_3d(&self, key: TransformKey) -> Result<Transform3D> {
        let keys = &self.config.keys_3d;
        let transform = match key {
            TransformKey::Translate => Transform3D::Translate {
                tx: keys.translate.x,
                ty: keys.translate.y,
                tz: keys.translate.z,
            },
            TransformKey::Scale => Transform3D::Scale { sx: keys.scale.x, sy: keys.scale.y, sz: keys.scale.z },
            TransformKey::RotateAxis(axis) => Transform3D::Rotate { axis, degrees: keys.rotate },
            TransformKey::Shear => Transform3D::Shear { xy: keys.shear.x, xz: keys.shear.y, yz: keys.shear.z },
            TransformKey::Reflect => Transform3D::Reflect(keys.reflect),
            TransformKey::Rotate => {
                return Err(GraphicsError::InvalidInput("use X, Y or Z to rotate in 3D".to_string()))
            }
        };
        Ok(transform)
    }

    /// Arrow keys: nudge the X/Y view angles
    pub fn nudge_view(&mut self, dx_steps: f64, dy_steps: f64) -> Result<String> {
        let step = self.config.keys_3d.view_step;
        let r = self.objects.rotation();
        let (x, y) = (r.x + dx_steps * step, r.y + dy_steps * step);
        self.objects.set_view_rotation(x, y)?;
        Ok(format!("View rotation X: {}°, Y: {}°", x, y))
    }

    /// +/-: change zoom by whole steps, never below one step
    pub fn nudge_zoom(&mut self, steps: f64) -> Result<String> {
        let step = self.config.keys_3d.zoom_step;
        let zoom = (self.objects.zoom() + steps * step).max(step);
        self.objects.set_zoom(zoom)?;
        Ok(format!("Zoom {}%", zoom))
    }

    /// P: isometric <-> perspective
    pub fn toggle_projection(&mut self) -> Result<String> {
        let next = match self.objects.projection() {
            Projection::Isometric => Projection::Perspective { distance: self.config.perspective_distance },
            Projection::Perspective { .. } => Projection::Isometric,
        };
        self.objects.set_projection(next)?;
        Ok(format!("Projection: {}", next.label()))
    }

    /// Repaint the canvas from the active demo's state
    pub fn redraw(&mut self) -> Result<()> {
        self.canvas.clear(Color::WHITE);
        let viewport = self.viewport();
        let (half_w, half_h) = (self.canvas.width as i32 / 2, self.canvas.height as i32 / 2);

        if self.demo != Demo::Transform3D {
            let mut view = self.canvas.centered();
            view.draw_line(LineAlgorithm::Dda, Pixel::new(-half_w, 0), Pixel::new(half_w, 0), AXIS_COLOR);
            view.draw_line(LineAlgorithm::Dda, Pixel::new(0, -half_h), Pixel::new(0, half_h), AXIS_COLOR);
        }

        match self.demo {
            Demo::Coordinates => {
                if let Some(readout) = &self.readout {
                    self.canvas.fill_disc(readout.raster.x, readout.raster.y, 3, MARKER_COLOR);
                }
            }
            Demo::Lines => {
                let mut view = self.canvas.centered();
                for &(algorithm, segment) in &self.lines {
                    view.draw_segment(algorithm, segment, Color::INK);
                }
                if let Some(p) = self.pending {
                    view.plot(p, MARKER_COLOR);
                }
            }
            Demo::Circles => {
                let step = self.config.trig_step;
                let mut view = self.canvas.centered();
                for &(algorithm, circle) in &self.circles {
                    match algorithm {
                        CircleAlgorithm::Trigonometric => view.plot_all(TrigCircle::with_step(circle, step)?, Color::INK),
                        _ => view.draw_circle(algorithm, circle, Color::INK),
                    }
                }
                if let Some(p) = self.pending {
                    view.plot(p, MARKER_COLOR);
                }
            }
            Demo::Transform2D => {
                if self.shapes.shape().is_some() {
                    self.shapes.render(&mut self.canvas.centered(), self.line_algorithm, Color::INK)?;
                }
            }
            Demo::Transform3D => self.objects.render(&mut self.canvas, viewport),
        }
        Ok(())
    }

    /// Sidebar text for the active demo
    pub fn info_lines(&self) -> Vec<String> {
        let mut lines = vec![self.demo.label().to_string()];
        match self.demo {
            Demo::Coordinates => {
                let w = &self.config.window;
                lines.push(format!("Window X: [{}, {}]  Y: [{}, {}]", w.x_min, w.x_max, w.y_min, w.y_max));
                if let Some(r) = &self.readout {
                    lines.push(format!("Device: ({}, {})", r.device.x, r.device.y));
                    lines.push(format!("NDC: ({:.4}, {:.4})", r.ndc.x, r.ndc.y));
                    lines.push(format!("World: ({:.2}, {:.2})", r.world.x, r.world.y));
                    lines.push(format!("Centered NDC: ({:.4}, {:.4})", r.centered_ndc.x, r.centered_ndc.y));
                    lines.push(format!("Back to device: ({}, {})", r.raster.x, r.raster.y));
                }
            }
            Demo::Lines => {
                lines.push(format!("Algorithm: {}", self.line_algorithm.label()));
                lines.push(format!("Segments: {}", self.lines.len()));
            }
            Demo::Circles => {
                lines.push(format!("Algorithm: {}", self.circle_algorithm.label()));
                lines.push(format!("Circles: {}", self.circles.len()));
                if let Some(&(_, c)) = self.circles.last() {
                    let q = Quadrant::of(c.center.x, c.center.y);
                    lines.push(format!("Last center quadrant: {}", q.label()));
                }
            }
            Demo::Transform2D => {
                lines.push(format!("Algorithm: {}", self.line_algorithm.label()));
                if let Some(shape) = self.shapes.shape() {
                    for (i, p) in shape.points.iter().enumerate() {
                        lines.push(format!("P{}: ({:.1}, {:.1})", i + 1, p.x, p.y));
                    }
                }
                lines.extend(self.shapes.history.lines());
            }
            Demo::Transform3D => {
                let r = self.objects.rotation();
                lines.push(format!("Object: {}", self.object_kind.label()));
                lines.push(format!("Projection: {}  Zoom: {}%", self.objects.projection().label(), self.objects.zoom()));
                lines.push(format!("Rotation X: {}° Y: {}° Z: {}°", r.x, r.y, r.z));
                if let Some(info) = self.objects.info() {
                    let (c, d) = (info.centroid, info.dimensions);
                    lines.push(format!("Center: ({:.1}, {:.1}, {:.1})", c.x, c.y, c.z));
                    lines.push(format!("Size: {:.1} x {:.1} x {:.1}", d.x, d.y, d.z));
                    lines.push(octant_line(&info));
                }
                lines.extend(self.objects.history.lines());
            }
        }
        lines
    }
}

fn octant_line(info: &ObjectInfo) -> String {
    match info.octant {
        Some(n) => format!("Octant {}", n),
        None => "Octant undetermined".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> AppState {
        AppState::new(ViewerConfig::default()).unwrap()
    }

    #[test]
    fn test_demo_from_index() {
        assert_eq!(Demo::from_index(4), Some(Demo::Transform3D));
        assert_eq!(Demo::from_index(5), None);
    }

    #[test]
    fn test_line_needs_two_clicks() {
        let mut app = app();
        app.set_demo(Demo::Lines);
        app.click(Pixel::new(250, 250)).unwrap();
        assert!(app.lines.is_empty());
        app.click(Pixel::new(260, 240)).unwrap();
        assert_eq!(app.lines, vec![(LineAlgorithm::Dda, Segment::new(Pixel::new(0, 0), Pixel::new(10, 10)))]);
        assert!(app.pending.is_none());

        app.redraw().unwrap();
        assert_eq!(app.canvas.get_pixel(255, 245), Color::INK);
    }

    #[test]
    fn test_circle_from_center_and_rim() {
        let mut app = app();
        app.set_demo(Demo::Circles);
        app.click(Pixel::new(250, 250)).unwrap();
        app.click(Pixel::new(270, 250)).unwrap();
        assert_eq!(app.circles[0].1, Circle::new(Pixel::new(0, 0), 20));

        app.redraw().unwrap();
        assert_eq!(app.canvas.get_pixel(270, 250), Color::INK);
    }

    #[test]
    fn test_coordinate_click_round_trips() {
        let mut app = app();
        app.click(Pixel::new(100, 400)).unwrap();
        let readout = app.readout.unwrap();
        assert_eq!(readout.device, Pixel::new(100, 99));
        assert_eq!(readout.raster, Pixel::new(100, 400));
    }

    #[test]
    fn test_transform_keys_need_a_shape() {
        let mut app = app();
        app.set_demo(Demo::Transform2D);
        assert_eq!(app.apply_transform(TransformKey::Rotate), Err(GraphicsError::NoShapePresent));

        app.generate().unwrap();
        app.apply_transform(TransformKey::Translate).unwrap();
        app.apply_transform(TransformKey::Rotate).unwrap();
        assert_eq!(app.shapes.history.len(), 2);
        assert!(app.redraw().is_ok());
    }

    #[test]
    fn test_3d_controls() {
        let mut app = app();
        app.set_demo(Demo::Transform3D);
        app.generate().unwrap();
        app.apply_transform(TransformKey::RotateAxis(Axis::Y)).unwrap();
        assert_eq!(app.objects.rotation().y, app.config.keys_3d.rotate);

        app.nudge_zoom(-100.0).unwrap();
        assert_eq!(app.objects.zoom(), app.config.keys_3d.zoom_step);

        app.toggle_projection().unwrap();
        assert!(matches!(app.objects.projection(), Projection::Perspective { .. }));
        assert!(app.redraw().is_ok());
        assert!(app.info_lines().iter().any(|l| l.starts_with("Octant")));
    }
}
