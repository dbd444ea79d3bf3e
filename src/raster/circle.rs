//! Circle rasterization: explicit equation, trigonometric sampling, midpoint

use std::f64::consts::TAU;
use serde::{Deserialize, Serialize};
use crate::error::{GraphicsError, Result};
use super::types::{Circle, Pixel};

/// Angular step (radians) of the trigonometric rasterizer
pub const TRIG_STEP: f64 = 0.1;

/// Which circle algorithm to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CircleAlgorithm {
    Explicit,
    Trigonometric,
    #[default]
    Midpoint,
}

impl CircleAlgorithm {
    pub const ALL: [CircleAlgorithm; 3] = [
        CircleAlgorithm::Explicit,
        CircleAlgorithm::Trigonometric,
        CircleAlgorithm::Midpoint,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CircleAlgorithm::Explicit => "Explicit equation",
            CircleAlgorithm::Trigonometric => "Trigonometric",
            CircleAlgorithm::Midpoint => "Midpoint",
        }
    }

    pub fn next(self) -> Self {
        match self {
            CircleAlgorithm::Explicit => CircleAlgorithm::Trigonometric,
            CircleAlgorithm::Trigonometric => CircleAlgorithm::Midpoint,
            CircleAlgorithm::Midpoint => CircleAlgorithm::Explicit,
        }
    }
}

/// Rasterize a circle with the chosen algorithm (trigonometric uses [`TRIG_STEP`])
pub fn rasterize_circle(algorithm: CircleAlgorithm, circle: Circle) -> CirclePixels {
    match algorithm {
        CircleAlgorithm::Explicit => CirclePixels::Explicit(ExplicitCircle::new(circle)),
        CircleAlgorithm::Trigonometric => CirclePixels::Trigonometric(TrigCircle::new(circle)),
        CircleAlgorithm::Midpoint => CirclePixels::Midpoint(MidpointCircle::new(circle)),
    }
}

/// Pixel sequence produced by any circle algorithm
#[derive(Debug, Clone)]
pub enum CirclePixels {
    Explicit(ExplicitCircle),
    Trigonometric(TrigCircle),
    Midpoint(MidpointCircle),
}

impl Iterator for CirclePixels {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        match self {
            CirclePixels::Explicit(c) => c.next(),
            CirclePixels::Trigonometric(c) => c.next(),
            CirclePixels::Midpoint(c) => c.next(),
        }
    }
}

// ============================================================================
// Explicit equation
// ============================================================================

/// `y = round(sqrt(r² - x²))` for every integer x in [-r, r], emitted with its
/// vertical mirror. Sparse near the left/right extremes, doubled at y = 0.
#[derive(Debug, Clone)]
pub struct ExplicitCircle {
    center: Pixel,
    radius: i64,
    x: i64,
    mirror: Option<Pixel>,
}

impl ExplicitCircle {
    pub fn new(circle: Circle) -> Self {
        let radius = circle.radius as i64;
        Self {
            center: circle.center,
            radius,
            x: -radius,
            mirror: None,
        }
    }
}

impl Iterator for ExplicitCircle {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        if let Some(p) = self.mirror.take() {
            return Some(p);
        }
        if self.x > self.radius {
            return None;
        }

        let x = self.x;
        let y = ((self.radius * self.radius - x * x) as f64).sqrt().round() as i32;
        self.x += 1;

        let px = self.center.x + x as i32;
        self.mirror = Some(Pixel::new(px, self.center.y - y));
        Some(Pixel::new(px, self.center.y + y))
    }
}

// ============================================================================
// Trigonometric
// ============================================================================

/// Samples `(r cos θ, r sin θ)` at a fixed angular step over [0, 2π).
/// The step does not adapt to the radius.
#[derive(Debug, Clone)]
pub struct TrigCircle {
    cx: f64,
    cy: f64,
    radius: f64,
    theta: f64,
    step: f64,
}

impl TrigCircle {
    pub fn new(circle: Circle) -> Self {
        Self {
            cx: circle.center.x as f64,
            cy: circle.center.y as f64,
            radius: circle.radius as f64,
            theta: 0.0,
            step: TRIG_STEP,
        }
    }

    /// Same sampler with a custom angular step (radians, > 0)
    pub fn with_step(circle: Circle, step: f64) -> Result<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(GraphicsError::InvalidInput(format!(
                "angular step must be a positive number, got {}",
                step
            )));
        }
        Ok(Self { step, ..Self::new(circle) })
    }
}

impl Iterator for TrigCircle {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        if self.theta >= TAU {
            return None;
        }
        let (sin, cos) = self.theta.sin_cos();
        let p = Pixel::new(
            (self.cx + self.radius * cos).round() as i32,
            (self.cy + self.radius * sin).round() as i32,
        );
        self.theta += self.step;
        Some(p)
    }
}

// ============================================================================
// Midpoint
// ============================================================================

/// Second-order midpoint circle with 8-way symmetry.
///
/// Decision variable starts at `p = 1 - r` from `(0, r)`; while `x <= y`:
/// `p < 0` adds `2x + 3`, otherwise adds `2(x - y) + 5` and steps y down.
#[derive(Debug, Clone)]
pub struct MidpointCircle {
    center: Pixel,
    x: i32,
    y: i32,
    p: i32,
    octet: [Pixel; 8],
    idx: usize,
}

impl MidpointCircle {
    pub fn new(circle: Circle) -> Self {
        let r = circle.radius as i32;
        Self {
            center: circle.center,
            x: 0,
            y: r,
            p: 1 - r,
            octet: [Pixel::default(); 8],
            idx: 8,
        }
    }
}

/// The eight reflections of (x, y) around `c`
fn symmetric_points(c: Pixel, x: i32, y: i32) -> [Pixel; 8] {
    [
        c.offset(x, y),
        c.offset(-x, y),
        c.offset(x, -y),
        c.offset(-x, -y),
        c.offset(y, x),
        c.offset(-y, x),
        c.offset(y, -x),
        c.offset(-y, -x),
    ]
}

impl Iterator for MidpointCircle {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        if self.idx == self.octet.len() {
            if self.x > self.y {
                return None;
            }
            self.octet = symmetric_points(self.center, self.x, self.y);
            self.idx = 0;

            if self.p < 0 {
                self.p += 2 * self.x + 3;
            } else {
                self.p += 2 * (self.x - self.y) + 5;
                self.y -= 1;
            }
            self.x += 1;
        }

        let p = self.octet[self.idx];
        self.idx += 1;
        Some(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(cx: i32, cy: i32, r: u32) -> Circle {
        Circle::new(Pixel::new(cx, cy), r)
    }

    #[test]
    fn test_midpoint_radius_five() {
        let pts: Vec<Pixel> = rasterize_circle(CircleAlgorithm::Midpoint, circle(0, 0, 5)).collect();
        for p in [Pixel::new(5, 0), Pixel::new(0, 5), Pixel::new(-5, 0), Pixel::new(0, -5)] {
            assert!(pts.contains(&p), "missing {:?}", p);
        }
        for p in &pts {
            assert!((p.x * p.x + p.y * p.y - 25).abs() <= 10, "{:?} too far from the circle", p);
        }
        // four decision steps, eight points each
        assert_eq!(pts.len(), 32);
        let first_octant: Vec<Pixel> = pts.iter().step_by(8).copied().collect();
        assert_eq!(
            first_octant,
            vec![Pixel::new(0, 5), Pixel::new(1, 5), Pixel::new(2, 5), Pixel::new(3, 4)]
        );
    }

    #[test]
    fn test_midpoint_first_octet_order() {
        let pts: Vec<Pixel> = MidpointCircle::new(circle(10, 20, 3)).take(8).collect();
        assert_eq!(pts[0], Pixel::new(10, 23));
        assert_eq!(pts[2], Pixel::new(10, 17));
        assert_eq!(pts[4], Pixel::new(13, 20));
        assert_eq!(pts[7], Pixel::new(7, 20));
    }

    #[test]
    fn test_midpoint_is_symmetric_about_center() {
        let c = Pixel::new(-4, 7);
        let pts: Vec<Pixel> = MidpointCircle::new(Circle::new(c, 12)).collect();
        for p in &pts {
            let (dx, dy) = (p.x - c.x, p.y - c.y);
            assert!(pts.contains(&c.offset(-dx, dy)));
            assert!(pts.contains(&c.offset(dy, dx)));
        }
    }

    #[test]
    fn test_midpoint_zero_radius_collapses_to_center() {
        let pts: Vec<Pixel> = MidpointCircle::new(circle(3, 3, 0)).collect();
        assert_eq!(pts.len(), 8);
        assert!(pts.iter().all(|p| *p == Pixel::new(3, 3)));
    }

    #[test]
    fn test_explicit_emits_mirrored_pairs() {
        let pts: Vec<Pixel> = rasterize_circle(CircleAlgorithm::Explicit, circle(0, 0, 4)).collect();
        assert_eq!(pts.len(), 2 * (2 * 4 + 1));
        assert_eq!(pts[0], Pixel::new(-4, 0));
        assert_eq!(pts[1], Pixel::new(-4, 0));
        for pair in pts.chunks(2) {
            assert_eq!(pair[0].x, pair[1].x);
            assert_eq!(pair[0].y, -pair[1].y);
        }
        assert!(pts.contains(&Pixel::new(0, 4)));
    }

    #[test]
    fn test_trig_default_step_sample_count() {
        let pts: Vec<Pixel> = rasterize_circle(CircleAlgorithm::Trigonometric, circle(0, 0, 50)).collect();
        assert_eq!(pts.len(), 63);
        assert_eq!(pts[0], Pixel::new(50, 0));
        for p in &pts {
            let d = ((p.x * p.x + p.y * p.y) as f64).sqrt();
            assert!((d - 50.0).abs() <= 1.0);
        }
    }

    #[test]
    fn test_trig_custom_step() {
        let c = circle(5, 5, 10);
        // one radian per sample: θ = 0..=6
        let coarse = TrigCircle::with_step(c, 1.0).unwrap();
        let pts: Vec<Pixel> = coarse.collect();
        assert_eq!(pts.len(), 7);
        assert_eq!(pts[0], Pixel::new(15, 5));
        assert_eq!(pts[1], Pixel::new(10, 13));

        assert!(TrigCircle::with_step(c, 0.0).is_err());
        assert!(TrigCircle::with_step(c, f64::NAN).is_err());
    }

    #[test]
    fn test_all_algorithms_hit_the_extremes() {
        for algorithm in CircleAlgorithm::ALL {
            let pts: Vec<Pixel> = rasterize_circle(algorithm, circle(0, 0, 20)).collect();
            assert!(pts.contains(&Pixel::new(20, 0)), "{:?}", algorithm);
            assert!(pts.contains(&Pixel::new(0, 20)) || algorithm == CircleAlgorithm::Trigonometric);
        }
    }
}
