//! Line rasterization: DDA and midpoint (Bresenham)
//!
//! Both algorithms are lazy iterators over [`Pixel`]s. Calling
//! [`rasterize_line`] again with the same endpoints restarts the sequence.

use serde::{Deserialize, Serialize};
use super::types::{Pixel, Segment};

/// Which line algorithm to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineAlgorithm {
    #[default]
    Dda,
    Midpoint,
}

impl LineAlgorithm {
    pub const ALL: [LineAlgorithm; 2] = [LineAlgorithm::Dda, LineAlgorithm::Midpoint];

    pub fn label(&self) -> &'static str {
        match self {
            LineAlgorithm::Dda => "DDA",
            LineAlgorithm::Midpoint => "Midpoint",
        }
    }

    pub fn next(self) -> Self {
        match self {
            LineAlgorithm::Dda => LineAlgorithm::Midpoint,
            LineAlgorithm::Midpoint => LineAlgorithm::Dda,
        }
    }
}

/// Rasterize the segment p1 -> p2 with the chosen algorithm
pub fn rasterize_line(algorithm: LineAlgorithm, p1: Pixel, p2: Pixel) -> LinePixels {
    match algorithm {
        LineAlgorithm::Dda => LinePixels::Dda(DdaLine::new(p1, p2)),
        LineAlgorithm::Midpoint => LinePixels::Midpoint(MidpointLine::new(p1, p2)),
    }
}

/// Rasterize a segment in any direction.
///
/// DDA handles every direction natively. For the midpoint algorithm the
/// segment is reflected into the first quadrant by negating the decreasing
/// axes, rasterized there and reflected back, so the output still starts at
/// `p1`.
pub fn rasterize_segment(algorithm: LineAlgorithm, segment: Segment) -> impl Iterator<Item = Pixel> {
    let Segment { p1, p2 } = segment;
    let (sx, sy) = match algorithm {
        LineAlgorithm::Dda => (1, 1),
        LineAlgorithm::Midpoint => (
            if p2.x < p1.x { -1 } else { 1 },
            if p2.y < p1.y { -1 } else { 1 },
        ),
    };
    // i32::MIN has no negation; it saturates one pixel short
    let reflect = move |p: Pixel| Pixel::new(p.x.saturating_mul(sx), p.y.saturating_mul(sy));
    rasterize_line(algorithm, reflect(p1), reflect(p2)).map(reflect)
}

/// Pixel sequence produced by either line algorithm
#[derive(Debug, Clone)]
pub enum LinePixels {
    Dda(DdaLine),
    Midpoint(MidpointLine),
}

impl Iterator for LinePixels {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        match self {
            LinePixels::Dda(line) => line.next(),
            LinePixels::Midpoint(line) => line.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            LinePixels::Dda(line) => line.size_hint(),
            LinePixels::Midpoint(line) => line.size_hint(),
        }
    }
}

// ============================================================================
// DDA
// ============================================================================

/// Digital differential analyzer.
///
/// Walks `steps = max(|dx|, |dy|)` increments of `(dx/steps, dy/steps)` and
/// rounds every position with `f64::round` (half away from zero). Emits
/// `steps + 1` pixels, both endpoints included; a degenerate segment emits
/// its single point.
#[derive(Debug, Clone)]
pub struct DdaLine {
    x: f64,
    y: f64,
    x_inc: f64,
    y_inc: f64,
    remaining: usize,
}

impl DdaLine {
    pub fn new(p1: Pixel, p2: Pixel) -> Self {
        let dx = p2.x as f64 - p1.x as f64;
        let dy = p2.y as f64 - p1.y as f64;
        let steps = dx.abs().max(dy.abs());

        let (x_inc, y_inc) = if steps == 0.0 {
            (0.0, 0.0)
        } else {
            (dx / steps, dy / steps)
        };

        Self {
            x: p1.x as f64,
            y: p1.y as f64,
            x_inc,
            y_inc,
            remaining: steps as usize + 1,
        }
    }
}

impl Iterator for DdaLine {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        if self.remaining == 0 {
            return None;
        }
        let pixel = Pixel::new(self.x.round() as i32, self.y.round() as i32);
        self.x += self.x_inc;
        self.y += self.y_inc;
        self.remaining -= 1;
        Some(pixel)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for DdaLine {}

// ============================================================================
// Midpoint
// ============================================================================

/// Integer midpoint line for the first two octants.
///
/// Precondition: `x2 >= x1` and `y2 >= y1` (see
/// [`Segment::normalized`](super::Segment::normalized) and
/// [`Segment::is_midpoint_ready`](super::Segment::is_midpoint_ready)).
/// Other input still terminates, but the pixels do not follow the segment.
#[derive(Debug, Clone)]
pub struct MidpointLine {
    x: i32,
    y: i32,
    /// Last coordinate along the major axis
    end: i32,
    steep: bool,
    d: i64,
    inc_e: i64,
    inc_ne: i64,
    started: bool,
}

impl MidpointLine {
    pub fn new(p1: Pixel, p2: Pixel) -> Self {
        let dx = p2.x as i64 - p1.x as i64;
        let dy = p2.y as i64 - p1.y as i64;
        let steep = dy.abs() >= dx.abs();

        // Steep lines swap the roles of x and y
        let (major, minor) = if steep { (dy, dx) } else { (dx, dy) };

        Self {
            x: p1.x,
            y: p1.y,
            end: if steep { p2.y } else { p2.x },
            steep,
            d: 2 * minor - major,
            inc_e: 2 * minor,
            inc_ne: 2 * (minor - major),
            started: false,
        }
    }

    fn major(&self) -> i32 {
        if self.steep { self.y } else { self.x }
    }
}

impl Iterator for MidpointLine {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        if !self.started {
            self.started = true;
            return Some(Pixel::new(self.x, self.y));
        }
        if self.major() >= self.end {
            return None;
        }

        // d <= 0 picks the axis-aligned step, ties included
        let diagonal = self.d > 0;
        self.d += if diagonal { self.inc_ne } else { self.inc_e };

        if self.steep {
            self.y += 1;
            if diagonal {
                self.x += 1;
            }
        } else {
            self.x += 1;
            if diagonal {
                self.y += 1;
            }
        }

        Some(Pixel::new(self.x, self.y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.end as i64 - self.major() as i64).max(0) as usize + usize::from(!self.started);
        (left, Some(left))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(x: i32, y: i32) -> Pixel {
        Pixel::new(x, y)
    }

    fn line(algorithm: LineAlgorithm, a: (i32, i32), b: (i32, i32)) -> Vec<Pixel> {
        rasterize_line(algorithm, a.into(), b.into()).collect()
    }

    /// Distance from a pixel to the ideal infinite line through a and b
    fn distance_to_line(p: Pixel, a: Pixel, b: Pixel) -> f64 {
        let (dx, dy) = ((b.x - a.x) as f64, (b.y - a.y) as f64);
        let cross = dx * (p.y - a.y) as f64 - dy * (p.x - a.x) as f64;
        cross.abs() / (dx * dx + dy * dy).sqrt()
    }

    #[test]
    fn test_dda_horizontal() {
        assert_eq!(
            line(LineAlgorithm::Dda, (0, 0), (4, 0)),
            vec![px(0, 0), px(1, 0), px(2, 0), px(3, 0), px(4, 0)]
        );
    }

    #[test]
    fn test_dda_degenerate_emits_single_pixel() {
        assert_eq!(line(LineAlgorithm::Dda, (7, -3), (7, -3)), vec![px(7, -3)]);
    }

    #[test]
    fn test_dda_emits_steps_plus_one_including_endpoints() {
        let pts = line(LineAlgorithm::Dda, (-3, 2), (8, -4));
        assert_eq!(pts.len(), 12);
        assert_eq!(pts.first(), Some(&px(-3, 2)));
        assert_eq!(pts.last(), Some(&px(8, -4)));
        assert_eq!(DdaLine::new(px(-3, 2), px(8, -4)).len(), 12);
    }

    #[test]
    fn test_dda_half_rounds_away_from_zero() {
        // y advances by 0.5 per step, so odd steps land exactly on .5
        let pts = line(LineAlgorithm::Dda, (0, 0), (4, 2));
        assert_eq!(pts, vec![px(0, 0), px(1, 1), px(2, 1), px(3, 2), px(4, 2)]);
    }

    #[test]
    fn test_midpoint_shallow_octant() {
        let pts = line(LineAlgorithm::Midpoint, (0, 0), (5, 2));
        assert_eq!(pts.len(), 6);
        assert_eq!(pts, vec![px(0, 0), px(1, 0), px(2, 1), px(3, 1), px(4, 2), px(5, 2)]);
        assert!(pts.windows(2).all(|w| w[1].x == w[0].x + 1 && w[1].y >= w[0].y));
    }

    #[test]
    fn test_midpoint_steep_octant() {
        let pts = line(LineAlgorithm::Midpoint, (0, 0), (2, 5));
        assert_eq!(pts.len(), 6);
        assert_eq!(pts.last(), Some(&px(2, 5)));
        assert!(pts.windows(2).all(|w| w[1].y == w[0].y + 1 && w[1].x >= w[0].x));
    }

    #[test]
    fn test_midpoint_degenerate_emits_single_pixel() {
        assert_eq!(line(LineAlgorithm::Midpoint, (2, 2), (2, 2)), vec![px(2, 2)]);
    }

    #[test]
    fn test_midpoint_violated_precondition_terminates() {
        let pts = line(LineAlgorithm::Midpoint, (5, 2), (0, 0));
        assert_eq!(pts, vec![px(5, 2)]);
    }

    #[test]
    fn test_algorithms_agree_on_axis_aligned_and_diagonal() {
        for (a, b) in [((0, 0), (6, 0)), ((0, 0), (0, 6)), ((0, 0), (6, 6)), ((-3, -3), (4, 4))] {
            assert_eq!(
                line(LineAlgorithm::Dda, a, b),
                line(LineAlgorithm::Midpoint, a, b),
                "segment {:?} -> {:?}",
                a,
                b
            );
        }
    }

    #[test]
    fn test_algorithms_stay_near_ideal_line_and_monotonic() {
        for (a, b) in [((0, 0), (7, 3)), ((0, 0), (3, 7)), ((2, 1), (13, 5)), ((0, 0), (9, 8))] {
            let (pa, pb): (Pixel, Pixel) = (a.into(), b.into());
            let steep = (pb.y - pa.y).abs() >= (pb.x - pa.x).abs();
            for algorithm in LineAlgorithm::ALL {
                let pts = line(algorithm, a, b);
                assert_eq!(pts.first(), Some(&pa));
                assert_eq!(pts.last(), Some(&pb));
                for p in &pts {
                    assert!(distance_to_line(*p, pa, pb) <= 1.0, "{:?} strays at {:?}", algorithm, p);
                }
                assert!(pts.windows(2).all(|w| if steep {
                    w[1].y == w[0].y + 1
                } else {
                    w[1].x == w[0].x + 1
                }));
            }
        }
    }

    #[test]
    fn test_segment_midpoint_mirrors_other_quadrants() {
        let down = rasterize_segment(LineAlgorithm::Midpoint, Segment::new(px(0, 0), px(5, -2)));
        assert_eq!(
            down.collect::<Vec<_>>(),
            vec![px(0, 0), px(1, 0), px(2, -1), px(3, -1), px(4, -2), px(5, -2)]
        );

        let back: Vec<_> = rasterize_segment(LineAlgorithm::Midpoint, Segment::new(px(3, 4), px(1, -1))).collect();
        assert_eq!(back.first(), Some(&px(3, 4)));
        assert_eq!(back.last(), Some(&px(1, -1)));
        assert_eq!(back.len(), 6);
        assert!(back.windows(2).all(|w| w[1].y == w[0].y - 1));
    }

    #[test]
    fn test_segment_dda_is_unchanged() {
        let seg = Segment::new(px(4, 4), px(-3, 1));
        let direct: Vec<_> = rasterize_line(LineAlgorithm::Dda, seg.p1, seg.p2).collect();
        assert_eq!(rasterize_segment(LineAlgorithm::Dda, seg).collect::<Vec<_>>(), direct);
    }

    #[test]
    fn test_full_range_segments_do_not_overflow() {
        let mut dda = rasterize_line(LineAlgorithm::Dda, px(i32::MIN, 0), px(i32::MAX, 0));
        assert_eq!(dda.size_hint(), (u32::MAX as usize + 1, Some(u32::MAX as usize + 1)));
        assert_eq!(dda.next(), Some(px(i32::MIN, 0)));

        let mut mid = rasterize_line(LineAlgorithm::Midpoint, px(-2_000_000_000, 0), px(2_000_000_000, 1));
        assert_eq!(mid.size_hint().0, 4_000_000_001);
        assert_eq!(mid.next(), Some(px(-2_000_000_000, 0)));
        assert_eq!(mid.next(), Some(px(-1_999_999_999, 0)));

        let mut back = rasterize_segment(LineAlgorithm::Midpoint, Segment::new(px(2_000_000_000, 5), px(-2_000_000_000, 0)));
        assert_eq!(back.next(), Some(px(2_000_000_000, 5)));
        assert_eq!(back.next(), Some(px(1_999_999_999, 5)));
    }

    #[test]
    fn test_sequence_is_restartable() {
        let first: Vec<_> = rasterize_line(LineAlgorithm::Midpoint, px(0, 0), px(9, 4)).collect();
        let second: Vec<_> = rasterize_line(LineAlgorithm::Midpoint, px(0, 0), px(9, 4)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_size_hint_matches_output() {
        for algorithm in LineAlgorithm::ALL {
            let it = rasterize_line(algorithm, px(0, 0), px(8, 3));
            let (lower, upper) = it.size_hint();
            let n = it.count();
            assert_eq!(lower, n);
            assert_eq!(upper, Some(n));
        }
    }
}
