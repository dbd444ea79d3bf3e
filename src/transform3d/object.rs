//! Wireframe objects: vertex list plus index-pair edges

use serde::{Deserialize, Serialize};
use crate::math::{Matrix4, Vec3};

/// Built-in object templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObjectKind {
    #[default]
    Cube,
    Pyramid,
    Prism,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 3] = [ObjectKind::Cube, ObjectKind::Pyramid, ObjectKind::Prism];

    pub fn label(&self) -> &'static str {
        match self {
            ObjectKind::Cube => "Cube",
            ObjectKind::Pyramid => "Pyramid",
            ObjectKind::Prism => "Prism",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ObjectKind::Cube => ObjectKind::Pyramid,
            ObjectKind::Pyramid => ObjectKind::Prism,
            ObjectKind::Prism => ObjectKind::Cube,
        }
    }

    pub fn build(&self, size: f64) -> Object3D {
        match self {
            ObjectKind::Cube => Object3D::cube(size),
            ObjectKind::Pyramid => Object3D::pyramid(size),
            ObjectKind::Prism => Object3D::prism(size),
        }
    }
}

/// Wireframe mesh. Edges index into `vertices` and never change under
/// transforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object3D {
    pub vertices: Vec<Vec3>,
    pub edges: Vec<(usize, usize)>,
}

impl Object3D {
    /// Axis-aligned cube centered on the origin
    pub fn cube(size: f64) -> Self {
        let h = size / 2.0;
        Self {
            vertices: vec![
                Vec3::new(-h, -h, -h),
                Vec3::new(h, -h, -h),
                Vec3::new(h, h, -h),
                Vec3::new(-h, h, -h),
                Vec3::new(-h, -h, h),
                Vec3::new(h, -h, h),
                Vec3::new(h, h, h),
                Vec3::new(-h, h, h),
            ],
            edges: vec![
                // back face
                (0, 1), (1, 2), (2, 3), (3, 0),
                // front face
                (4, 5), (5, 6), (6, 7), (7, 4),
                // sides
                (0, 4), (1, 5), (2, 6), (3, 7),
            ],
        }
    }

    /// Square base on y = -size/2, apex at y = +size/2
    pub fn pyramid(size: f64) -> Self {
        let h = size / 2.0;
        Self {
            vertices: vec![
                Vec3::new(-h, -h, -h),
                Vec3::new(h, -h, -h),
                Vec3::new(h, -h, h),
                Vec3::new(-h, -h, h),
                Vec3::new(0.0, h, 0.0),
            ],
            edges: vec![
                (0, 1), (1, 2), (2, 3), (3, 0),
                (0, 4), (1, 4), (2, 4), (3, 4),
            ],
        }
    }

    /// Triangular prism: triangle in XY extruded along Z to a depth of
    /// 2·size/3
    pub fn prism(size: f64) -> Self {
        let h = size / 2.0;
        let d = size / 3.0;
        Self {
            vertices: vec![
                Vec3::new(-h, -h, -d),
                Vec3::new(h, -h, -d),
                Vec3::new(0.0, h, -d),
                Vec3::new(-h, -h, d),
                Vec3::new(h, -h, d),
                Vec3::new(0.0, h, d),
            ],
            edges: vec![
                (0, 1), (1, 2), (2, 0),
                (3, 4), (4, 5), (5, 3),
                (0, 3), (1, 4), (2, 5),
            ],
        }
    }

    /// (min, max) corners of the bounding box
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let Some(first) = self.vertices.first() else {
            return (Vec3::ZERO, Vec3::ZERO);
        };

        let mut min = *first;
        let mut max = *first;
        for v in &self.vertices {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            min.z = min.z.min(v.z);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
            max.z = max.z.max(v.z);
        }
        (min, max)
    }

    /// Vertex average
    pub fn centroid(&self) -> Vec3 {
        if self.vertices.is_empty() {
            return Vec3::ZERO;
        }
        let sum = self.vertices.iter().fold(Vec3::ZERO, |acc, v| acc + *v);
        sum.scale(1.0 / self.vertices.len() as f64)
    }
}

/// Transform every vertex, keeping the edge table
pub fn apply_to_object(matrix: &Matrix4, object: &Object3D) -> Object3D {
    Object3D {
        vertices: object.vertices.iter().map(|v| matrix.transform_point(*v)).collect(),
        edges: object.edges.clone(),
    }
}

/// Octant number 1-8; zero counts as positive.
///
/// 1..4 have z >= 0 and go counter-clockwise from (+x, +y);
/// 5..8 repeat the pattern for z < 0.
pub fn octant_of(v: Vec3) -> u8 {
    let quadrant = match (v.x >= 0.0, v.y >= 0.0) {
        (true, true) => 1,
        (false, true) => 2,
        (false, false) => 3,
        (true, false) => 4,
    };
    if v.z >= 0.0 {
        quadrant
    } else {
        quadrant + 4
    }
}

/// Summary shown next to the 3D view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectInfo {
    pub centroid: Vec3,
    /// Width, height and depth of the bounding box
    pub dimensions: Vec3,
    /// Octant holding the most vertices; `None` for an empty object
    pub octant: Option<u8>,
}

impl ObjectInfo {
    pub fn of(object: &Object3D) -> Self {
        let (min, max) = object.bounds();

        let mut counts = [0usize; 8];
        for v in &object.vertices {
            counts[(octant_of(*v) - 1) as usize] += 1;
        }
        // first maximum wins, so ties go to the lowest octant
        let mut octant = None;
        let mut best = 0;
        for (i, &n) in counts.iter().enumerate() {
            if n > best {
                best = n;
                octant = Some(i as u8 + 1);
            }
        }

        Self {
            centroid: object.centroid(),
            dimensions: max - min,
            octant,
        }
    }
}
