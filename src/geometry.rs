//! Geometry renderer: branch list to six rotated arms of polygons.
//!
//! One arm is laid out along the positive x axis with its base at the
//! origin, then copied six times, each rotated by a multiple of 60 degrees
//! and moved to the centre of the view box. Points are absolute world
//! coordinates, so the output needs no transforms to be drawn.

use crate::config::{DrawSettings, VIEW_BOX_SIZE};
use crate::model::{hexagon_size, Branch};

pub const ARM_COUNT: usize = 6;
pub const ARM_ANGLE: f64 = 60.0;
/// Angle between a branch and the arm it grows from
pub const BRANCH_ANGLE: f64 = 45.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotate clockwise on screen (y grows downward), like SVG `rotate()`
    pub fn rotated_about(self, pivot: Point, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Point::new(
            pivot.x + dx * cos - dy * sin,
            pivot.y + dx * sin + dy * cos,
        )
    }

    fn offset(self, by: Point) -> Point {
        Point::new(self.x + by.x, self.y + by.y)
    }
}

/// Closed outline
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub points: Vec<Point>,
}

impl Polygon {
    fn rotated_about(&self, pivot: Point, degrees: f64) -> Polygon {
        self.map(|p| p.rotated_about(pivot, degrees))
    }

    fn map(&self, f: impl Fn(Point) -> Point) -> Polygon {
        Polygon {
            points: self.points.iter().map(|&p| f(p)).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Arm {
    pub polygons: Vec<Polygon>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

/// How one pass over all six arms is painted
#[derive(Clone, Debug, PartialEq)]
pub struct LayerStyle {
    pub fill: String,
    pub stroke: Option<Stroke>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub view_box: f64,
    pub rotate: bool,
    pub hexagon_size: Option<f64>,
    /// Drawn in order; the fill layer is last so it sits on top
    pub layers: Vec<LayerStyle>,
    pub arms: Vec<Arm>,
}

impl Figure {
    pub fn center(&self) -> Point {
        Point::new(self.view_box / 2.0, self.view_box / 2.0)
    }
}

pub fn render(branches: &[Branch], draw: &DrawSettings) -> Figure {
    let half_width = draw.branch_width / 2.0;
    let hexagon = hexagon_size(branches);

    let shapes = match hexagon {
        Some(hexagon) => arm_shapes(branches, hexagon, f64::from(draw.size), half_width),
        // Bare core: only the hexagon edges remain
        None => vec![hexagon_edge(draw.branch_width, half_width)],
    };

    let center = Point::new(VIEW_BOX_SIZE / 2.0, VIEW_BOX_SIZE / 2.0);
    let origin = Point::new(0.0, 0.0);
    let arms = (0..ARM_COUNT)
        .map(|edge| Arm {
            polygons: shapes
                .iter()
                .map(|shape| {
                    shape
                        .rotated_about(origin, edge as f64 * ARM_ANGLE)
                        .map(|p| p.offset(center))
                })
                .collect(),
        })
        .collect();

    Figure {
        view_box: VIEW_BOX_SIZE,
        rotate: draw.rotate,
        hexagon_size: hexagon,
        layers: layers(draw),
        arms,
    }
}

fn layers(draw: &DrawSettings) -> Vec<LayerStyle> {
    let mut layers = Vec::with_capacity(2);
    if draw.border {
        layers.push(LayerStyle {
            fill: "transparent".to_string(),
            stroke: Some(Stroke {
                color: draw.border_color.clone(),
                width: draw.stroke_width,
            }),
        });
    }
    layers.push(LayerStyle {
        fill: draw.fill_color.clone(),
        stroke: None,
    });
    layers
}

/// Arm along +x: spine, one hexagon edge, and a mirrored pair per branch
fn arm_shapes(branches: &[Branch], hexagon: f64, size: f64, half_width: f64) -> Vec<Polygon> {
    let mut shapes = Vec::with_capacity(2 + branches.len() * 2);
    shapes.push(capsule(hexagon, size + hexagon, half_width));
    shapes.push(hexagon_edge(hexagon, half_width));

    for branch in branches {
        let root = Point::new(branch.position, 0.0);
        let shape = capsule(branch.position, branch.position + branch.length, half_width);
        shapes.push(shape.rotated_about(root, BRANCH_ANGLE));
        shapes.push(shape.rotated_about(root, -BRANCH_ANGLE));
    }
    shapes
}

/// Bar from `start` to `end` along x with a pointed tip past `end`
fn capsule(start: f64, end: f64, half_width: f64) -> Polygon {
    Polygon {
        points: vec![
            Point::new(start, half_width),
            Point::new(end, half_width),
            Point::new(end + half_width / 1.5, 0.0),
            Point::new(end, -half_width),
            Point::new(start, -half_width),
        ],
    }
}

/// Centre-to-core segment, turned 60 degrees about the core's corner
fn hexagon_edge(hexagon: f64, half_width: f64) -> Polygon {
    Polygon {
        points: vec![
            Point::new(0.0, half_width),
            Point::new(hexagon, half_width),
            Point::new(hexagon, -half_width),
            Point::new(0.0, -half_width),
        ],
    }
    .rotated_about(Point::new(hexagon, 0.0), ARM_ANGLE)
}
