//! Backend-independent vector paths.

use std::f64::consts::TAU;

use glam::{DAffine2, DVec2};

/// One path instruction. Coordinates are in the path's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathElement {
    MoveTo(DVec2),
    LineTo(DVec2),
    CubicTo { c1: DVec2, c2: DVec2, to: DVec2 },
    /// Circular arc continuing from the current point, clockwise on screen
    /// for `end > start`.
    Arc {
        center: DVec2,
        radius: f64,
        start: f64,
        end: f64,
    },
    Close,
}

/// An ordered list of subpaths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    elements: Vec<PathElement>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, point: DVec2) -> &mut Self {
        self.elements.push(PathElement::MoveTo(point));
        self
    }

    pub fn line_to(&mut self, point: DVec2) -> &mut Self {
        self.elements.push(PathElement::LineTo(point));
        self
    }

    pub fn cubic_to(&mut self, c1: DVec2, c2: DVec2, to: DVec2) -> &mut Self {
        self.elements.push(PathElement::CubicTo { c1, c2, to });
        self
    }

    pub fn arc(&mut self, center: DVec2, radius: f64, start: f64, end: f64) -> &mut Self {
        self.elements.push(PathElement::Arc {
            center,
            radius,
            start,
            end,
        });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.elements.push(PathElement::Close);
        self
    }

    /// Closed polygon through `points`.
    pub fn polygon(points: impl IntoIterator<Item = DVec2>) -> Path {
        let mut path = Path::new();
        for (i, point) in points.into_iter().enumerate() {
            if i == 0 {
                path.move_to(point);
            } else {
                path.line_to(point);
            }
        }
        if !path.elements.is_empty() {
            path.close();
        }
        path
    }

    pub fn circle(center: DVec2, radius: f64) -> Path {
        let mut path = Path::new();
        path.move_to(center + DVec2::new(radius, 0.0))
            .arc(center, radius, 0.0, TAU)
            .close();
        path
    }

    pub fn rect(min: DVec2, size: DVec2) -> Path {
        Path::polygon([
            min,
            min + DVec2::new(size.x, 0.0),
            min + size,
            min + DVec2::new(0.0, size.y),
        ])
    }

    /// Open two-point segment, for strokes.
    pub fn line(from: DVec2, to: DVec2) -> Path {
        let mut path = Path::new();
        path.move_to(from).line_to(to);
        path
    }

    /// Append every subpath of `other`.
    pub fn extend(&mut self, other: &Path) {
        self.elements.extend_from_slice(&other.elements);
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of move, line and curve endpoints.
    pub fn vertex_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    PathElement::MoveTo(_) | PathElement::LineTo(_) | PathElement::CubicTo { .. }
                )
            })
            .count()
    }

    /// True when every subpath starts with a move and ends with a close.
    pub fn is_closed(&self) -> bool {
        if self.elements.is_empty() {
            return false;
        }
        let mut open = false;
        for element in &self.elements {
            match element {
                PathElement::MoveTo(_) => {
                    if open {
                        return false;
                    }
                    open = true;
                }
                PathElement::Close => {
                    if !open {
                        return false;
                    }
                    open = false;
                }
                _ => {
                    if !open {
                        return false;
                    }
                }
            }
        }
        !open
    }

    /// First point of the path, if any.
    pub fn start(&self) -> Option<DVec2> {
        match self.elements.first() {
            Some(PathElement::MoveTo(p)) => Some(*p),
            _ => None,
        }
    }

    /// Polylines in the space of `transform`, one per subpath. Curves are
    /// subdivided so segments stay a few device units long.
    pub fn flatten(&self, transform: &DAffine2) -> Vec<Polyline> {
        let scale = transform.matrix2.determinant().abs().sqrt().max(1e-6);
        let mut polylines: Vec<Polyline> = Vec::new();
        let mut current: Vec<DVec2> = Vec::new();
        let mut cursor = DVec2::ZERO;
        let mut subpath_start = DVec2::ZERO;

        let mut finish = |points: &mut Vec<DVec2>, closed: bool| {
            if points.len() > 1 {
                polylines.push(Polyline {
                    points: std::mem::take(points),
                    closed,
                });
            } else {
                points.clear();
            }
        };

        for element in &self.elements {
            match *element {
                PathElement::MoveTo(p) => {
                    finish(&mut current, false);
                    cursor = p;
                    subpath_start = p;
                    current.push(transform.transform_point2(p));
                }
                PathElement::LineTo(p) => {
                    if current.is_empty() {
                        current.push(transform.transform_point2(cursor));
                    }
                    cursor = p;
                    current.push(transform.transform_point2(p));
                }
                PathElement::CubicTo { c1, c2, to } => {
                    if current.is_empty() {
                        current.push(transform.transform_point2(cursor));
                    }
                    let hull = cursor.distance(c1) + c1.distance(c2) + c2.distance(to);
                    let steps = segments_for(hull * scale);
                    for i in 1..=steps {
                        let t = i as f64 / steps as f64;
                        let u = 1.0 - t;
                        let point = cursor * (u * u * u)
                            + c1 * (3.0 * u * u * t)
                            + c2 * (3.0 * u * t * t)
                            + to * (t * t * t);
                        current.push(transform.transform_point2(point));
                    }
                    cursor = to;
                }
                PathElement::Arc {
                    center,
                    radius,
                    start,
                    end,
                } => {
                    let sweep = end - start;
                    let steps = segments_for(radius.abs() * sweep.abs() * scale);
                    for i in 0..=steps {
                        let angle = start + sweep * i as f64 / steps as f64;
                        let point = center + DVec2::from_angle(angle) * radius;
                        current.push(transform.transform_point2(point));
                    }
                    cursor = center + DVec2::from_angle(end) * radius;
                }
                PathElement::Close => {
                    finish(&mut current, true);
                    cursor = subpath_start;
                }
            }
        }
        finish(&mut current, false);
        polylines
    }
}

/// Flattened subpath in device space.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<DVec2>,
    pub closed: bool,
}

impl Polyline {
    /// Consecutive point pairs, including the closing edge when closed.
    pub fn segments(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        let closing = if self.closed {
            self.points.last().copied().zip(self.points.first().copied())
        } else {
            None
        };
        self.points
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(closing)
    }
}

fn segments_for(length: f64) -> usize {
    if !length.is_finite() {
        return 8;
    }
    ((length / 3.0).ceil() as usize).clamp(8, 256)
}
