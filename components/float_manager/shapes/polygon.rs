/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use app_units::{Au, MAX_AU, MIN_AU};
use euclid::default::{Point2D, Vector2D};
use smallvec::SmallVec;

/// `polygon()`.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonShape {
    vertices: SmallVec<[Point2D<Au>; 8]>,
    /// Set when the polygon encloses no area.
    empty: bool,
    /// Block-axis bounds of the vertices. Meaningless when `empty`.
    b_start: Au,
    b_end: Au,
}

impl PolygonShape {
    pub fn new(vertices: SmallVec<[Point2D<Au>; 8]>) -> Self {
        let mut shape = PolygonShape {
            vertices,
            empty: true,
            b_start: MAX_AU,
            b_end: MIN_AU,
        };

        // https://drafts.csswg.org/css-shapes/#funcdef-polygon
        if shape.vertices.len() < 3 || shape.is_entirely_collinear() {
            return shape;
        }

        shape.empty = false;
        for vertex in &shape.vertices {
            shape.b_start = shape.b_start.min(vertex.y);
            shape.b_end = shape.b_end.max(vertex.y);
        }
        shape
    }

    /// Whether every vertex lies on one line through the first vertex.
    /// Vertices repeating the first one do not pick the line.
    fn is_entirely_collinear(&self) -> bool {
        let determinant = |a: Vector2D<i64>, b: Vector2D<i64>| a.x * b.y - a.y * b.x;
        let to_i64 = |p: Point2D<Au>| Point2D::new(p.x.0 as i64, p.y.0 as i64);
        let p0 = to_i64(self.vertices[0]);
        let Some(p1) = self.vertices[1..]
            .iter()
            .map(|&p| to_i64(p))
            .find(|&p| p != p0)
        else {
            // Every vertex is the same point.
            return true;
        };
        self.vertices[1..]
            .iter()
            .all(|&p2| determinant(to_i64(p2) - p0, p1 - p0) == 0)
    }

    pub fn vertices(&self) -> &[Point2D<Au>] {
        &self.vertices
    }

    /// The line-left-most point where the band crosses an edge.
    pub fn line_left(&self, b_start: Au, b_end: Au) -> Au {
        debug_assert!(!self.empty, "polygon encloses no area");
        self.line_intercept(b_start, b_end, MAX_AU, Au::min)
    }

    /// The line-right-most point where the band crosses an edge.
    pub fn line_right(&self, b_start: Au, b_end: Au) -> Au {
        debug_assert!(!self.empty, "polygon encloses no area");
        self.line_intercept(b_start, b_end, MIN_AU, Au::max)
    }

    fn line_intercept(
        &self,
        b_start: Au,
        b_end: Au,
        initial: Au,
        most_extreme: fn(Au, Au) -> Au,
    ) -> Au {
        debug_assert!(b_start <= b_end, "band block start is after its block end");

        let len = self.vertices.len();
        let mut intercept = initial;
        for i in 0..len {
            let mut small_y = self.vertices[i];
            let mut big_y = self.vertices[(i + 1) % len];
            if small_y.y > big_y.y {
                std::mem::swap(&mut small_y, &mut big_y);
            }

            // Horizontal edges are skipped: their end points belong to
            // neighbouring edges too. So are edges the band only touches at
            // a vertex.
            if b_start >= big_y.y || b_end <= small_y.y || small_y.y == big_y.y {
                continue;
            }

            let b_start_intercept = if b_start <= small_y.y {
                small_y.x
            } else {
                x_intercept_at_y(b_start, small_y, big_y)
            };
            let b_end_intercept = if b_end >= big_y.y {
                big_y.x
            } else {
                x_intercept_at_y(b_end, small_y, big_y)
            };
            intercept = most_extreme(intercept, most_extreme(b_start_intercept, b_end_intercept));
        }
        intercept
    }

    pub fn b_start(&self) -> Au {
        self.b_start
    }

    pub fn b_end(&self) -> Au {
        self.b_end
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn translate(&mut self, line_left: Au, block_start: Au) {
        let offset = Vector2D::new(line_left, block_start);
        for vertex in self.vertices.iter_mut() {
            *vertex += offset;
        }
        self.b_start = self.b_start + block_start;
        self.b_end = self.b_end + block_start;
    }
}

/// Solves `x = x1 + (y - y1) * (x2 - x1) / (y2 - y1)` for the segment from
/// `p1` to `p2`, which must cross `y` and not be horizontal.
fn x_intercept_at_y(y: Au, p1: Point2D<Au>, p2: Point2D<Au>) -> Au {
    debug_assert!(p1.y <= y && y <= p2.y);
    debug_assert!(p1.y != p2.y);
    let (x1, y1) = (p1.x.0 as i64, p1.y.0 as i64);
    let (x2, y2) = (p2.x.0 as i64, p2.y.0 as i64);
    Au((x1 + (y.0 as i64 - y1) * (x2 - x1) / (y2 - y1)) as i32)
}
