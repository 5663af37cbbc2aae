/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use app_units::Au;
use euclid::default::{Point2D, Size2D, Vector2D};

use super::ellipse_line_intercept_diff;

/// `circle()` and `ellipse()`. An ellipse is a rounded box whose corners
/// meet, so edges are computed with the full radii at both corners.
#[derive(Clone, Debug, PartialEq)]
pub struct EllipseShape {
    center: Point2D<Au>,
    /// `width` is the line-axis radius and `height` the block-axis radius.
    radii: Size2D<Au>,
}

impl EllipseShape {
    pub fn new(center: Point2D<Au>, radii: Size2D<Au>) -> Self {
        EllipseShape { center, radii }
    }

    pub fn center(&self) -> Point2D<Au> {
        self.center
    }

    fn line_diff(&self, b_start: Au, b_end: Au) -> Au {
        ellipse_line_intercept_diff(
            self.b_start(),
            self.b_end(),
            self.radii.width,
            self.radii.height,
            self.radii.width,
            self.radii.height,
            b_start,
            b_end,
        )
    }

    pub fn line_left(&self, b_start: Au, b_end: Au) -> Au {
        self.center.x - self.radii.width + self.line_diff(b_start, b_end)
    }

    pub fn line_right(&self, b_start: Au, b_end: Au) -> Au {
        self.center.x + self.radii.width - self.line_diff(b_start, b_end)
    }

    pub fn b_start(&self) -> Au {
        self.center.y - self.radii.height
    }

    pub fn b_end(&self) -> Au {
        self.center.y + self.radii.height
    }

    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }

    pub fn translate(&mut self, line_left: Au, block_start: Au) {
        self.center += Vector2D::new(line_left, block_start);
    }
}
