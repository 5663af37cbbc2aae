/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use app_units::Au;
use euclid::default::{Rect, Vector2D};
use geometry::HalfCorner;

use super::ellipse_line_intercept_diff;

/// A rectangle with optionally rounded corners, used for `<shape-box>` and
/// `inset()`.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundedBoxShape {
    rect: Rect<Au>,
    /// Half-corner radii in float-logical space, so `TOP_LEFT_X` is the
    /// line-axis radius of the block-start, line-left corner.
    radii: Option<[Au; 8]>,
}

impl RoundedBoxShape {
    pub fn new(rect: Rect<Au>, radii: Option<[Au; 8]>) -> Self {
        RoundedBoxShape { rect, radii }
    }

    pub fn rect(&self) -> &Rect<Au> {
        &self.rect
    }

    pub fn line_left(&self, b_start: Au, b_end: Au) -> Au {
        let Some(radii) = &self.radii else {
            return self.rect.min_x();
        };
        let diff = ellipse_line_intercept_diff(
            self.rect.min_y(),
            self.rect.max_y(),
            radii[HalfCorner::TOP_LEFT_X.index()],
            radii[HalfCorner::TOP_LEFT_Y.index()],
            radii[HalfCorner::BOTTOM_LEFT_X.index()],
            radii[HalfCorner::BOTTOM_LEFT_Y.index()],
            b_start,
            b_end,
        );
        self.rect.min_x() + diff
    }

    pub fn line_right(&self, b_start: Au, b_end: Au) -> Au {
        let Some(radii) = &self.radii else {
            return self.rect.max_x();
        };
        let diff = ellipse_line_intercept_diff(
            self.rect.min_y(),
            self.rect.max_y(),
            radii[HalfCorner::TOP_RIGHT_X.index()],
            radii[HalfCorner::TOP_RIGHT_Y.index()],
            radii[HalfCorner::BOTTOM_RIGHT_X.index()],
            radii[HalfCorner::BOTTOM_RIGHT_Y.index()],
            b_start,
            b_end,
        );
        self.rect.max_x() - diff
    }

    pub fn b_start(&self) -> Au {
        self.rect.min_y()
    }

    pub fn b_end(&self) -> Au {
        self.rect.max_y()
    }

    pub fn is_empty(&self) -> bool {
        self.rect.is_empty()
    }

    pub fn translate(&mut self, line_left: Au, block_start: Au) {
        self.rect = self.rect.translate(Vector2D::new(line_left, block_start));
    }
}
