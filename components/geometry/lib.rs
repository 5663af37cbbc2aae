/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Geometry shared by the float manager: writing modes, flow-relative
//! points, sizes, margins and rectangles, and corner radii.

mod logical_geometry;
mod radii;

use app_units::{Au, MAX_AU, MIN_AU};

pub use crate::logical_geometry::{
    BlockFlowDirection, Direction, LogicalMargin, LogicalPoint, LogicalRect, LogicalSize,
    PhysicalSide, WritingMode, WritingModeProperty,
};
pub use crate::radii::{HalfCorner, line_relative_radii, side_to_half_corner};

/// Adds two app unit values, returning `None` if the exact sum falls outside of
/// `MIN_AU..=MAX_AU`.
#[inline]
pub fn checked_au_add(a: Au, b: Au) -> Option<Au> {
    let sum = a.0 as i64 + b.0 as i64;
    if sum < MIN_AU.0 as i64 || sum > MAX_AU.0 as i64 {
        return None;
    }
    Some(Au(sum as i32))
}
