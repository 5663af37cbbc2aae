/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Corner radii are stored as eight half-corner values, clockwise from the
//! top-left corner, each corner contributing its horizontal then its vertical
//! radius.

use crate::logical_geometry::{PhysicalSide, WritingMode};

/// Index of a single radius in an eight-value radii array.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HalfCorner(pub usize);

impl HalfCorner {
    pub const TOP_LEFT_X: HalfCorner = HalfCorner(0);
    pub const TOP_LEFT_Y: HalfCorner = HalfCorner(1);
    pub const TOP_RIGHT_X: HalfCorner = HalfCorner(2);
    pub const TOP_RIGHT_Y: HalfCorner = HalfCorner(3);
    pub const BOTTOM_RIGHT_X: HalfCorner = HalfCorner(4);
    pub const BOTTOM_RIGHT_Y: HalfCorner = HalfCorner(5);
    pub const BOTTOM_LEFT_X: HalfCorner = HalfCorner(6);
    pub const BOTTOM_LEFT_Y: HalfCorner = HalfCorner(7);

    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// The half corner touching `side`. `is_second` picks the corner that comes
/// second when walking clockwise along the side, `is_parallel` picks the
/// radius that runs along the side rather than across it.
#[inline]
pub fn side_to_half_corner(side: PhysicalSide, is_second: bool, is_parallel: bool) -> HalfCorner {
    let side = side as usize;
    let corner = (side + is_second as usize) * 2 + (side + !is_parallel as usize) % 2;
    HalfCorner(corner % 8)
}

/// Reorders physical radii so that, in the returned array, "top" means
/// block-start, "left" means line-left, "X" runs along the inline axis and
/// "Y" along the block axis.
pub fn line_relative_radii<T: Copy>(mode: WritingMode, radii: &[T; 8]) -> [T; 8] {
    let get = |corner: HalfCorner| radii[corner.index()];
    let left = mode.line_left_physical_side();
    let right = mode.line_right_physical_side();

    let mut out = *radii;
    out[HalfCorner::TOP_LEFT_X.index()] = get(side_to_half_corner(left, true, false));
    out[HalfCorner::TOP_LEFT_Y.index()] = get(side_to_half_corner(left, true, true));
    out[HalfCorner::BOTTOM_LEFT_X.index()] = get(side_to_half_corner(left, false, false));
    out[HalfCorner::BOTTOM_LEFT_Y.index()] = get(side_to_half_corner(left, false, true));
    out[HalfCorner::TOP_RIGHT_X.index()] = get(side_to_half_corner(right, false, false));
    out[HalfCorner::TOP_RIGHT_Y.index()] = get(side_to_half_corner(right, false, true));
    out[HalfCorner::BOTTOM_RIGHT_X.index()] = get(side_to_half_corner(right, true, false));
    out[HalfCorner::BOTTOM_RIGHT_Y.index()] = get(side_to_half_corner(right, true, true));

    // Line-over is block-end when the line is inverted, so the corners that
    // come first clockwise are the block-end ones.
    if mode.is_line_inverted() {
        out.swap(HalfCorner::TOP_LEFT_X.index(), HalfCorner::BOTTOM_LEFT_X.index());
        out.swap(HalfCorner::TOP_LEFT_Y.index(), HalfCorner::BOTTOM_LEFT_Y.index());
        out.swap(HalfCorner::TOP_RIGHT_X.index(), HalfCorner::BOTTOM_RIGHT_X.index());
        out.swap(HalfCorner::TOP_RIGHT_Y.index(), HalfCorner::BOTTOM_RIGHT_Y.index());
    }
    out
}
