/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The view of a floated box that the float manager needs from the layout
//! engine.

use app_units::{AU_PER_PX, Au};
use euclid::default::{Point2D, Rect, SideOffsets2D, Size2D};

use crate::style::{ShapeOutside, StyleFloat};

/// An opaque handle naming a floated box. Only ever compared and hashed.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct FrameId(pub u64);

/// An 8-bit alpha buffer rendered from a `shape-outside` image.
#[derive(Clone, Debug)]
pub struct AlphaMask {
    pub data: Vec<u8>,
    /// Number of bytes between the starts of consecutive rows.
    pub stride: usize,
    /// Size in device pixels.
    pub size: Size2D<i32>,
}

impl AlphaMask {
    pub fn new(data: Vec<u8>, stride: usize, size: Size2D<i32>) -> Self {
        AlphaMask { data, stride, size }
    }

    /// Whether `data` holds `size.height` rows of `stride` bytes, each row
    /// at least `size.width` bytes wide.
    pub fn is_well_formed(&self) -> bool {
        if self.size.width < 0 || self.size.height < 0 {
            return false;
        }
        let width = self.size.width as usize;
        let height = self.size.height as usize;
        match self.stride.checked_mul(height) {
            Some(len) => self.stride >= width && self.data.len() >= len,
            None => false,
        }
    }

    #[inline]
    pub(crate) fn alpha(&self, column: usize, row: usize) -> u8 {
        self.data[column + row * self.stride]
    }
}

/// A floated box. Rectangles are physical and relative to the containing
/// block that floats are laid out in.
pub trait FloatFrame {
    fn id(&self) -> FrameId;

    /// The computed `float` value.
    fn float_style(&self) -> StyleFloat;

    fn shape_outside(&self) -> &ShapeOutside;

    /// The border box.
    fn rect(&self) -> Rect<Au>;

    /// The origin of the border box before relative positioning.
    fn normal_position(&self) -> Point2D<Au> {
        self.rect().origin
    }

    fn used_margin(&self) -> SideOffsets2D<Au>;
    fn used_border(&self) -> SideOffsets2D<Au>;
    fn used_padding(&self) -> SideOffsets2D<Au>;

    /// The content box.
    fn content_rect(&self) -> Rect<Au> {
        self.rect()
            .inner_rect(self.used_border())
            .inner_rect(self.used_padding())
    }

    /// Physical half-corner radii of the `shape-outside` reference box, or
    /// `None` when every radius is zero.
    fn shape_box_border_radii(&self) -> Option<[Au; 8]>;

    fn app_units_per_device_pixel(&self) -> i32 {
        AU_PER_PX
    }

    /// Renders the `shape-outside` image at `size` device pixels. Returns
    /// `None` while the image is not ready to be drawn.
    fn render_shape_image(&self, size: Size2D<i32>) -> Option<AlphaMask>;
}
