/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use app_units::{Au, MIN_AU};
use euclid::default::{Rect, Size2D, Vector2D};
use geometry::{LogicalRect, WritingMode};
use log::debug;

use crate::frame::{FloatFrame, FrameId};
use crate::shapes::{ShapeInfo, to_float_logical_rect};
use crate::style::FloatSide;

/// Which area of a float content flows around.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ShapeType {
    /// The margin box.
    Margin,
    /// The `shape-outside` area, clipped to the margin box.
    ShapeOutside,
}

/// A float that has been placed by the float manager.
#[derive(Clone, Debug)]
pub struct FloatInfo {
    frame: FrameId,
    side: FloatSide,
    /// The margin box in float-logical space, translated by the float
    /// manager's offset at the time the float was added.
    rect: Rect<Au>,
    /// The greatest block end of any left float added so far, this one
    /// included.
    pub(crate) left_b_end: Au,
    /// Same as `left_b_end`, for right floats.
    pub(crate) right_b_end: Au,
    shape_info: Option<ShapeInfo>,
}

impl FloatInfo {
    pub(crate) fn new<F: FloatFrame + ?Sized>(
        frame: &F,
        side: FloatSide,
        line_left: Au,
        block_start: Au,
        margin_rect: &LogicalRect<Au>,
        writing_mode: WritingMode,
        container_size: Size2D<Au>,
    ) -> Self {
        let rect = to_float_logical_rect(margin_rect, writing_mode, container_size)
            .translate(Vector2D::new(line_left, block_start));
        let mut info = FloatInfo {
            frame: frame.id(),
            side,
            rect,
            left_b_end: MIN_AU,
            right_b_end: MIN_AU,
            shape_info: None,
        };

        // A shape is clipped to the margin box, so an empty margin box can
        // never have a non-empty float area.
        // https://drafts.csswg.org/css-shapes/#relation-to-box-model-and-float-behavior
        if info.rect.is_empty() {
            return info;
        }

        info.shape_info =
            match ShapeInfo::create(frame, margin_rect, writing_mode, container_size) {
                Ok(Some(mut shape)) => {
                    shape.translate(line_left, block_start);
                    Some(shape)
                },
                Ok(None) => None,
                Err(error) => {
                    debug!("Float {:?} uses its margin box: {}", info.frame, error);
                    None
                },
            };
        info
    }

    pub fn frame(&self) -> FrameId {
        self.frame
    }

    pub fn side(&self) -> FloatSide {
        self.side
    }

    pub fn rect(&self) -> &Rect<Au> {
        &self.rect
    }

    pub fn shape_info(&self) -> Option<&ShapeInfo> {
        self.shape_info.as_ref()
    }

    pub fn left_b_end(&self) -> Au {
        self.left_b_end
    }

    pub fn right_b_end(&self) -> Au {
        self.right_b_end
    }

    /// The shape to use for `shape_type`, if it is not the margin box.
    fn shape(&self, shape_type: ShapeType) -> Option<&ShapeInfo> {
        match shape_type {
            ShapeType::Margin => None,
            ShapeType::ShapeOutside => self.shape_info.as_ref(),
        }
    }

    pub fn line_left(&self, shape_type: ShapeType, b_start: Au, b_end: Au) -> Au {
        match self.shape(shape_type) {
            None => self.rect.min_x(),
            Some(shape) => self.rect.min_x().max(shape.line_left(b_start, b_end)),
        }
    }

    pub fn line_right(&self, shape_type: ShapeType, b_start: Au, b_end: Au) -> Au {
        match self.shape(shape_type) {
            None => self.rect.max_x(),
            Some(shape) => self.rect.max_x().min(shape.line_right(b_start, b_end)),
        }
    }

    pub fn b_start(&self, shape_type: ShapeType) -> Au {
        match self.shape(shape_type) {
            None => self.rect.min_y(),
            Some(shape) => self.rect.min_y().max(shape.b_start()),
        }
    }

    pub fn b_end(&self, shape_type: ShapeType) -> Au {
        match self.shape(shape_type) {
            None => self.rect.max_y(),
            Some(shape) => self.rect.max_y().min(shape.b_end()),
        }
    }

    pub fn is_empty(&self, shape_type: ShapeType) -> bool {
        match self.shape(shape_type) {
            None => self.rect.is_empty(),
            Some(shape) => shape.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use euclid::default::{Point2D, SideOffsets2D};
    use euclid::num::Zero;
    use smallvec::smallvec;

    use super::*;
    use crate::frame::AlphaMask;
    use crate::style::{BasicShape, ReferenceBox, ShapeOutside, StyleFloat};

    struct Frame(ShapeOutside);

    impl FloatFrame for Frame {
        fn id(&self) -> FrameId {
            FrameId(7)
        }
        fn float_style(&self) -> StyleFloat {
            StyleFloat::Left
        }
        fn shape_outside(&self) -> &ShapeOutside {
            &self.0
        }
        fn rect(&self) -> Rect<Au> {
            Rect::new(Point2D::new(Au(0), Au(0)), Size2D::new(Au(100), Au(100)))
        }
        fn used_margin(&self) -> SideOffsets2D<Au> {
            SideOffsets2D::zero()
        }
        fn used_border(&self) -> SideOffsets2D<Au> {
            SideOffsets2D::zero()
        }
        fn used_padding(&self) -> SideOffsets2D<Au> {
            SideOffsets2D::zero()
        }
        fn shape_box_border_radii(&self) -> Option<[Au; 8]> {
            None
        }
        fn render_shape_image(&self, _: Size2D<i32>) -> Option<AlphaMask> {
            None
        }
    }

    fn triangle() -> ShapeOutside {
        ShapeOutside::Shape(
            BasicShape::Polygon {
                vertices: smallvec![
                    Point2D::new(Au(0), Au(0)),
                    Point2D::new(Au(200), Au(50)),
                    Point2D::new(Au(0), Au(100))
                ],
            },
            ReferenceBox::MarginBox,
        )
    }

    fn info(shape_outside: ShapeOutside, size: i32) -> FloatInfo {
        let ltr = WritingMode::horizontal_tb();
        let margin_rect = LogicalRect::new(ltr, Au(0), Au(0), Au(size), Au(size));
        FloatInfo::new(
            &Frame(shape_outside),
            FloatSide::Left,
            Au(10),
            Au(20),
            &margin_rect,
            ltr,
            Size2D::new(Au(500), Au(500)),
        )
    }

    #[test]
    fn rect_is_translated_by_the_manager_offset() {
        let info = info(ShapeOutside::None, 100);
        assert_eq!(info.rect().origin, Point2D::new(Au(10), Au(20)));
        assert!(info.shape_info().is_none());
        assert_eq!(info.b_end(ShapeType::ShapeOutside), Au(120));
    }

    #[test]
    fn shape_is_clipped_to_the_margin_box() {
        let info = info(triangle(), 100);
        let shape = info.shape_info().map(|shape| shape.b_end());
        assert_eq!(shape, Some(Au(120)));
        // The triangle reaches x=210 at its tip, past the margin box.
        assert_eq!(info.line_right(ShapeType::ShapeOutside, Au(60), Au(80)), Au(110));
        // Near the top it is narrower than the margin box.
        assert_eq!(info.line_right(ShapeType::ShapeOutside, Au(30), Au(30)), Au(50));
        assert_eq!(info.line_right(ShapeType::Margin, Au(30), Au(30)), Au(110));
    }

    #[test]
    fn empty_margin_box_skips_the_shape() {
        let info = info(triangle(), 0);
        assert!(info.shape_info().is_none());
        assert!(info.is_empty(ShapeType::ShapeOutside));
    }

    #[test]
    fn unready_image_falls_back_to_margin_box() {
        let info = info(ShapeOutside::Image { threshold: 0.0 }, 100);
        assert!(info.shape_info().is_none());
        assert!(!info.is_empty(ShapeType::ShapeOutside));
        assert_eq!(info.line_left(ShapeType::ShapeOutside, Au(20), Au(30)), Au(10));
    }
}
