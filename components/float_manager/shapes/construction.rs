/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Building a [`ShapeInfo`] from a computed `shape-outside` value.

use app_units::Au;
use euclid::default::{Point2D, Rect, SideOffsets2D, Size2D};
use geometry::{HalfCorner, LogicalMargin, LogicalRect, LogicalSize, WritingMode, line_relative_radii};
use smallvec::SmallVec;

use super::{
    EllipseShape, ImageShape, PolygonShape, RoundedBoxShape, ShapeError, ShapeInfo,
    to_float_logical_point, to_float_logical_rect,
};
use crate::frame::FloatFrame;
use crate::style::{BasicShape, ReferenceBox, ShapeOutside, ShapeRadius};

/// The rect of `reference_box`, found by deflating the margin rect of
/// `frame` by its used margin, border and padding as needed.
pub fn shape_box_rect<F: FloatFrame + ?Sized>(
    reference_box: ReferenceBox,
    frame: &F,
    margin_rect: &LogicalRect<Au>,
    writing_mode: WritingMode,
) -> LogicalRect<Au> {
    let margin = || LogicalMargin::from_physical(writing_mode, frame.used_margin());
    let border = || LogicalMargin::from_physical(writing_mode, frame.used_border());
    let padding = || LogicalMargin::from_physical(writing_mode, frame.used_padding());
    let rect = *margin_rect;
    match reference_box {
        ReferenceBox::MarginBox => rect,
        ReferenceBox::BorderBox => rect.deflate(writing_mode, &margin()),
        ReferenceBox::PaddingBox => rect
            .deflate(writing_mode, &margin())
            .deflate(writing_mode, &border()),
        ReferenceBox::ContentBox => rect
            .deflate(writing_mode, &margin())
            .deflate(writing_mode, &border())
            .deflate(writing_mode, &padding()),
    }
}

impl ShapeInfo {
    /// Builds the float area for the `shape-outside` of `frame`, whose margin
    /// box is `margin_rect`. Returns `Ok(None)` for `shape-outside: none`.
    ///
    /// The shape is in float-logical space but not yet translated by the
    /// float manager's offset.
    pub fn create<F: FloatFrame + ?Sized>(
        frame: &F,
        margin_rect: &LogicalRect<Au>,
        writing_mode: WritingMode,
        container_size: Size2D<Au>,
    ) -> Result<Option<ShapeInfo>, ShapeError> {
        let shape = match frame.shape_outside() {
            ShapeOutside::None => return Ok(None),
            ShapeOutside::Url => return Err(ShapeError::UnsupportedShapeSource),
            ShapeOutside::Image { threshold } => {
                Self::create_image(frame, *threshold, writing_mode, container_size)?
            },
            ShapeOutside::Box(reference_box) => {
                let shape_box = shape_box_rect(*reference_box, frame, margin_rect, writing_mode);
                Self::create_shape_box(frame, &shape_box, writing_mode, container_size)
            },
            ShapeOutside::Shape(basic_shape, reference_box) => {
                let shape_box = shape_box_rect(*reference_box, frame, margin_rect, writing_mode);
                Self::create_basic_shape(basic_shape, &shape_box, writing_mode, container_size)
            },
        };
        Ok(Some(shape))
    }

    fn create_shape_box<F: FloatFrame + ?Sized>(
        frame: &F,
        shape_box: &LogicalRect<Au>,
        writing_mode: WritingMode,
        container_size: Size2D<Au>,
    ) -> ShapeInfo {
        let rect = to_float_logical_rect(shape_box, writing_mode, container_size);
        let radii = frame
            .shape_box_border_radii()
            .map(|radii| line_relative_radii(writing_mode, &radii));
        ShapeInfo::RoundedBox(RoundedBoxShape::new(rect, radii))
    }

    fn create_basic_shape(
        basic_shape: &BasicShape,
        shape_box: &LogicalRect<Au>,
        writing_mode: WritingMode,
        container_size: Size2D<Au>,
    ) -> ShapeInfo {
        // Shape arguments are physical, so they are resolved against the
        // physical reference box before being converted.
        let reference = shape_box.to_physical(writing_mode, container_size);
        let to_logical = |point| to_float_logical_point(point, writing_mode, container_size);

        match basic_shape {
            BasicShape::Inset { insets, radii } => {
                let inset_rect = inset_rect(&reference, insets);
                let logical = LogicalRect::from_physical(writing_mode, inset_rect, container_size);
                let rect = to_float_logical_rect(&logical, writing_mode, container_size);
                let radii = radii
                    .and_then(|radii| scale_radii_to_fit(radii, inset_rect.size))
                    .map(|radii| line_relative_radii(writing_mode, &radii));
                ShapeInfo::RoundedBox(RoundedBoxShape::new(rect, radii))
            },
            BasicShape::Circle { center, radius } => {
                let center = reference.origin + center.to_vector();
                let horizontal = resolve_radius(*radius, center.x, reference.min_x(), reference.max_x());
                let vertical = resolve_radius(*radius, center.y, reference.min_y(), reference.max_y());
                let radius = match radius {
                    ShapeRadius::Length(length) => *length,
                    ShapeRadius::ClosestSide => horizontal.min(vertical),
                    ShapeRadius::FarthestSide => horizontal.max(vertical),
                };
                ShapeInfo::Ellipse(EllipseShape::new(
                    to_logical(center),
                    Size2D::new(radius, radius),
                ))
            },
            BasicShape::Ellipse {
                center,
                radius_x,
                radius_y,
            } => {
                let center = reference.origin + center.to_vector();
                let physical_radii = Size2D::new(
                    resolve_radius(*radius_x, center.x, reference.min_x(), reference.max_x()),
                    resolve_radius(*radius_y, center.y, reference.min_y(), reference.max_y()),
                );
                let radii = LogicalSize::from_physical(writing_mode, physical_radii);
                ShapeInfo::Ellipse(EllipseShape::new(
                    to_logical(center),
                    Size2D::new(radii.inline, radii.block),
                ))
            },
            BasicShape::Polygon { vertices } => {
                let vertices: SmallVec<[Point2D<Au>; 8]> = vertices
                    .iter()
                    .map(|vertex| to_logical(reference.origin + vertex.to_vector()))
                    .collect();
                ShapeInfo::Polygon(PolygonShape::new(vertices))
            },
        }
    }

    fn create_image<F: FloatFrame + ?Sized>(
        frame: &F,
        threshold: f32,
        writing_mode: WritingMode,
        container_size: Size2D<Au>,
    ) -> Result<ShapeInfo, ShapeError> {
        let content_rect = frame.content_rect();
        let app_units_per_device_pixel = frame.app_units_per_device_pixel().max(1);
        let to_device_pixels = |length: Au| {
            (length.0 as f32 / app_units_per_device_pixel as f32 + 0.5).floor() as i32
        };
        let size = Size2D::new(
            to_device_pixels(content_rect.size.width),
            to_device_pixels(content_rect.size.height),
        );

        let mask = frame
            .render_shape_image(size)
            .ok_or(ShapeError::ImageNotReady)?;
        if !mask.is_well_formed() {
            return Err(ShapeError::MalformedAlphaMask);
        }

        Ok(ShapeInfo::Image(ImageShape::new(
            &mask,
            app_units_per_device_pixel,
            threshold,
            content_rect,
            writing_mode,
            container_size,
        )))
    }
}

/// The rect of `inset()`. Insets that overlap flip the rect instead of
/// producing a negative size.
fn inset_rect(reference: &Rect<Au>, insets: &SideOffsets2D<Au>) -> Rect<Au> {
    let mut x = reference.min_x() + insets.left;
    let mut y = reference.min_y() + insets.top;
    let mut width = reference.size.width - (insets.left + insets.right);
    let mut height = reference.size.height - (insets.top + insets.bottom);
    if width < Au(0) {
        width = -width;
        x = x - width;
    }
    if height < Au(0) {
        height = -height;
        y = y - height;
    }
    Rect::new(Point2D::new(x, y), Size2D::new(width, height))
}

/// The distance from `center` to the edges of the reference box along one
/// axis, for the keyword radii.
fn resolve_radius(radius: ShapeRadius, center: Au, min_edge: Au, max_edge: Au) -> Au {
    let from_min = (center - min_edge).abs();
    let from_max = (max_edge - center).abs();
    match radius {
        ShapeRadius::Length(length) => length,
        ShapeRadius::ClosestSide => from_min.min(from_max),
        ShapeRadius::FarthestSide => from_min.max(from_max),
    }
}

/// Shrinks all radii by the same factor so that no two adjacent radii
/// overlap along a side of a box of `size`. Returns `None` if every radius
/// is zero.
///
/// <https://drafts.csswg.org/css-backgrounds-3/#corner-overlap>
fn scale_radii_to_fit(mut radii: [Au; 8], size: Size2D<Au>) -> Option<[Au; 8]> {
    if radii.iter().all(|radius| *radius <= Au(0)) {
        return None;
    }
    let sum = |a: HalfCorner, b: HalfCorner| radii[a.index()].0 as f64 + radii[b.index()].0 as f64;
    let sides = [
        (
            size.width,
            sum(HalfCorner::TOP_LEFT_X, HalfCorner::TOP_RIGHT_X),
        ),
        (
            size.height,
            sum(HalfCorner::TOP_RIGHT_Y, HalfCorner::BOTTOM_RIGHT_Y),
        ),
        (
            size.width,
            sum(HalfCorner::BOTTOM_RIGHT_X, HalfCorner::BOTTOM_LEFT_X),
        ),
        (
            size.height,
            sum(HalfCorner::BOTTOM_LEFT_Y, HalfCorner::TOP_LEFT_Y),
        ),
    ];
    let ratio = sides
        .iter()
        .filter(|(_, sum)| *sum > 0.0)
        .map(|(length, sum)| length.0 as f64 / sum)
        .fold(1.0f64, f64::min);
    if ratio < 1.0 {
        for radius in radii.iter_mut() {
            *radius = Au((radius.0 as f64 * ratio) as i32);
        }
    }
    Some(radii)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use euclid::num::Zero;
    use geometry::{Direction, WritingModeProperty};
    use smallvec::smallvec;

    use super::*;
    use crate::frame::{AlphaMask, FrameId};
    use crate::style::StyleFloat;

    struct TestFrame {
        shape_outside: ShapeOutside,
        rect: Rect<Au>,
        margin: SideOffsets2D<Au>,
        padding: SideOffsets2D<Au>,
        radii: Option<[Au; 8]>,
        mask: Option<AlphaMask>,
        rendered_size: Cell<Option<Size2D<i32>>>,
    }

    impl TestFrame {
        fn new(shape_outside: ShapeOutside) -> Self {
            TestFrame {
                shape_outside,
                rect: Rect::new(Point2D::new(Au(10), Au(10)), Size2D::new(Au(100), Au(80))),
                margin: SideOffsets2D::new_all_same(Au(10)),
                padding: SideOffsets2D::zero(),
                radii: None,
                mask: None,
                rendered_size: Cell::new(None),
            }
        }

        fn margin_rect(&self, writing_mode: WritingMode) -> LogicalRect<Au> {
            let margin_box = self.rect.outer_rect(self.margin);
            LogicalRect::from_physical(writing_mode, margin_box, container())
        }
    }

    impl FloatFrame for TestFrame {
        fn id(&self) -> FrameId {
            FrameId(1)
        }
        fn float_style(&self) -> StyleFloat {
            StyleFloat::Left
        }
        fn shape_outside(&self) -> &ShapeOutside {
            &self.shape_outside
        }
        fn rect(&self) -> Rect<Au> {
            self.rect
        }
        fn used_margin(&self) -> SideOffsets2D<Au> {
            self.margin
        }
        fn used_border(&self) -> SideOffsets2D<Au> {
            SideOffsets2D::zero()
        }
        fn used_padding(&self) -> SideOffsets2D<Au> {
            self.padding
        }
        fn shape_box_border_radii(&self) -> Option<[Au; 8]> {
            self.radii
        }
        fn render_shape_image(&self, size: Size2D<i32>) -> Option<AlphaMask> {
            self.rendered_size.set(Some(size));
            self.mask.clone()
        }
    }

    fn container() -> Size2D<Au> {
        Size2D::new(Au(400), Au(300))
    }

    fn create(frame: &TestFrame, writing_mode: WritingMode) -> Result<Option<ShapeInfo>, ShapeError> {
        ShapeInfo::create(frame, &frame.margin_rect(writing_mode), writing_mode, container())
    }

    #[test]
    fn none_and_url_have_no_shape() {
        let ltr = WritingMode::horizontal_tb();
        assert!(matches!(create(&TestFrame::new(ShapeOutside::None), ltr), Ok(None)));
        assert_eq!(
            create(&TestFrame::new(ShapeOutside::Url), ltr).err(),
            Some(ShapeError::UnsupportedShapeSource)
        );
    }

    #[test]
    fn reference_boxes_deflate_the_margin_box() {
        let ltr = WritingMode::horizontal_tb();
        let mut frame = TestFrame::new(ShapeOutside::Box(ReferenceBox::ContentBox));
        frame.padding = SideOffsets2D::new_all_same(Au(5));
        let margin_rect = frame.margin_rect(ltr);
        assert_eq!(margin_rect.start.i, Au(0));
        let border_box = shape_box_rect(ReferenceBox::BorderBox, &frame, &margin_rect, ltr);
        assert_eq!(border_box.start.i, Au(10));
        assert_eq!(border_box.size.inline, Au(100));
        let content_box = shape_box_rect(ReferenceBox::ContentBox, &frame, &margin_rect, ltr);
        assert_eq!(content_box.start.b, Au(15));
        assert_eq!(content_box.size.block, Au(70));

        let Ok(Some(ShapeInfo::RoundedBox(shape))) = create(&frame, ltr) else {
            panic!("expected a rounded box");
        };
        assert_eq!(shape.line_left(Au(20), Au(20)), Au(15));
        assert_eq!(shape.line_right(Au(20), Au(20)), Au(105));
    }

    #[test]
    fn shape_box_uses_frame_radii() {
        let ltr = WritingMode::horizontal_tb();
        let mut frame = TestFrame::new(ShapeOutside::Box(ReferenceBox::BorderBox));
        frame.radii = Some([Au(20); 8]);
        let Ok(Some(shape)) = create(&frame, ltr) else {
            panic!("expected a shape");
        };
        // Border box starts at (10, 10); the corner pulls the edge in at the top.
        assert_eq!(shape.line_left(Au(10), Au(10)), Au(30));
        assert_eq!(shape.line_left(Au(50), Au(50)), Au(10));
    }

    #[test]
    fn closest_side_circle() {
        let ltr = WritingMode::horizontal_tb();
        let frame = TestFrame::new(ShapeOutside::Shape(
            BasicShape::Circle {
                center: Point2D::new(Au(30), Au(40)),
                radius: ShapeRadius::ClosestSide,
            },
            ReferenceBox::BorderBox,
        ));
        let Ok(Some(ShapeInfo::Ellipse(shape))) = create(&frame, ltr) else {
            panic!("expected an ellipse");
        };
        assert_eq!(shape.center(), Point2D::new(Au(40), Au(50)));
        // 30 from the left edge, 40 from the top and bottom, 70 from the right.
        assert_eq!(shape.line_left(Au(50), Au(50)), Au(10));
        assert_eq!(shape.b_start(), Au(20));
    }

    #[test]
    fn farthest_side_ellipse_in_vertical_rl() {
        let mode = WritingMode::new(WritingModeProperty::VerticalRl, Direction::Ltr);
        let frame = TestFrame::new(ShapeOutside::Shape(
            BasicShape::Ellipse {
                center: Point2D::new(Au(50), Au(40)),
                radius_x: ShapeRadius::FarthestSide,
                radius_y: ShapeRadius::Length(Au(20)),
            },
            ReferenceBox::BorderBox,
        ));
        let Ok(Some(ShapeInfo::Ellipse(shape))) = create(&frame, mode) else {
            panic!("expected an ellipse");
        };
        // Physical center (60, 50). Line-left is the top edge and block-start
        // the right edge of the 400x300 container.
        assert_eq!(shape.center(), Point2D::new(Au(50), Au(340)));
        // The physical y radius (20) runs along the inline axis.
        assert_eq!(shape.line_left(Au(340), Au(340)), Au(30));
        // The physical x radius (50) runs along the block axis.
        assert_eq!(shape.b_start(), Au(290));
    }

    #[test]
    fn inset_scales_overlapping_radii() {
        let ltr = WritingMode::horizontal_tb();
        let frame = TestFrame::new(ShapeOutside::Shape(
            BasicShape::Inset {
                insets: SideOffsets2D::new(Au(10), Au(10), Au(10), Au(10)),
                radii: Some([Au(100); 8]),
            },
            ReferenceBox::BorderBox,
        ));
        let Ok(Some(ShapeInfo::RoundedBox(shape))) = create(&frame, ltr) else {
            panic!("expected a rounded box");
        };
        assert_eq!(shape.rect().origin, Point2D::new(Au(20), Au(20)));
        assert_eq!(shape.rect().size, Size2D::new(Au(80), Au(60)));
        // Radii of 100 along 60 high sides scale by 60 / 200.
        assert_eq!(shape.line_left(Au(20), Au(20)), Au(50));
    }

    #[test]
    fn overlapping_insets_flip() {
        let rect = inset_rect(
            &Rect::new(Point2D::new(Au(0), Au(0)), Size2D::new(Au(100), Au(100))),
            &SideOffsets2D::new(Au(0), Au(80), Au(0), Au(40)),
        );
        assert_eq!(rect.origin.x, Au(20));
        assert_eq!(rect.size.width, Au(20));
        assert!(scale_radii_to_fit([Au(0); 8], rect.size).is_none());
    }

    #[test]
    fn polygon_vertices_are_offset_by_the_reference_box() {
        let ltr = WritingMode::horizontal_tb();
        let frame = TestFrame::new(ShapeOutside::Shape(
            BasicShape::Polygon {
                vertices: smallvec![
                    Point2D::new(Au(0), Au(0)),
                    Point2D::new(Au(100), Au(0)),
                    Point2D::new(Au(0), Au(80))
                ],
            },
            ReferenceBox::BorderBox,
        ));
        let Ok(Some(ShapeInfo::Polygon(shape))) = create(&frame, ltr) else {
            panic!("expected a polygon");
        };
        assert_eq!(shape.vertices()[1], Point2D::new(Au(110), Au(10)));
        assert_eq!(shape.b_end(), Au(90));
    }

    #[test]
    fn image_shapes() {
        let ltr = WritingMode::horizontal_tb();
        let mut frame = TestFrame::new(ShapeOutside::Image { threshold: 0.5 });
        assert_eq!(create(&frame, ltr).err(), Some(ShapeError::ImageNotReady));
        // The content box is 100x80 app units, rounded to 2x1 device pixels.
        assert_eq!(frame.rendered_size.get(), Some(Size2D::new(2, 1)));

        frame.mask = Some(AlphaMask::new(vec![255], 1, Size2D::new(2, 1)));
        assert_eq!(create(&frame, ltr).err(), Some(ShapeError::MalformedAlphaMask));

        frame.mask = Some(AlphaMask::new(vec![0, 255], 2, Size2D::new(2, 1)));
        let Ok(Some(ShapeInfo::Image(shape))) = create(&frame, ltr) else {
            panic!("expected an image");
        };
        assert_eq!(shape.intervals().len(), 1);
        assert_eq!(shape.line_left(Au(10), Au(10)), Au(70));
    }
}
