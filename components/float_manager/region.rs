/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The float region of a float is its margin box as placed by the block
//! layout, which may differ from the frame's border box inflated by its
//! margins, for example after a float was moved by clearance. Only the
//! difference is stored, keyed by frame.

use app_units::Au;
use euclid::default::{Rect, SideOffsets2D, Size2D};
use euclid::num::Zero;
use geometry::{LogicalMargin, LogicalRect, WritingMode};
use log::trace;
use rustc_hash::FxHashMap;

use crate::frame::{FloatFrame, FrameId};
use crate::style::FloatSide;

/// Computes the float region of `frame` from its normal position and the
/// given margin. A region of negative size is collapsed to zero, keeping
/// the inline edge away from the float's side.
pub fn calculate_region_for<F: FloatFrame + ?Sized>(
    writing_mode: WritingMode,
    frame: &F,
    margin: &LogicalMargin<Au>,
    container_size: Size2D<Au>,
) -> LogicalRect<Au> {
    let border_box = Rect::new(frame.normal_position(), frame.rect().size);
    let mut region = LogicalRect::from_physical(writing_mode, border_box, container_size)
        .inflate(writing_mode, margin);

    if region.size.inline < Au::zero() {
        // A left float keeps its line-right edge, a right float its
        // line-left edge.
        let side = FloatSide::from_style_and_container_writing_mode(
            frame.float_style(),
            writing_mode,
        );
        if (side == Some(FloatSide::Left)) == writing_mode.is_bidi_ltr() {
            region.start.i = region.inline_end();
        }
        region.size.inline = Au::zero();
    }
    if region.size.block < Au::zero() {
        region.size.block = Au::zero();
    }
    region
}

/// Float regions that differ from the margin-less border box of their
/// frame.
#[derive(Debug, Default)]
pub struct FloatRegionStore {
    regions: FxHashMap<FrameId, SideOffsets2D<Au>>,
}

impl FloatRegionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The float region of `frame`: its border box, inflated by the stored
    /// difference if there is one.
    pub fn region_for<F: FloatFrame + ?Sized>(
        &self,
        writing_mode: WritingMode,
        frame: &F,
        container_size: Size2D<Au>,
    ) -> LogicalRect<Au> {
        let region = LogicalRect::from_physical(writing_mode, frame.rect(), container_size);
        match self.regions.get(&frame.id()) {
            Some(&offsets) => {
                region.inflate(writing_mode, &LogicalMargin::from_physical(writing_mode, offsets))
            },
            None => region,
        }
    }

    /// Records `region` as the float region of `frame`. Nothing is kept when
    /// it matches the frame's border box.
    pub fn store_region_for<F: FloatFrame + ?Sized>(
        &mut self,
        writing_mode: WritingMode,
        frame: &F,
        region: &LogicalRect<Au>,
        container_size: Size2D<Au>,
    ) {
        let region = region.to_physical(writing_mode, container_size);
        let rect = frame.rect();
        if region == rect {
            self.regions.remove(&frame.id());
            return;
        }

        let offsets = SideOffsets2D::new(
            rect.min_y() - region.min_y(),
            region.max_x() - rect.max_x(),
            region.max_y() - rect.max_y(),
            rect.min_x() - region.min_x(),
        );
        trace!("Storing float region {:?} for {:?}", offsets, frame.id());
        self.regions.insert(frame.id(), offsets);
    }

    pub fn remove(&mut self, frame: FrameId) {
        self.regions.remove(&frame);
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
