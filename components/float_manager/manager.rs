/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Float placement state for one block formatting context.
//!
//! See CSS 2.1 § 9.5.1: <https://www.w3.org/TR/CSS2/visuren.html#float-position>

use std::fmt;

use app_units::{Au, MAX_AU, MIN_AU};
use bitflags::bitflags;
use euclid::default::Size2D;
use euclid::num::Zero;
use geometry::{LogicalRect, WritingMode, checked_au_add};
use log::{trace, warn};
use rustc_hash::FxHashSet;

use crate::damage::FloatDamage;
use crate::float_info::{FloatInfo, ShapeType};
use crate::frame::{FloatFrame, FrameId};
use crate::style::{ClearSide, FloatSide};

/// What a flow area query asks for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BandInfoType {
    /// The band starting at the queried block position, shortened to the
    /// first block position where the set of intersecting floats changes.
    BandFromPoint,
    /// The inline space left over by every float intersecting the queried
    /// block range, which is not shortened.
    WidthWithinHeight,
}

/// The result of [`FloatManager::flow_area`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowAreaRect {
    /// The available area, in the coordinates of the queried content area.
    pub rect: LogicalRect<Au>,
    /// Whether a float moved an edge of the band inside the content area.
    pub has_floats: bool,
    /// Whether floats on both sides overlapped each other, leaving a band
    /// of negative inline size. `rect` then has zero inline size.
    pub inline_size_is_negative: bool,
}

impl FlowAreaRect {
    fn new(
        writing_mode: WritingMode,
        inline_start: Au,
        block_start: Au,
        inline_size: Au,
        block_size: Au,
        has_floats: bool,
    ) -> Self {
        let inline_size_is_negative = inline_size < Au::zero();
        FlowAreaRect {
            rect: LogicalRect::new(
                writing_mode,
                inline_start,
                block_start,
                inline_size.max(Au::zero()),
                block_size,
            ),
            has_floats,
            inline_size_is_negative,
        }
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct ClearFloatsFlags: u8 {
        /// Clear past the placed floats only, ignoring floats pushed to or
        /// continued in the next fragment.
        const DONT_CLEAR_PUSHED_FLOATS = 1 << 0;
    }
}

/// A checkpoint of a [`FloatManager`], restored with
/// [`FloatManager::pop_state`]. Float damage is not part of it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SavedState {
    line_left: Au,
    block_start: Au,
    pushed_left_float_past_break: bool,
    pushed_right_float_past_break: bool,
    split_left_float_across_break: bool,
    split_right_float_across_break: bool,
    float_count: usize,
}

impl SavedState {
    /// The number of floats placed when the checkpoint was taken.
    pub fn float_count(&self) -> usize {
        self.float_count
    }
}

/// The floats placed so far in a block formatting context, in the order
/// they were placed, which is also their block order.
///
/// Floats are stored in float-logical space, whose inline axis runs from
/// line-left to line-right. Callers work in the coordinates of the current
/// containing block and move the origin with [`FloatManager::translate`].
#[derive(Debug)]
pub struct FloatManager {
    writing_mode: WritingMode,
    /// Translation from the current containing block to float-logical space.
    line_left: Au,
    block_start: Au,
    floats: Vec<FloatInfo>,
    float_damage: FloatDamage,
    pushed_left_float_past_break: bool,
    pushed_right_float_past_break: bool,
    split_left_float_across_break: bool,
    split_right_float_across_break: bool,
}

impl FloatManager {
    pub fn new(writing_mode: WritingMode) -> Self {
        FloatManager {
            writing_mode,
            line_left: Au::zero(),
            block_start: Au::zero(),
            floats: Vec::new(),
            float_damage: FloatDamage::new(),
            pushed_left_float_past_break: false,
            pushed_right_float_past_break: false,
            split_left_float_across_break: false,
            split_right_float_across_break: false,
        }
    }

    /// Returns the manager to the state of [`FloatManager::new`], keeping
    /// its allocations.
    pub(crate) fn reset(&mut self, writing_mode: WritingMode) {
        self.writing_mode = writing_mode;
        self.line_left = Au::zero();
        self.block_start = Au::zero();
        self.floats.clear();
        self.float_damage.clear();
        self.pushed_left_float_past_break = false;
        self.pushed_right_float_past_break = false;
        self.split_left_float_across_break = false;
        self.split_right_float_across_break = false;
    }

    pub fn writing_mode(&self) -> WritingMode {
        self.writing_mode
    }

    /// Moves the origin of the current containing block by the given
    /// amounts.
    pub fn translate(&mut self, line_left: Au, block_start: Au) {
        self.line_left = self.line_left + line_left;
        self.block_start = self.block_start + block_start;
    }

    /// The accumulated translation, as `(line_left, block_start)`.
    pub fn translation(&self) -> (Au, Au) {
        (self.line_left, self.block_start)
    }

    pub fn has_any_floats(&self) -> bool {
        !self.floats.is_empty()
    }

    pub fn floats(&self) -> &[FloatInfo] {
        &self.floats
    }

    fn check_block_and_line_direction(&self, writing_mode: WritingMode) {
        if !self
            .writing_mode
            .has_same_block_and_line_direction(writing_mode)
        {
            debug_assert!(false, "incompatible writing modes");
            warn!(
                "Float manager in {} queried in incompatible writing mode {}",
                self.writing_mode, writing_mode
            );
        }
    }

    /// Returns the area of `content_area` available for content in the
    /// block range starting at `b_coord` with size `b_size`, which may be
    /// `MAX_AU`. Only the floats placed when `state` was taken are
    /// considered if it is given.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "FloatManager::flow_area",
            skip_all,
            fields(servo_profiling = true),
            level = "trace",
        )
    )]
    #[allow(clippy::too_many_arguments)]
    pub fn flow_area(
        &self,
        writing_mode: WritingMode,
        b_coord: Au,
        b_size: Au,
        band_info_type: BandInfoType,
        shape_type: ShapeType,
        content_area: LogicalRect<Au>,
        state: Option<&SavedState>,
        container_size: Size2D<Au>,
    ) -> FlowAreaRect {
        self.check_block_and_line_direction(writing_mode);
        debug_assert!(b_size >= Au::zero(), "unexpected max block size");
        debug_assert!(
            content_area.size.inline >= Au::zero(),
            "unexpected content area inline size"
        );

        let block_start = checked_au_add(b_coord, self.block_start).unwrap_or_else(|| {
            warn!("Flow area block start {:?} out of range", b_coord);
            if b_coord < Au::zero() { MIN_AU } else { MAX_AU }
        });

        let float_count = match state {
            Some(state) => {
                debug_assert!(state.float_count <= self.floats.len(), "bad state");
                state.float_count.min(self.floats.len())
            },
            None => self.floats.len(),
        };
        let floats = &self.floats[..float_count];

        // Below every float, the whole content area is free.
        let below_all_floats = floats
            .last()
            .is_none_or(|last| last.left_b_end <= block_start && last.right_b_end <= block_start);
        if below_all_floats {
            return FlowAreaRect::new(
                writing_mode,
                content_area.start.i,
                b_coord,
                content_area.size.inline,
                b_size,
                false,
            );
        }

        let mut block_end = if b_size == MAX_AU {
            if band_info_type != BandInfoType::BandFromPoint {
                warn!("Unbounded flow area height for a width within height query");
            }
            MAX_AU
        } else {
            checked_au_add(block_start, b_size).unwrap_or_else(|| {
                warn!("Flow area block end out of range");
                MAX_AU
            })
        };

        let mut line_left = self.line_left + content_area.line_left(writing_mode, container_size);
        let mut line_right = self.line_left + content_area.line_right(writing_mode, container_size);
        if line_right < line_left {
            warn!("Flow area content area has negative inline size");
            line_right = line_left;
        }

        let mut has_floats = false;
        for info in floats.iter().rev() {
            if info.left_b_end <= block_start && info.right_b_end <= block_start {
                // No earlier float can reach into the band either.
                break;
            }
            // https://drafts.csswg.org/css-shapes/#relation-to-box-model-and-float-behavior
            if info.is_empty(shape_type) {
                continue;
            }

            let float_b_start = info.b_start(shape_type);
            let float_b_end = info.b_end(shape_type);
            if block_start < float_b_start && band_info_type == BandInfoType::BandFromPoint {
                // The float is below the band.
                block_end = block_end.min(float_b_start);
                continue;
            }

            // A zero-height band touching the block start of a float counts as
            // intersecting it, so a width within height query is never wider
            // than the band from point query starting at the same position.
            let intersects = block_start < float_b_end &&
                (float_b_start < block_end ||
                    (float_b_start == block_end && block_start == block_end));
            if !intersects {
                continue;
            }

            // A band from point query only looks at the line through its
            // block start.
            let band_b_end = match band_info_type {
                BandInfoType::BandFromPoint => block_start,
                BandInfoType::WidthWithinHeight => block_end,
            };
            match info.side() {
                FloatSide::Left => {
                    let edge = info.line_right(shape_type, block_start, band_b_end);
                    if edge > line_left {
                        line_left = edge;
                        has_floats = true;
                    }
                },
                FloatSide::Right => {
                    let edge = info.line_left(shape_type, block_start, band_b_end);
                    if edge < line_right {
                        line_right = edge;
                        has_floats = true;
                    }
                },
            }
            trace!(
                "Float {:?} narrows the band to {:?}..{:?}",
                info.frame(),
                line_left,
                line_right
            );

            if band_info_type == BandInfoType::BandFromPoint {
                block_end = block_end.min(float_b_end);
            }
        }

        let block_size = if block_end == MAX_AU {
            MAX_AU
        } else {
            block_end - block_start
        };
        let inline_start = if writing_mode.is_bidi_ltr() {
            line_left - self.line_left
        } else {
            self.line_left - line_right + writing_mode.container_inline_size(container_size)
        };
        FlowAreaRect::new(
            writing_mode,
            inline_start,
            block_start - self.block_start,
            line_right - line_left,
            block_size,
            has_floats,
        )
    }

    /// Places a float whose margin box is `margin_rect`, below every float
    /// already placed.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "FloatManager::add_float",
            skip_all,
            fields(servo_profiling = true),
            level = "trace",
        )
    )]
    pub fn add_float<F: FloatFrame + ?Sized>(
        &mut self,
        frame: &F,
        margin_rect: &LogicalRect<Au>,
        writing_mode: WritingMode,
        container_size: Size2D<Au>,
    ) {
        self.check_block_and_line_direction(writing_mode);
        debug_assert!(margin_rect.size.inline >= Au::zero(), "negative inline size");
        debug_assert!(margin_rect.size.block >= Au::zero(), "negative block size");

        let Some(side) =
            FloatSide::from_style_and_container_writing_mode(frame.float_style(), writing_mode)
        else {
            debug_assert!(false, "adding a box that does not float");
            warn!("Ignoring non-floating box {:?}", frame.id());
            return;
        };

        let mut info = FloatInfo::new(
            frame,
            side,
            self.line_left,
            self.block_start,
            margin_rect,
            writing_mode,
            container_size,
        );
        if let Some(tail) = self.floats.last() {
            info.left_b_end = tail.left_b_end;
            info.right_b_end = tail.right_b_end;
        }
        let b_end = info.b_end(ShapeType::Margin);
        let side_b_end = match side {
            FloatSide::Left => &mut info.left_b_end,
            FloatSide::Right => &mut info.right_b_end,
        };
        *side_b_end = (*side_b_end).max(b_end);

        trace!("Adding {:?} float {:?} at {:?}", side, info.frame(), info.rect());
        self.floats.push(info);
    }

    /// Removes the floats at the end of the list that belong to `frames`.
    pub fn remove_trailing_regions(&mut self, frames: &[FrameId]) {
        if frames.is_empty() {
            return;
        }
        let frames: FxHashSet<FrameId> = frames.iter().copied().collect();
        let kept = self
            .floats
            .iter()
            .rposition(|info| !frames.contains(&info.frame()))
            .map_or(0, |index| index + 1);
        self.floats.truncate(kept);

        debug_assert!(
            self.floats.iter().all(|info| !frames.contains(&info.frame())),
            "float region deletion was requested but could not be done"
        );
    }

    pub fn push_state(&self) -> SavedState {
        SavedState {
            line_left: self.line_left,
            block_start: self.block_start,
            pushed_left_float_past_break: self.pushed_left_float_past_break,
            pushed_right_float_past_break: self.pushed_right_float_past_break,
            split_left_float_across_break: self.split_left_float_across_break,
            split_right_float_across_break: self.split_right_float_across_break,
            float_count: self.floats.len(),
        }
    }

    /// Restores a checkpoint, dropping the floats placed since. Float damage
    /// accumulated since the checkpoint is kept.
    pub fn pop_state(&mut self, state: &SavedState) {
        self.line_left = state.line_left;
        self.block_start = state.block_start;
        self.pushed_left_float_past_break = state.pushed_left_float_past_break;
        self.pushed_right_float_past_break = state.pushed_right_float_past_break;
        self.split_left_float_across_break = state.split_left_float_across_break;
        self.split_right_float_across_break = state.split_right_float_across_break;

        debug_assert!(
            state.float_count <= self.floats.len(),
            "somebody misused push_state/pop_state"
        );
        self.floats.truncate(state.float_count);
    }

    /// Checks that nothing changed since `state` was taken.
    pub fn assert_state_matches(&self, state: &SavedState) {
        debug_assert_eq!(
            self.push_state(),
            *state,
            "float manager state should match saved state"
        );
    }

    /// The block start of the last placed float, `MAX_AU` if a float was
    /// pushed to the next fragment, or `MIN_AU` if there are no floats.
    pub fn lowest_float_top(&self) -> Au {
        if self.pushed_left_float_past_break || self.pushed_right_float_past_break {
            return MAX_AU;
        }
        match self.floats.last() {
            Some(last) => last.b_start(ShapeType::Margin) - self.block_start,
            None => MIN_AU,
        }
    }

    /// Returns the block position at or below `b_coord` that clears the
    /// floats on `clear`, or `MAX_AU` when a float on a cleared side
    /// continues in the next fragment.
    pub fn clear_floats(&self, b_coord: Au, clear: ClearSide, flags: ClearFloatsFlags) -> Au {
        if !flags.contains(ClearFloatsFlags::DONT_CLEAR_PUSHED_FLOATS) &&
            self.clear_continues(clear)
        {
            return MAX_AU;
        }
        let Some(tail) = self.floats.last() else {
            return b_coord;
        };

        let mut block_end = b_coord + self.block_start;
        if clear.clears_left() {
            block_end = block_end.max(tail.left_b_end);
        }
        if clear.clears_right() {
            block_end = block_end.max(tail.right_b_end);
        }
        block_end - self.block_start
    }

    /// Whether clearing `clear` has to continue into the next fragment
    /// because a float on a cleared side was pushed or split there.
    pub fn clear_continues(&self, clear: ClearSide) -> bool {
        ((self.pushed_left_float_past_break || self.split_left_float_across_break) &&
            clear.clears_left()) ||
            ((self.pushed_right_float_past_break || self.split_right_float_across_break) &&
                clear.clears_right())
    }

    pub fn set_pushed_left_float_past_break(&mut self) {
        self.pushed_left_float_past_break = true;
    }

    pub fn set_pushed_right_float_past_break(&mut self) {
        self.pushed_right_float_past_break = true;
    }

    pub fn set_split_left_float_across_break(&mut self) {
        self.split_left_float_across_break = true;
    }

    pub fn set_split_right_float_across_break(&mut self) {
        self.split_right_float_across_break = true;
    }

    pub fn pushed_left_float_past_break(&self) -> bool {
        self.pushed_left_float_past_break
    }

    pub fn pushed_right_float_past_break(&self) -> bool {
        self.pushed_right_float_past_break
    }

    pub fn split_left_float_across_break(&self) -> bool {
        self.split_left_float_across_break
    }

    pub fn split_right_float_across_break(&self) -> bool {
        self.split_right_float_across_break
    }

    /// Marks `b_start..=b_end`, in the current containing block, as damaged.
    pub fn include_in_damage(&mut self, b_start: Au, b_end: Au) {
        self.float_damage
            .include(b_start + self.block_start, b_end + self.block_start);
    }

    pub fn has_float_damage(&self) -> bool {
        !self.float_damage.is_empty()
    }

    pub fn intersects_damage(&self, b_start: Au, b_end: Au) -> bool {
        self.float_damage
            .intersects(b_start + self.block_start, b_end + self.block_start)
    }

    pub fn float_damage(&self) -> &FloatDamage {
        &self.float_damage
    }

    /// Writes one line per float: its margin box in float-logical space and
    /// the block end watermarks.
    pub fn list(&self, out: &mut impl fmt::Write) -> fmt::Result {
        for (index, info) in self.floats.iter().enumerate() {
            let rect = info.rect();
            writeln!(
                out,
                "Float {}: frame={:?} rect={{{},{},{},{}}} BEnd={{l:{}, r:{}}}",
                index,
                info.frame(),
                rect.origin.x.0,
                rect.origin.y.0,
                rect.size.width.0,
                rect.size.height.0,
                info.left_b_end.0,
                info.right_b_end.0,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use euclid::default::{Point2D, Rect, SideOffsets2D};
    use geometry::{Direction, WritingModeProperty};

    use super::*;
    use crate::frame::AlphaMask;
    use crate::style::{ShapeOutside, StyleFloat};

    struct Float {
        id: u64,
        float: StyleFloat,
        shape_outside: ShapeOutside,
    }

    impl Float {
        fn new(id: u64, float: StyleFloat) -> Self {
            Float {
                id,
                float,
                shape_outside: ShapeOutside::None,
            }
        }
    }

    impl FloatFrame for Float {
        fn id(&self) -> FrameId {
            FrameId(self.id)
        }
        fn float_style(&self) -> StyleFloat {
            self.float
        }
        fn shape_outside(&self) -> &ShapeOutside {
            &self.shape_outside
        }
        fn rect(&self) -> Rect<Au> {
            Rect::zero()
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

    fn container() -> Size2D<Au> {
        Size2D::new(Au(200), Au(1000))
    }

    fn ltr() -> WritingMode {
        WritingMode::horizontal_tb()
    }

    fn rect(mode: WritingMode, i: i32, b: i32, inline: i32, block: i32) -> LogicalRect<Au> {
        LogicalRect::new(mode, Au(i), Au(b), Au(inline), Au(block))
    }

    fn add(manager: &mut FloatManager, id: u64, float: StyleFloat, margin_rect: LogicalRect<Au>) {
        let mode = manager.writing_mode();
        manager.add_float(&Float::new(id, float), &margin_rect, mode, container());
    }

    fn query(manager: &FloatManager, b_coord: i32, b_size: Au, kind: BandInfoType) -> FlowAreaRect {
        let mode = manager.writing_mode();
        manager.flow_area(
            mode,
            Au(b_coord),
            b_size,
            kind,
            ShapeType::ShapeOutside,
            rect(mode, 0, 0, 200, 0),
            None,
            container(),
        )
    }

    #[test]
    fn band_from_point_stops_at_the_next_float_edge() {
        let mut manager = FloatManager::new(ltr());
        add(&mut manager, 1, StyleFloat::Left, rect(ltr(), 0, 0, 50, 100));
        add(&mut manager, 2, StyleFloat::Right, rect(ltr(), 150, 40, 50, 100));

        let area = query(&manager, 0, MAX_AU, BandInfoType::BandFromPoint);
        assert_eq!(area.rect.start.i, Au(50));
        assert_eq!(area.rect.size.inline, Au(150));
        assert_eq!(area.rect.size.block, Au(40));
        assert!(area.has_floats);

        let area = query(&manager, 40, MAX_AU, BandInfoType::BandFromPoint);
        assert_eq!(area.rect.size.inline, Au(100));
        assert_eq!(area.rect.size.block, Au(60));

        let area = query(&manager, 100, MAX_AU, BandInfoType::BandFromPoint);
        assert_eq!(area.rect.start.i, Au(0));
        assert_eq!(area.rect.size.inline, Au(150));
        assert_eq!(area.rect.size.block, Au(40));

        let area = query(&manager, 140, MAX_AU, BandInfoType::BandFromPoint);
        assert!(!area.has_floats);
        assert_eq!(area.rect.size.block, MAX_AU);
    }

    #[test]
    fn width_within_height_considers_the_whole_range() {
        let mut manager = FloatManager::new(ltr());
        add(&mut manager, 1, StyleFloat::Left, rect(ltr(), 0, 0, 50, 100));
        add(&mut manager, 2, StyleFloat::Right, rect(ltr(), 150, 40, 50, 100));

        let area = query(&manager, 0, Au(60), BandInfoType::WidthWithinHeight);
        assert_eq!(area.rect.start.i, Au(50));
        assert_eq!(area.rect.size.inline, Au(100));
        assert_eq!(area.rect.size.block, Au(60));

        // A zero-height band touching the top of the right float.
        let area = query(&manager, 40, Au(0), BandInfoType::WidthWithinHeight);
        assert_eq!(area.rect.size.inline, Au(100));
    }

    #[test]
    fn overlapping_floats_report_negative_width() {
        let mut manager = FloatManager::new(ltr());
        add(&mut manager, 1, StyleFloat::Left, rect(ltr(), 0, 0, 150, 100));
        add(&mut manager, 2, StyleFloat::Right, rect(ltr(), 100, 0, 100, 100));

        let area = query(&manager, 10, Au(10), BandInfoType::WidthWithinHeight);
        assert!(area.inline_size_is_negative);
        assert_eq!(area.rect.size.inline, Au(0));
        assert_eq!(area.rect.start.i, Au(150));
    }

    #[test]
    fn translation_applies_to_new_floats_and_queries() {
        let mut manager = FloatManager::new(ltr());
        manager.translate(Au(20), Au(30));
        add(&mut manager, 1, StyleFloat::Left, rect(ltr(), 0, 0, 50, 100));
        assert_eq!(manager.floats()[0].rect().origin, Point2D::new(Au(20), Au(30)));

        let area = query(&manager, 10, Au(10), BandInfoType::WidthWithinHeight);
        assert_eq!(area.rect.start.i, Au(50));
        assert_eq!(area.rect.start.b, Au(10));

        manager.translate(Au(-20), Au(-30));
        assert_eq!(manager.translation(), (Au(0), Au(0)));
        let area = query(&manager, 35, Au(10), BandInfoType::WidthWithinHeight);
        assert_eq!(area.rect.start.i, Au(70));
        assert_eq!(manager.lowest_float_top(), Au(30));
    }

    #[test]
    fn rtl_inline_start_is_measured_from_the_right() {
        let rtl = WritingMode::new(WritingModeProperty::HorizontalTb, Direction::Rtl);
        let mut manager = FloatManager::new(rtl);
        // inline-start in RTL is the right side; 50 wide at the right edge.
        add(&mut manager, 1, StyleFloat::InlineStart, rect(rtl, 0, 0, 50, 100));
        assert_eq!(manager.floats()[0].side(), FloatSide::Right);
        assert_eq!(manager.floats()[0].rect().origin.x, Au(150));

        let area = query(&manager, 10, Au(10), BandInfoType::WidthWithinHeight);
        assert_eq!(area.rect.start.i, Au(50));
        assert_eq!(area.rect.size.inline, Au(150));
        assert!(area.has_floats);
    }

    #[test]
    fn vertical_modes_share_block_direction_checks() {
        let vertical_rl = WritingMode::new(WritingModeProperty::VerticalRl, Direction::Ltr);
        let rtl = WritingMode::new(WritingModeProperty::VerticalRl, Direction::Rtl);
        let manager = FloatManager::new(vertical_rl);
        let area = manager.flow_area(
            rtl,
            Au(0),
            Au(10),
            BandInfoType::WidthWithinHeight,
            ShapeType::Margin,
            rect(rtl, 5, 0, 100, 0),
            None,
            container(),
        );
        assert_eq!(area.rect.start.i, Au(5));
        assert_eq!(area.rect.size.inline, Au(100));
    }

    #[test]
    fn checkpoint_limits_visible_floats() {
        let mut manager = FloatManager::new(ltr());
        add(&mut manager, 1, StyleFloat::Left, rect(ltr(), 0, 0, 50, 100));
        let state = manager.push_state();
        add(&mut manager, 2, StyleFloat::Left, rect(ltr(), 50, 0, 50, 100));

        let mode = ltr();
        let area = manager.flow_area(
            mode,
            Au(0),
            Au(10),
            BandInfoType::WidthWithinHeight,
            ShapeType::Margin,
            rect(mode, 0, 0, 200, 0),
            Some(&state),
            container(),
        );
        assert_eq!(area.rect.start.i, Au(50));

        manager.pop_state(&state);
        assert_eq!(manager.floats().len(), 1);
        manager.assert_state_matches(&state);
    }

    #[test]
    fn block_start_below_min_au_is_clamped() {
        let mut manager = FloatManager::new(ltr());
        add(&mut manager, 1, StyleFloat::Left, rect(ltr(), 0, 0, 50, 100));
        manager.translate(Au(0), Au(-100));

        // MIN_AU + 10 - 100 is out of range, so the band starts at MIN_AU and
        // runs down to the top of the float.
        let area = query(&manager, MIN_AU.0 + 10, MAX_AU, BandInfoType::BandFromPoint);
        assert_eq!(area.rect.start.b, MIN_AU + Au(100));
        assert_eq!(area.rect.start.i, Au(0));
        assert_eq!(area.rect.size.inline, Au(200));
        assert_eq!(area.rect.size.block, Au(0) - MIN_AU);
        assert!(!area.has_floats);
    }

    #[test]
    fn block_start_above_max_au_is_clamped() {
        let mut manager = FloatManager::new(ltr());
        manager.translate(Au(0), Au(100));
        add(&mut manager, 1, StyleFloat::Left, rect(ltr(), 0, 0, 50, 100));

        // The clamped block start lies below every float.
        let area = query(&manager, MAX_AU.0 - 10, Au(20), BandInfoType::WidthWithinHeight);
        assert_eq!(area.rect.start.b, MAX_AU - Au(10));
        assert_eq!(area.rect.start.i, Au(0));
        assert_eq!(area.rect.size.inline, Au(200));
        assert_eq!(area.rect.size.block, Au(20));
        assert!(!area.has_floats);
    }

    #[test]
    fn overflowing_block_end_is_unbounded() {
        let mut manager = FloatManager::new(ltr());
        add(&mut manager, 1, StyleFloat::Left, rect(ltr(), 0, 0, 50, 100));

        let area = query(&manager, 50, MAX_AU - Au(10), BandInfoType::WidthWithinHeight);
        assert_eq!(area.rect.start.b, Au(50));
        assert_eq!(area.rect.size.block, MAX_AU);
        assert_eq!(area.rect.start.i, Au(50));
        assert_eq!(area.rect.size.inline, Au(150));
        assert!(area.has_floats);
    }

    fn query_with_stale_state() -> FlowAreaRect {
        let mut manager = FloatManager::new(ltr());
        add(&mut manager, 1, StyleFloat::Left, rect(ltr(), 0, 0, 50, 100));
        add(&mut manager, 2, StyleFloat::Left, rect(ltr(), 50, 0, 50, 100));
        let state = manager.push_state();
        manager.remove_trailing_regions(&[FrameId(2)]);
        assert_eq!(state.float_count(), 2);
        assert_eq!(manager.floats().len(), 1);

        let mode = ltr();
        manager.flow_area(
            mode,
            Au(10),
            Au(10),
            BandInfoType::WidthWithinHeight,
            ShapeType::Margin,
            rect(mode, 0, 0, 200, 0),
            Some(&state),
            container(),
        )
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "bad state")]
    fn stale_state_asserts() {
        query_with_stale_state();
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn stale_state_only_sees_remaining_floats() {
        let area = query_with_stale_state();
        assert_eq!(area.rect.start.i, Au(50));
        assert_eq!(area.rect.size.inline, Au(150));
        assert!(area.has_floats);
    }

    #[test]
    fn damage_survives_pop_state() {
        let mut manager = FloatManager::new(ltr());
        let state = manager.push_state();
        manager.translate(Au(0), Au(100));
        manager.include_in_damage(Au(0), Au(10));
        manager.pop_state(&state);
        assert!(manager.has_float_damage());
        assert!(manager.intersects_damage(Au(105), Au(120)));
        assert!(!manager.intersects_damage(Au(0), Au(99)));
    }

    #[test]
    fn clearance() {
        let mut manager = FloatManager::new(ltr());
        let flags = ClearFloatsFlags::empty();
        assert_eq!(manager.clear_floats(Au(5), ClearSide::Both, flags), Au(5));
        assert_eq!(manager.lowest_float_top(), MIN_AU);

        add(&mut manager, 1, StyleFloat::Left, rect(ltr(), 0, 10, 50, 100));
        add(&mut manager, 2, StyleFloat::Right, rect(ltr(), 150, 20, 50, 30));
        assert_eq!(manager.clear_floats(Au(5), ClearSide::Left, flags), Au(110));
        assert_eq!(manager.clear_floats(Au(5), ClearSide::Right, flags), Au(50));
        assert_eq!(manager.clear_floats(Au(5), ClearSide::None, flags), Au(5));
        assert_eq!(manager.clear_floats(Au(200), ClearSide::Both, flags), Au(200));
        assert_eq!(manager.lowest_float_top(), Au(20));

        manager.set_split_right_float_across_break();
        assert!(manager.clear_continues(ClearSide::Right));
        assert_eq!(manager.clear_floats(Au(5), ClearSide::Right, flags), MAX_AU);
        assert_eq!(
            manager.clear_floats(
                Au(5),
                ClearSide::Right,
                ClearFloatsFlags::DONT_CLEAR_PUSHED_FLOATS
            ),
            Au(50)
        );
        // Splitting does not affect the lowest float top, pushing does.
        assert_eq!(manager.lowest_float_top(), Au(20));
        manager.set_pushed_left_float_past_break();
        assert_eq!(manager.lowest_float_top(), MAX_AU);
    }

    #[test]
    fn remove_trailing_regions_stops_at_the_first_other_frame() {
        let mut manager = FloatManager::new(ltr());
        add(&mut manager, 1, StyleFloat::Left, rect(ltr(), 0, 0, 10, 10));
        add(&mut manager, 2, StyleFloat::Left, rect(ltr(), 0, 10, 10, 10));
        add(&mut manager, 3, StyleFloat::Right, rect(ltr(), 0, 20, 10, 10));
        manager.remove_trailing_regions(&[FrameId(3), FrameId(2)]);
        assert_eq!(manager.floats().len(), 1);
        manager.remove_trailing_regions(&[]);
        assert_eq!(manager.floats().len(), 1);
    }

    #[test]
    fn list_dumps_every_float() {
        let mut manager = FloatManager::new(ltr());
        add(&mut manager, 1, StyleFloat::Left, rect(ltr(), 0, 0, 10, 20));
        let mut out = String::new();
        manager.list(&mut out).unwrap();
        assert_eq!(
            out,
            "Float 0: frame=FrameId(1) rect={0,0,10,20} BEnd={l:20, r:-1073741823}\n"
        );
    }
}
