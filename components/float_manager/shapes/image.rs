/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use app_units::{Au, MAX_AU, MIN_AU};
use euclid::default::{Point2D, Rect, Size2D, Vector2D};
use geometry::WritingMode;
use log::warn;

use super::to_float_logical_point;
use crate::frame::AlphaMask;

/// An image `shape-outside`, stored as one interval per device pixel row
/// (or column, in vertical writing modes) holding the inline extent of the
/// pixels above the alpha threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageShape {
    /// Sorted by ascending block start. Each interval is one device pixel
    /// tall in the block axis.
    intervals: Vec<Rect<Au>>,
    b_start: Au,
    b_end: Au,
}

impl ImageShape {
    /// Scans `mask`, laid out over `content_rect`. The mask is only read
    /// during construction.
    pub fn new(
        mask: &AlphaMask,
        app_units_per_device_pixel: i32,
        threshold: f32,
        content_rect: Rect<Au>,
        writing_mode: WritingMode,
        container_size: Size2D<Au>,
    ) -> Self {
        debug_assert!(
            (0.0..=1.0).contains(&threshold),
            "shape-image-threshold out of range"
        );
        if !mask.is_well_formed() {
            warn!("Malformed shape-outside image mask {:?}", mask.size);
            return ImageShape {
                intervals: Vec::new(),
                b_start: MAX_AU,
                b_end: MIN_AU,
            };
        }

        // https://drafts.csswg.org/css-shapes-1/#valdef-shape-image-threshold-number
        let threshold = (threshold * 255.0).floor().clamp(0.0, 255.0) as u8;
        let au = app_units_per_device_pixel;
        let vertical = writing_mode.is_vertical();
        let (width, height) = (mask.size.width.max(0), mask.size.height.max(0));
        let (b_size, i_size) = if vertical {
            (width, height)
        } else {
            (height, width)
        };

        // Pixels are scanned from the top left of the content box, row by row
        // in horizontal writing modes and column by column in vertical ones.
        let origin = to_float_logical_point(content_rect.origin, writing_mode, container_size);
        let mut intervals = Vec::new();
        for b in 0..b_size {
            let mut inside = (0..i_size).filter(|&i| {
                let (column, row) = if vertical { (b, i) } else { (i, b) };
                mask.alpha(column as usize, row as usize) > threshold
            });
            let Some(i_min) = inside.next() else {
                continue;
            };
            let i_max = inside.last().unwrap_or(i_min);

            let size = Size2D::new(Au((i_max + 1 - i_min) * au), Au(au));
            let offset = if writing_mode.is_vertical_rl() {
                // vertical-rl and sideways-rl start at the top right: blocks
                // advance in the negative direction.
                Vector2D::new(Au(i_min * au), Au(-(b + 1) * au))
            } else if writing_mode.is_vertical_lr() && writing_mode.is_sideways() {
                // sideways-lr starts at the bottom left: inline positions
                // advance in the negative direction.
                Vector2D::new(Au(-(i_max + 1) * au), Au(b * au))
            } else {
                Vector2D::new(Au(i_min * au), Au(b * au))
            };
            intervals.push(Rect::new(origin + offset, size));
        }

        if writing_mode.is_vertical_rl() {
            intervals.reverse();
        }

        let (b_start, b_end) = match (intervals.first(), intervals.last()) {
            (Some(first), Some(last)) => (first.min_y(), last.max_y()),
            _ => (MAX_AU, MIN_AU),
        };
        ImageShape {
            intervals,
            b_start,
            b_end,
        }
    }

    pub fn intervals(&self) -> &[Rect<Au>] {
        &self.intervals
    }

    /// The index of the first interval containing `target`, or the number of
    /// intervals if none does.
    fn min_interval_index_containing(&self, target: Au) -> usize {
        let mut start = 0;
        let mut end = self.intervals.len();
        while start < end {
            let mid = start + (end - start) / 2;
            let interval = &self.intervals[mid];
            if interval.min_y() <= target && target < interval.max_y() {
                return mid;
            }
            if interval.min_y() < target {
                start = mid + 1;
            } else {
                end = mid;
            }
        }
        end
    }

    fn line_edge(&self, b_start: Au, b_end: Au, left: bool) -> Au {
        debug_assert!(b_start <= b_end, "band block start is after its block end");

        let first = self.min_interval_index_containing(b_start);
        let overlapping = self.intervals[first..]
            .iter()
            .take_while(|interval| interval.min_y() <= b_end);
        if left {
            overlapping
                .map(|interval| interval.min_x())
                .fold(MAX_AU, Au::min)
        } else {
            overlapping
                .map(|interval| interval.max_x())
                .fold(MIN_AU, Au::max)
        }
    }

    pub fn line_left(&self, b_start: Au, b_end: Au) -> Au {
        self.line_edge(b_start, b_end, true)
    }

    pub fn line_right(&self, b_start: Au, b_end: Au) -> Au {
        self.line_edge(b_start, b_end, false)
    }

    pub fn b_start(&self) -> Au {
        self.b_start
    }

    pub fn b_end(&self) -> Au {
        self.b_end
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn translate(&mut self, line_left: Au, block_start: Au) {
        let offset = Vector2D::new(line_left, block_start);
        for interval in self.intervals.iter_mut() {
            *interval = interval.translate(offset);
        }
        self.b_start = self.b_start + block_start;
        self.b_end = self.b_end + block_start;
    }
}
