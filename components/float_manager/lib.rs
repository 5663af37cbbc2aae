/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Placement of CSS floats and queries for the space they leave to content
//! in a block formatting context, including `shape-outside` areas.

mod auto;
mod damage;
mod float_info;
mod frame;
mod manager;
mod pool;
mod region;
pub mod shapes;
mod style;

pub use crate::auto::{AutoFloatManager, FloatManagerHolder};
pub use crate::damage::FloatDamage;
pub use crate::float_info::{FloatInfo, ShapeType};
pub use crate::frame::{AlphaMask, FloatFrame, FrameId};
pub use crate::manager::{BandInfoType, ClearFloatsFlags, FloatManager, FlowAreaRect, SavedState};
pub use crate::pool::{FloatManagerPool, PoolConfig};
pub use crate::region::{FloatRegionStore, calculate_region_for};
pub use crate::shapes::{ShapeError, ShapeInfo};
pub use crate::style::{
    BasicShape, ClearSide, FloatSide, ReferenceBox, ShapeOutside, ShapeRadius, StyleClear,
    StyleFloat,
};
