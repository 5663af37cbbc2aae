/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::mem;
use std::ops::{Deref, DerefMut};

use geometry::WritingMode;
use log::{debug, warn};

use crate::manager::FloatManager;
use crate::pool::FloatManagerPool;

/// A layout context that holds the float manager of the block formatting
/// context being laid out.
pub trait FloatManagerHolder {
    fn writing_mode(&self) -> WritingMode;
    fn float_manager_slot(&mut self) -> &mut Option<Box<FloatManager>>;
}

/// Installs a fresh float manager in a layout context for the duration of a
/// nested block formatting context, and puts the outer one back when
/// dropped, including while unwinding.
pub struct AutoFloatManager<'a, C: FloatManagerHolder> {
    context: &'a mut C,
    pool: &'a FloatManagerPool,
    /// The manager that was installed before, once a nested one was
    /// created.
    old: Option<Option<Box<FloatManager>>>,
}

impl<'a, C: FloatManagerHolder> AutoFloatManager<'a, C> {
    pub fn new(context: &'a mut C, pool: &'a FloatManagerPool) -> Self {
        AutoFloatManager {
            context,
            pool,
            old: None,
        }
    }

    /// Installs a new float manager, in the writing mode of the context.
    pub fn create_float_manager(&mut self) {
        if self.old.is_some() {
            debug_assert!(false, "float manager already created");
            warn!("Float manager already created for this scope");
            return;
        }

        let manager = self.pool.acquire(self.context.writing_mode());
        let old = mem::replace(self.context.float_manager_slot(), Some(manager));
        debug!(
            "Created nested float manager (outer manager present: {})",
            old.is_some()
        );
        self.old = Some(old);
    }

    pub fn has_created_float_manager(&self) -> bool {
        self.old.is_some()
    }
}

impl<C: FloatManagerHolder> Drop for AutoFloatManager<'_, C> {
    fn drop(&mut self) {
        let Some(old) = self.old.take() else {
            return;
        };
        if let Some(nested) = mem::replace(self.context.float_manager_slot(), old) {
            self.pool.release(nested);
        }
    }
}

impl<C: FloatManagerHolder> Deref for AutoFloatManager<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        &*self.context
    }
}

impl<C: FloatManagerHolder> DerefMut for AutoFloatManager<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut *self.context
    }
}
