/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::cell::{Cell, RefCell};

use geometry::WritingMode;
use log::debug;

use crate::manager::FloatManager;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    /// The most released managers kept around for reuse.
    pub cache_size: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig { cache_size: 4 }
    }
}

/// A small cache of float managers, so that nested block formatting
/// contexts do not allocate a new float list each time.
///
/// The pool belongs to one layout thread.
#[derive(Debug, Default)]
pub struct FloatManagerPool {
    config: PoolConfig,
    cache: RefCell<Vec<Box<FloatManager>>>,
    shut_down: Cell<bool>,
}

impl FloatManagerPool {
    pub fn new(config: PoolConfig) -> Self {
        FloatManagerPool {
            config,
            cache: RefCell::new(Vec::with_capacity(config.cache_size)),
            shut_down: Cell::new(false),
        }
    }

    /// Returns an empty float manager for `writing_mode`, reusing a cached
    /// one if possible.
    pub fn acquire(&self, writing_mode: WritingMode) -> Box<FloatManager> {
        let cached = self.cache.borrow_mut().pop();
        match cached {
            Some(mut manager) => {
                manager.reset(writing_mode);
                manager
            },
            None => Box::new(FloatManager::new(writing_mode)),
        }
    }

    /// Gives back a manager obtained from [`FloatManagerPool::acquire`]. It
    /// is dropped if the cache is full or the pool was shut down.
    pub fn release(&self, manager: Box<FloatManager>) {
        if self.shut_down.get() {
            return;
        }
        let mut cache = self.cache.borrow_mut();
        if cache.len() < self.config.cache_size {
            cache.push(manager);
        }
    }

    /// Drops every cached manager and stops caching released ones.
    pub fn shutdown(&self) {
        let dropped = std::mem::take(&mut *self.cache.borrow_mut());
        debug!("Shutting down float manager pool, dropping {}", dropped.len());
        self.shut_down.set(true);
    }

    pub fn cached_count(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.get()
    }

    pub fn config(&self) -> PoolConfig {
        self.config
    }
}
