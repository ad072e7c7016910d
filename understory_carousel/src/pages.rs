// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Memoized physical page sequence.

use alloc::vec::Vec;

use crate::{RingMapping, pad};

/// The physical page sequence derived from a logical one.
///
/// The padded sequence is recomputed only when [`sync`](Self::sync) sees
/// different logical content, so hosts can call it on every render without
/// paying for a rebuild or re-rendering pages that did not change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaddedPages<T> {
    physical: Vec<T>,
    mapping: RingMapping,
}

impl<T: Clone> PaddedPages<T> {
    /// Derives the physical sequence for `items`.
    #[must_use]
    pub fn new(items: &[T]) -> Self {
        Self {
            physical: pad(items),
            mapping: RingMapping::new(items.len()),
        }
    }

    /// Pages in the order the pager should render them.
    #[must_use]
    pub fn physical(&self) -> &[T] {
        &self.physical
    }

    /// The logical items, without sentinels.
    #[must_use]
    pub fn logical(&self) -> &[T] {
        if self.mapping.is_padded() {
            &self.physical[1..self.physical.len() - 1]
        } else {
            &self.physical
        }
    }

    /// Index arithmetic for the current sequence.
    #[must_use]
    pub const fn mapping(&self) -> RingMapping {
        self.mapping
    }

    /// Number of physical pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.physical.len()
    }

    /// Returns `true` if there are no pages at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.physical.is_empty()
    }

    /// Item shown on a physical page.
    #[must_use]
    pub fn get(&self, physical: usize) -> Option<&T> {
        self.physical.get(physical)
    }
}

impl<T: Clone + PartialEq> PaddedPages<T> {
    /// Re-derives the physical sequence if `items` differs from the held one.
    ///
    /// Returns `true` when the pages changed.
    pub fn sync(&mut self, items: &[T]) -> bool {
        if self.logical() == items {
            return false;
        }
        self.physical = pad(items);
        self.mapping = RingMapping::new(items.len());
        true
    }
}
