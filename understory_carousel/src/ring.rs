// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sentinel padding and the physical/logical index arithmetic built on it.

use alloc::vec::Vec;

/// Pads a logical sequence with boundary clones so a linear pager can wrap.
///
/// For two or more items the result is `[last, ..items, first]`. Shorter
/// inputs are returned unchanged: there is nothing to wrap around.
///
/// ```rust
/// use understory_carousel::pad;
///
/// assert_eq!(pad(&["A", "B", "C"]), ["C", "A", "B", "C", "A"]);
/// assert_eq!(pad(&["A"]), ["A"]);
/// assert!(pad::<&str>(&[]).is_empty());
/// ```
#[must_use]
pub fn pad<T: Clone>(items: &[T]) -> Vec<T> {
    match (items.first(), items.last()) {
        (Some(first), Some(last)) if items.len() > 1 => {
            let mut out = Vec::with_capacity(items.len() + 2);
            out.push(last.clone());
            out.extend_from_slice(items);
            out.push(first.clone());
            out
        }
        _ => items.to_vec(),
    }
}

/// Index arithmetic between a logical sequence and its padded physical form.
///
/// This only needs the logical length, so controllers can reason about
/// positions without holding on to the items themselves.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RingMapping {
    logical_len: usize,
}

impl RingMapping {
    /// Creates a mapping for a logical sequence of `logical_len` items.
    #[must_use]
    pub const fn new(logical_len: usize) -> Self {
        Self { logical_len }
    }

    /// Number of items in the logical sequence.
    #[must_use]
    pub const fn logical_len(&self) -> usize {
        self.logical_len
    }

    /// Returns `true` if the physical sequence carries sentinel clones.
    #[must_use]
    pub const fn is_padded(&self) -> bool {
        self.logical_len > 1
    }

    /// Number of pages the underlying pager holds.
    #[must_use]
    pub const fn physical_len(&self) -> usize {
        if self.is_padded() {
            self.logical_len + 2
        } else {
            self.logical_len
        }
    }

    /// Returns `true` if `physical` is the leading or trailing sentinel.
    ///
    /// Unpadded sequences have no sentinels.
    #[must_use]
    pub const fn is_sentinel(&self, physical: usize) -> bool {
        self.is_padded() && (physical == 0 || physical == self.physical_len() - 1)
    }

    /// Maps a physical page to the logical index it represents.
    ///
    /// Returns `None` for sentinels and for positions outside the physical
    /// sequence. A sentinel looks like a real item but reporting it would
    /// either be out of range or describe a frame that is about to be
    /// relabeled.
    #[must_use]
    pub const fn to_logical(&self, physical: usize) -> Option<usize> {
        if physical >= self.physical_len() || self.is_sentinel(physical) {
            return None;
        }
        if self.is_padded() {
            Some(physical - 1)
        } else {
            Some(physical)
        }
    }

    /// Maps a logical index to its real (non-sentinel) physical page.
    #[must_use]
    pub const fn to_physical(&self, logical: usize) -> Option<usize> {
        if logical >= self.logical_len {
            return None;
        }
        if self.is_padded() {
            Some(logical + 1)
        } else {
            Some(logical)
        }
    }

    /// Physical page a pager resting on `physical` must be moved to.
    ///
    /// The leading sentinel (a clone of the last item) settles onto the real
    /// last item at `physical_len - 2`; the trailing sentinel (a clone of the
    /// first item) settles onto the real first item at `1`. Every other
    /// position is already real and yields `None`.
    #[must_use]
    pub const fn settle_target(&self, physical: usize) -> Option<usize> {
        if !self.is_padded() {
            return None;
        }
        let len = self.physical_len();
        if physical == 0 {
            Some(len - 2)
        } else if physical == len - 1 {
            Some(1)
        } else {
            None
        }
    }

    /// Physical page to start on for a requested logical index.
    ///
    /// Requests past the end are clamped to the last item. Sequences of zero
    /// or one items always start at page `0`.
    #[must_use]
    pub const fn initial_page(&self, logical: usize) -> usize {
        if !self.is_padded() {
            return 0;
        }
        let last = self.logical_len - 1;
        let logical = if logical > last { last } else { logical };
        logical + 1
    }
}
