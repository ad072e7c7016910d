// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Position tracking and settle-time boundary teleports.
//!
//! [`PositionController`] mirrors the pager's current physical page and
//! decides two things for each pager event:
//!
//! - on a page change, which logical index (if any) the caller should hear
//!   about;
//! - on a scroll-state change to [`ScrollState::Idle`], whether the pager is
//!   resting on a sentinel and must be moved, without animation, to the real
//!   page showing the same item.
//!
//! Corrections are only ever requested at idle. Page changes arrive
//! mid-gesture and during multi-page flings; relabeling then would fight the
//! pager's own animation.
//!
//! The controller owns no items and no pager. It returns outcomes and leaves
//! delivery to the caller, which keeps it trivially testable:
//!
//! ```rust
//! use understory_carousel::{PositionController, ScrollState};
//!
//! // ["A", "B", "C"] pads to ["C", "A", "B", "C", "A"].
//! let mut ctl = PositionController::new(3, 0);
//! assert_eq!(ctl.current_physical(), 1);
//!
//! // Swiping back lands on the leading sentinel: nothing is reported...
//! assert_eq!(ctl.on_position_changed(0), None);
//! // ...and once the pager idles it must jump to the real "C".
//! assert_eq!(ctl.on_scroll_state_changed(ScrollState::Idle), Some(3));
//! assert_eq!(ctl.on_position_changed(3), Some(2));
//! ```

use crate::{RingMapping, ScrollState};

/// State machine for the current page of a wrapped carousel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PositionController {
    mapping: RingMapping,
    current: usize,
    initial: usize,
}

impl PositionController {
    /// Creates a controller for `logical_len` items, starting at `initial_index`.
    ///
    /// Out-of-range starting indices are clamped to the last item. Sequences
    /// with fewer than two items always start on page `0`.
    #[must_use]
    pub const fn new(logical_len: usize, initial_index: usize) -> Self {
        let mapping = RingMapping::new(logical_len);
        let initial = mapping.initial_page(initial_index);
        Self {
            mapping,
            current: initial,
            initial,
        }
    }

    /// Index arithmetic for the current sequence.
    #[must_use]
    pub const fn mapping(&self) -> RingMapping {
        self.mapping
    }

    /// Physical page to hand to the pager when it is first created.
    #[must_use]
    pub const fn initial_page(&self) -> usize {
        self.initial
    }

    /// Last physical page the pager reported or was moved to.
    #[must_use]
    pub const fn current_physical(&self) -> usize {
        self.current
    }

    /// Logical index of the current page, or `None` while resting on a sentinel.
    #[must_use]
    pub const fn current_logical(&self) -> Option<usize> {
        self.mapping.to_logical(self.current)
    }

    /// Records a page change reported by the pager.
    ///
    /// Returns the logical index to report to the caller. Sentinel pages and
    /// positions outside the physical sequence are recorded but never
    /// reported.
    pub fn on_position_changed(&mut self, physical: usize) -> Option<usize> {
        self.current = physical;
        self.mapping.to_logical(physical)
    }

    /// Handles a scroll-state transition.
    ///
    /// Returns the physical page the pager must jump to, without animation,
    /// when it has gone idle on a sentinel. The current page is left alone
    /// until the jump is confirmed through [`on_jump`](Self::on_jump) or a
    /// page-change event, so a jump that could not be delivered is requested
    /// again on the next idle.
    pub fn on_scroll_state_changed(&self, state: ScrollState) -> Option<usize> {
        if state != ScrollState::Idle {
            return None;
        }
        self.mapping.settle_target(self.current)
    }

    /// Records that the pager was moved to `physical` by a command.
    ///
    /// Not every pager reports programmatic jumps back as page changes, so
    /// callers record accepted jumps here rather than waiting for an echo.
    pub const fn on_jump(&mut self, physical: usize) {
        self.current = physical;
    }

    /// Re-targets the controller at a replaced sequence of `logical_len` items.
    ///
    /// The current logical position is kept when it still exists and clamped
    /// to the last item otherwise. A controller resting on a sentinel keeps
    /// the item that sentinel was showing. The returned physical page becomes
    /// both the current and the initial page, since a host remounting its
    /// pager for the new sequence must start there.
    pub fn set_logical_len(&mut self, logical_len: usize) -> usize {
        let logical = self
            .current_logical()
            .or_else(|| {
                self.mapping
                    .settle_target(self.current)
                    .and_then(|real| self.mapping.to_logical(real))
            })
            .unwrap_or(0);
        self.mapping = RingMapping::new(logical_len);
        self.current = self.mapping.initial_page(logical);
        self.initial = self.current;
        self.current
    }
}
