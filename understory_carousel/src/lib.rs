// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Carousel: infinite looping over a linear pager.
//!
//! Most toolkits ship a page-swiping widget that runs from a first page to a
//! last page and stops. This crate turns such a pager into a ring: swiping past
//! the last item shows the first, swiping before the first shows the last. It
//! does so without touching rendering, gestures, or animation, all of which
//! stay with the host's pager.
//!
//! The core concepts are:
//!
//! - [`pad`]: builds the *physical* page sequence by surrounding the caller's
//!   *logical* items with sentinel clones, `[last, ..items, first]`, so the
//!   pager always has a page to animate into at either end.
//! - [`RingMapping`]: index arithmetic between physical pages and logical
//!   items, including which pages are sentinels and where a pager resting on
//!   one must be moved.
//! - [`PaddedPages`]: the physical sequence memoized on the logical content.
//! - [`PositionController`]: a pure state machine that mirrors the pager's
//!   current page, filters sentinels out of selection reports, and asks for a
//!   non-animated jump once the pager goes [`ScrollState::Idle`] on a sentinel.
//! - [`Pager`] and [`PagerHandle`]: the seam to the host widget and a shared
//!   cell through which both the host and the carousel issue commands.
//! - [`Carousel`]: ties the above together with the caller's callbacks.
//!
//! This crate deliberately does **not** know about widgets or any particular
//! UI framework. Host frameworks are responsible for:
//!
//! - Rendering [`Carousel::pages`] into their pager, in order, starting on
//!   [`Carousel::initial_page`].
//! - Implementing [`Pager`] for their widget reference and mounting it.
//! - Forwarding page-changed and scroll-state events to
//!   [`Carousel::handle_position_changed`] and
//!   [`Carousel::handle_scroll_state_changed`].
//!
//! ## Minimal example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use understory_carousel::{
//!     Carousel, CarouselOptions, Pager, PagerError, ScrollState, Teleport,
//! };
//!
//! // A stand-in for the host toolkit's pager.
//! struct HostPager {
//!     page: usize,
//! }
//!
//! impl Pager for HostPager {
//!     fn set_page_without_animation(&mut self, page: usize) -> Result<(), PagerError> {
//!         self.page = page;
//!         Ok(())
//!     }
//! }
//!
//! let selected = Rc::new(RefCell::new(Vec::new()));
//! let sink = selected.clone();
//! let mut carousel: Carousel<&str, HostPager> =
//!     Carousel::new(&["A", "B", "C"], CarouselOptions::default())
//!         .on_page_selected(move |index| sink.borrow_mut().push(index));
//!
//! // Render these, in order, starting on page 1.
//! assert_eq!(carousel.pages(), ["C", "A", "B", "C", "A"]);
//! assert!(carousel.mount(HostPager { page: carousel.initial_page() }).is_ok());
//!
//! // The user swipes backwards from "A" onto the clone of "C".
//! carousel.handle_scroll_state_changed(ScrollState::Dragging);
//! carousel.handle_position_changed(0);
//! // Once the pager settles, it is moved to the real "C" without animation.
//! assert_eq!(
//!     carousel.handle_scroll_state_changed(ScrollState::Idle),
//!     Teleport::Applied(3)
//! );
//! carousel.handle_position_changed(3);
//!
//! // Only the real page was reported.
//! assert_eq!(*selected.borrow(), [2]);
//! ```
//!
//! ## Degenerate sequences
//!
//! Sequences of zero or one items are not padded. A single item is reported
//! as index `0` when the pager lands on it; an empty carousel never reports.
//! Neither ever requests a correction.
//!
//! ## Features
//!
//! - `tracing`: emits `trace` events for page changes and `debug` events for
//!   corrections and item replacement through the `tracing` crate.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod carousel;
mod controller;
mod pager;
mod pages;
mod ring;

pub use carousel::{Carousel, CarouselOptions, Teleport};
pub use controller::PositionController;
pub use pager::{Pager, PagerError, PagerHandle, ParseScrollStateError, ScrollState};
pub use pages::PaddedPages;
pub use ring::{RingMapping, pad};
