// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam to the host's linear pager widget.
//!
//! The carousel never renders, animates, or tracks gestures itself. It talks
//! to whatever linear pager the host toolkit provides through the [`Pager`]
//! trait, and listens to that pager's [`ScrollState`] transitions.

use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;
use core::str::FromStr;

/// Scroll state reported by a pager.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScrollState {
    /// The gesture has fully settled; the pager rests on a page.
    Idle,
    /// The user is dragging.
    Dragging,
    /// The finger has lifted and the pager is animating to a page.
    Settling,
}

impl ScrollState {
    /// Name used by host pager events.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging => "dragging",
            Self::Settling => "settling",
        }
    }
}

impl fmt::Display for ScrollState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`ScrollState`] name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParseScrollStateError;

impl fmt::Display for ParseScrollStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected one of `idle`, `dragging`, `settling`")
    }
}

impl core::error::Error for ParseScrollStateError {}

impl FromStr for ScrollState {
    type Err = ParseScrollStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(Self::Idle),
            "dragging" => Ok(Self::Dragging),
            "settling" => Ok(Self::Settling),
            _ => Err(ParseScrollStateError),
        }
    }
}

/// Why a command could not be delivered to the pager.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PagerError {
    /// No pager is mounted in the handle.
    Unmounted,
    /// The handle is already borrowed elsewhere.
    Busy,
    /// The requested page does not exist.
    OutOfRange {
        /// Requested page.
        page: usize,
        /// Number of valid pages.
        len: usize,
    },
    /// The pager refused or failed the command.
    Rejected,
}

impl fmt::Display for PagerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unmounted => f.write_str("pager is not mounted"),
            Self::Busy => f.write_str("pager handle is already borrowed"),
            Self::OutOfRange { page, len } => {
                write!(f, "page {page} is out of range for {len} pages")
            }
            Self::Rejected => f.write_str("pager rejected the command"),
        }
    }
}

impl core::error::Error for PagerError {}

/// Imperative commands a linear pager must accept.
///
/// Implementations wrap the host toolkit's widget reference. Page indices are
/// always physical: they include the sentinel pages.
pub trait Pager {
    /// Jumps to `page` without animating the transition.
    fn set_page_without_animation(&mut self, page: usize) -> Result<(), PagerError>;

    /// Moves to `page`, animating if the pager supports it.
    ///
    /// Pagers without animation support can rely on the default, which jumps.
    fn set_page(&mut self, page: usize) -> Result<(), PagerError> {
        self.set_page_without_animation(page)
    }
}

/// Shared, optional reference to a mounted pager.
///
/// Both the carousel and its host may hold clones of the same handle. The
/// host mounts the pager once its widget exists and can keep issuing its own
/// commands through the handle; the carousel reads it only to apply
/// corrections. Cloning shares the cell.
#[derive(Debug)]
pub struct PagerHandle<P> {
    cell: Rc<RefCell<Option<P>>>,
}

impl<P> PagerHandle<P> {
    /// Creates a handle with nothing mounted.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cell: Rc::new(RefCell::new(None)),
        }
    }

    /// Creates a handle that already holds `pager`.
    #[must_use]
    pub fn mounted(pager: P) -> Self {
        Self {
            cell: Rc::new(RefCell::new(Some(pager))),
        }
    }

    /// Stores `pager`, returning whatever was mounted before.
    ///
    /// Returns `Err(pager)` if the cell is currently borrowed.
    pub fn mount(&self, pager: P) -> Result<Option<P>, P> {
        match self.cell.try_borrow_mut() {
            Ok(mut slot) => Ok(slot.replace(pager)),
            Err(_) => Err(pager),
        }
    }

    /// Takes the mounted pager out of the handle.
    pub fn unmount(&self) -> Option<P> {
        self.cell.try_borrow_mut().ok().and_then(|mut slot| slot.take())
    }

    /// Returns `true` if a pager is mounted.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.cell.try_borrow().is_ok_and(|slot| slot.is_some())
    }

    /// Runs `f` against the mounted pager.
    pub fn with<R>(&self, f: impl FnOnce(&mut P) -> R) -> Result<R, PagerError> {
        let mut slot = self.cell.try_borrow_mut().map_err(|_| PagerError::Busy)?;
        let pager = slot.as_mut().ok_or(PagerError::Unmounted)?;
        Ok(f(pager))
    }

    /// Returns `true` if both handles share the same cell.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

impl<P: Pager> PagerHandle<P> {
    /// Forwards [`Pager::set_page_without_animation`] to the mounted pager.
    pub fn set_page_without_animation(&self, page: usize) -> Result<(), PagerError> {
        self.with(|pager| pager.set_page_without_animation(page))?
    }

    /// Forwards [`Pager::set_page`] to the mounted pager.
    pub fn set_page(&self, page: usize) -> Result<(), PagerError> {
        self.with(|pager| pager.set_page(page))?
    }
}

impl<P> Clone for PagerHandle<P> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<P> Default for PagerHandle<P> {
    fn default() -> Self {
        Self::new()
    }
}
