// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The carousel component: pages, position controller, and pager handle.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::{PaddedPages, Pager, PagerError, PagerHandle, PositionController, ScrollState};

/// Caller configuration for a [`Carousel`].
///
/// `container_style` is carried for the host and never interpreted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CarouselOptions<S = ()> {
    /// Logical index to start on. Clamped to the last item.
    pub initial_index: usize,
    /// Style for the pager's container, passed through untouched.
    pub container_style: S,
}

/// What happened to a settle-time correction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Teleport {
    /// The pager was not resting on a sentinel, or was not idle.
    NotNeeded,
    /// The pager was moved, without animation, to this physical page.
    Applied(usize),
    /// A jump to `page` was needed but could not be delivered.
    ///
    /// The ring stays non-circular at that end until the next idle on a
    /// sentinel with a working pager.
    Skipped {
        /// Physical page the pager should have moved to.
        page: usize,
        /// Why delivery failed.
        reason: PagerError,
    },
}

type PageSelected = Box<dyn FnMut(usize)>;
type ScrollStateChanged = Box<dyn FnMut(ScrollState)>;

/// An infinitely looping carousel over a linear [`Pager`].
///
/// The host renders [`pages`](Self::pages) into its pager in order, starting
/// on [`initial_page`](Self::initial_page), and forwards the pager's events to
/// [`handle_position_changed`](Self::handle_position_changed) and
/// [`handle_scroll_state_changed`](Self::handle_scroll_state_changed).
/// Callbacks registered with [`on_page_selected`](Self::on_page_selected)
/// only ever see valid logical indices.
///
/// Callbacks run synchronously inside the event handlers. A panicking
/// callback unwinds through the handler.
pub struct Carousel<T, P, S = ()> {
    pages: PaddedPages<T>,
    controller: PositionController,
    handle: PagerHandle<P>,
    container_style: S,
    page_selected: Option<PageSelected>,
    scroll_state_changed: Option<ScrollStateChanged>,
    /// Physical page of the last accepted teleport, until the pager echoes it.
    pending_echo: Option<usize>,
}

impl<T: Clone, P: Pager, S> Carousel<T, P, S> {
    /// Creates a carousel over `items` with its own, empty pager handle.
    #[must_use]
    pub fn new(items: &[T], options: CarouselOptions<S>) -> Self {
        Self::with_handle(items, options, PagerHandle::new())
    }

    /// Creates a carousel that shares the caller's pager handle.
    ///
    /// The caller keeps its clone of `handle` and may issue commands through
    /// it directly, such as programmatic page changes.
    #[must_use]
    pub fn with_handle(items: &[T], options: CarouselOptions<S>, handle: PagerHandle<P>) -> Self {
        let pages = PaddedPages::new(items);
        let controller = PositionController::new(items.len(), options.initial_index);
        Self {
            pages,
            controller,
            handle,
            container_style: options.container_style,
            page_selected: None,
            scroll_state_changed: None,
            pending_echo: None,
        }
    }

    /// Registers the callback for logical page selection.
    #[must_use]
    pub fn on_page_selected(mut self, f: impl FnMut(usize) + 'static) -> Self {
        self.page_selected = Some(Box::new(f));
        self
    }

    /// Registers the callback for raw scroll-state transitions.
    #[must_use]
    pub fn on_scroll_state_changed(mut self, f: impl FnMut(ScrollState) + 'static) -> Self {
        self.scroll_state_changed = Some(Box::new(f));
        self
    }

    /// The shared pager handle. Clone it to issue commands from the host.
    #[must_use]
    pub fn handle(&self) -> &PagerHandle<P> {
        &self.handle
    }

    /// Stores `pager` in the shared handle, returning the previous one.
    ///
    /// Returns `Err(pager)` if the handle is currently borrowed.
    pub fn mount(&self, pager: P) -> Result<Option<P>, P> {
        self.handle.mount(pager)
    }

    /// Takes the pager back out of the shared handle.
    pub fn unmount(&self) -> Option<P> {
        self.handle.unmount()
    }

    /// Physical pages in render order, sentinels included.
    #[must_use]
    pub fn pages(&self) -> &[T] {
        self.pages.physical()
    }

    /// The caller's items.
    #[must_use]
    pub fn items(&self) -> &[T] {
        self.pages.logical()
    }

    /// Physical page the pager should be created on.
    #[must_use]
    pub fn initial_page(&self) -> usize {
        self.controller.initial_page()
    }

    /// Last known physical page of the pager.
    #[must_use]
    pub fn current_physical(&self) -> usize {
        self.controller.current_physical()
    }

    /// Logical index of the current page, or `None` while on a sentinel.
    #[must_use]
    pub fn current_logical(&self) -> Option<usize> {
        self.controller.current_logical()
    }

    /// The host's container style.
    #[must_use]
    pub fn container_style(&self) -> &S {
        &self.container_style
    }

    /// Renders every physical page with `render(item, physical_index)`.
    pub fn render_pages<R>(&self, mut render: impl FnMut(&T, usize) -> R) -> Vec<R> {
        self.pages
            .physical()
            .iter()
            .enumerate()
            .map(|(physical, item)| render(item, physical))
            .collect()
    }

    /// Handles the pager's page-changed event.
    ///
    /// Fires the page-selected callback unless `physical` is a sentinel, or is
    /// the pager echoing a teleport that was already reported.
    pub fn handle_position_changed(&mut self, physical: usize) {
        let logical = self.controller.on_position_changed(physical);
        let echoed = self.pending_echo.take() == Some(physical);
        #[cfg(feature = "tracing")]
        tracing::trace!(physical, ?logical, echoed, "carousel position changed");
        if !echoed {
            self.report(logical);
        }
    }

    fn report(&mut self, logical: Option<usize>) {
        if let (Some(logical), Some(cb)) = (logical, self.page_selected.as_mut()) {
            cb(logical);
        }
    }

    /// Handles the pager's scroll-state event.
    ///
    /// Always forwards `state` to the scroll-state callback. When the pager
    /// goes idle on a sentinel, it is moved without animation to the real
    /// page holding the same item, and that item is reported to the
    /// page-selected callback right away. Pagers that echo the jump as a page
    /// change do not cause a second report. Delivery failures are reported in
    /// the returned [`Teleport`] and are otherwise harmless.
    pub fn handle_scroll_state_changed(&mut self, state: ScrollState) -> Teleport {
        if let Some(cb) = self.scroll_state_changed.as_mut() {
            cb(state);
        }
        let Some(page) = self.controller.on_scroll_state_changed(state) else {
            return Teleport::NotNeeded;
        };
        match self.handle.set_page_without_animation(page) {
            Ok(()) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    from = self.controller.current_physical(),
                    to = page,
                    "carousel teleported off sentinel"
                );
                self.controller.on_jump(page);
                self.pending_echo = Some(page);
                self.report(self.controller.current_logical());
                Teleport::Applied(page)
            }
            Err(reason) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(page, %reason, "carousel teleport skipped");
                Teleport::Skipped { page, reason }
            }
        }
    }

    /// Moves the pager to logical page `index` through the shared handle.
    pub fn go_to(&mut self, index: usize, animated: bool) -> Result<(), PagerError> {
        let mapping = self.controller.mapping();
        let page = mapping.to_physical(index).ok_or(PagerError::OutOfRange {
            page: index,
            len: mapping.logical_len(),
        })?;
        if animated {
            self.handle.set_page(page)?;
        } else {
            self.handle.set_page_without_animation(page)?;
        }
        self.controller.on_jump(page);
        Ok(())
    }
}

impl<T: Clone + PartialEq, P: Pager, S> Carousel<T, P, S> {
    /// Replaces the caller's items.
    ///
    /// Returns `false` without touching anything if `items` matches the held
    /// sequence. Otherwise the pages are rebuilt and the current position is
    /// kept or clamped; the host re-renders and places the pager on
    /// [`current_physical`](Self::current_physical).
    pub fn set_items(&mut self, items: &[T]) -> bool {
        if !self.pages.sync(items) {
            return false;
        }
        self.controller.set_logical_len(items.len());
        #[cfg(feature = "tracing")]
        tracing::debug!(
            len = items.len(),
            page = self.controller.current_physical(),
            "carousel items replaced"
        );
        true
    }
}

impl<T: fmt::Debug, P: fmt::Debug, S: fmt::Debug> fmt::Debug for Carousel<T, P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("pages", &self.pages)
            .field("controller", &self.controller)
            .field("handle", &self.handle)
            .field("container_style", &self.container_style)
            .field("page_selected", &self.page_selected.is_some())
            .field("scroll_state_changed", &self.scroll_state_changed.is_some())
            .field("pending_echo", &self.pending_echo)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use super::{Carousel, CarouselOptions, Teleport};
    use crate::{Pager, PagerError, PagerHandle, ScrollState};

    /// Records every command; optionally rejects them.
    #[derive(Debug, Default)]
    struct FakePager {
        jumps: Vec<usize>,
        animated: Vec<usize>,
        reject: bool,
    }

    impl Pager for FakePager {
        fn set_page_without_animation(&mut self, page: usize) -> Result<(), PagerError> {
            if self.reject {
                return Err(PagerError::Rejected);
            }
            self.jumps.push(page);
            Ok(())
        }

        fn set_page(&mut self, page: usize) -> Result<(), PagerError> {
            if self.reject {
                return Err(PagerError::Rejected);
            }
            self.animated.push(page);
            Ok(())
        }
    }

    fn abc() -> Carousel<&'static str, FakePager> {
        Carousel::new(&["A", "B", "C"], CarouselOptions::default())
    }

    fn jumps(carousel: &Carousel<&'static str, FakePager>) -> Vec<usize> {
        carousel.handle().with(|p| p.jumps.clone()).unwrap()
    }

    #[test]
    fn swipe_back_past_first_wraps_to_last() {
        let selected = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&selected);
        let mut carousel = abc().on_page_selected(move |i| sink.borrow_mut().push(i));
        carousel.mount(FakePager::default()).unwrap();

        assert_eq!(carousel.pages(), ["C", "A", "B", "C", "A"]);
        assert_eq!(carousel.initial_page(), 1);

        carousel.handle_scroll_state_changed(ScrollState::Dragging);
        carousel.handle_position_changed(0);
        carousel.handle_scroll_state_changed(ScrollState::Settling);
        assert_eq!(
            carousel.handle_scroll_state_changed(ScrollState::Idle),
            Teleport::Applied(3)
        );
        assert_eq!(jumps(&carousel), [3]);

        // The landed item is reported once, even though the pager echoes
        // the jump as a page change.
        assert_eq!(*selected.borrow(), [2]);
        carousel.handle_position_changed(3);
        assert_eq!(*selected.borrow(), [2]);
        assert_eq!(carousel.items()[2], "C");
    }

    #[test]
    fn swipe_forward_past_last_wraps_to_first() {
        let selected = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&selected);
        let mut carousel: Carousel<&str, FakePager> = Carousel::new(
            &["A", "B", "C"],
            CarouselOptions {
                initial_index: 2,
                container_style: (),
            },
        )
        .on_page_selected(move |i| sink.borrow_mut().push(i));
        carousel.mount(FakePager::default()).unwrap();
        assert_eq!(carousel.initial_page(), 3);

        carousel.handle_position_changed(4);
        assert_eq!(
            carousel.handle_scroll_state_changed(ScrollState::Idle),
            Teleport::Applied(1)
        );
        carousel.handle_position_changed(1);
        assert_eq!(*selected.borrow(), [0]);
        assert_eq!(carousel.current_logical(), Some(0));
    }

    #[test]
    fn teleport_reports_landing_on_silent_pagers() {
        let selected = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&selected);
        let mut carousel = abc().on_page_selected(move |i| sink.borrow_mut().push(i));
        carousel.mount(FakePager::default()).unwrap();

        // This pager never echoes jumps.
        carousel.handle_position_changed(0);
        assert_eq!(
            carousel.handle_scroll_state_changed(ScrollState::Idle),
            Teleport::Applied(3)
        );
        assert_eq!(*selected.borrow(), [2]);

        // The next swipe lands elsewhere and is reported normally; a later
        // return to page 3 is no longer mistaken for an echo.
        carousel.handle_position_changed(2);
        carousel.handle_position_changed(3);
        assert_eq!(*selected.borrow(), [2, 1, 2]);
    }

    #[test]
    fn skipped_teleport_reports_nothing() {
        let selected = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&selected);
        let mut carousel = abc().on_page_selected(move |i| sink.borrow_mut().push(i));

        carousel.handle_position_changed(4);
        assert!(matches!(
            carousel.handle_scroll_state_changed(ScrollState::Idle),
            Teleport::Skipped { page: 1, .. }
        ));
        assert!(selected.borrow().is_empty());
    }

    #[test]
    fn sentinels_never_reach_page_selected() {
        let selected = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&selected);
        let mut carousel = abc().on_page_selected(move |i| sink.borrow_mut().push(i));

        for physical in [0, 1, 2, 3, 4] {
            carousel.handle_position_changed(physical);
        }
        assert_eq!(*selected.borrow(), [0, 1, 2]);
    }

    #[test]
    fn scroll_states_are_forwarded_unfiltered() {
        let states = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&states);
        let mut carousel = abc().on_scroll_state_changed(move |s| sink.borrow_mut().push(s));

        carousel.handle_scroll_state_changed(ScrollState::Dragging);
        carousel.handle_scroll_state_changed(ScrollState::Settling);
        carousel.handle_scroll_state_changed(ScrollState::Idle);
        carousel.handle_scroll_state_changed(ScrollState::Idle);
        assert_eq!(
            *states.borrow(),
            [
                ScrollState::Dragging,
                ScrollState::Settling,
                ScrollState::Idle,
                ScrollState::Idle
            ]
        );
    }

    #[test]
    fn interior_idle_issues_no_command() {
        let mut carousel = abc();
        carousel.mount(FakePager::default()).unwrap();
        carousel.handle_position_changed(2);
        assert_eq!(
            carousel.handle_scroll_state_changed(ScrollState::Idle),
            Teleport::NotNeeded
        );
        assert!(jumps(&carousel).is_empty());
    }

    #[test]
    fn unmounted_pager_skips_correction() {
        let mut carousel = abc();
        carousel.handle_position_changed(0);
        assert_eq!(
            carousel.handle_scroll_state_changed(ScrollState::Idle),
            Teleport::Skipped {
                page: 3,
                reason: PagerError::Unmounted
            }
        );

        // Mounting later lets the next idle finish the job.
        carousel.mount(FakePager::default()).unwrap();
        assert_eq!(
            carousel.handle_scroll_state_changed(ScrollState::Idle),
            Teleport::Applied(3)
        );
    }

    #[test]
    fn rejected_jump_is_skipped() {
        let mut carousel = abc();
        carousel
            .mount(FakePager {
                reject: true,
                ..FakePager::default()
            })
            .unwrap();
        carousel.handle_position_changed(4);
        assert_eq!(
            carousel.handle_scroll_state_changed(ScrollState::Idle),
            Teleport::Skipped {
                page: 1,
                reason: PagerError::Rejected
            }
        );
        assert_eq!(carousel.current_physical(), 4);
    }

    #[test]
    fn shared_handle_reaches_the_same_pager() {
        let host = PagerHandle::mounted(FakePager::default());
        let mut carousel: Carousel<u32, FakePager> =
            Carousel::with_handle(&[10, 20, 30, 40], CarouselOptions::default(), host.clone());
        assert!(carousel.handle().ptr_eq(&host));

        // The host drives the pager directly...
        host.set_page(2).unwrap();
        // ...and the carousel corrects through the same cell.
        carousel.handle_position_changed(5);
        carousel.handle_scroll_state_changed(ScrollState::Idle);

        let pager = host.unmount().unwrap();
        assert_eq!(pager.animated, [2]);
        assert_eq!(pager.jumps, [1]);
        assert!(!carousel.handle().is_mounted());
    }

    #[test]
    fn go_to_translates_logical_pages() {
        let mut carousel = abc();
        carousel.mount(FakePager::default()).unwrap();

        carousel.go_to(2, false).unwrap();
        assert_eq!(carousel.current_physical(), 3);
        carousel.go_to(0, true).unwrap();
        assert_eq!(carousel.current_logical(), Some(0));

        assert_eq!(
            carousel.go_to(3, true),
            Err(PagerError::OutOfRange { page: 3, len: 3 })
        );
        let pager = carousel.unmount().unwrap();
        assert_eq!(pager.jumps, [3]);
        assert_eq!(pager.animated, [1]);
    }

    #[test]
    fn render_pages_passes_physical_indices() {
        let carousel = abc();
        let rendered: Vec<String> =
            carousel.render_pages(|item, i| alloc::format!("{i}:{item}"));
        assert_eq!(rendered, ["0:C", "1:A", "2:B", "3:C", "4:A"]);
    }

    #[test]
    fn single_item_carousel_is_inert_but_reports() {
        let selected = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&selected);
        let mut carousel: Carousel<&str, FakePager> =
            Carousel::new(&["only"], CarouselOptions::default())
                .on_page_selected(move |i| sink.borrow_mut().push(i));
        carousel.mount(FakePager::default()).unwrap();

        assert_eq!(carousel.pages(), ["only"]);
        assert_eq!(carousel.initial_page(), 0);
        carousel.handle_position_changed(0);
        assert_eq!(
            carousel.handle_scroll_state_changed(ScrollState::Idle),
            Teleport::NotNeeded
        );
        assert_eq!(*selected.borrow(), [0]);
    }

    #[test]
    fn empty_carousel_renders_nothing() {
        let mut carousel: Carousel<&str, FakePager> =
            Carousel::new(&[], CarouselOptions::default());
        assert!(carousel.pages().is_empty());
        assert!(carousel.render_pages(|item, _| *item).is_empty());
        carousel.handle_position_changed(0);
        assert_eq!(carousel.current_logical(), None);
        assert_eq!(
            carousel.handle_scroll_state_changed(ScrollState::Idle),
            Teleport::NotNeeded
        );
    }

    #[test]
    fn set_items_is_memoized_and_keeps_position() {
        let mut carousel = abc();
        carousel.handle_position_changed(3);

        assert!(!carousel.set_items(&["A", "B", "C"]));
        assert_eq!(carousel.current_physical(), 3);

        assert!(carousel.set_items(&["A", "B", "C", "D"]));
        assert_eq!(carousel.pages(), ["D", "A", "B", "C", "D", "A"]);
        assert_eq!(carousel.current_logical(), Some(2));

        assert!(carousel.set_items(&["A", "B"]));
        assert_eq!(carousel.current_logical(), Some(1));
        assert_eq!(carousel.items(), ["A", "B"]);
    }

    #[test]
    fn set_items_keeps_initial_page_within_new_pages() {
        let mut carousel: Carousel<&str, FakePager> = Carousel::new(
            &["A", "B", "C"],
            CarouselOptions {
                initial_index: 2,
                container_style: (),
            },
        );
        assert_eq!(carousel.initial_page(), 3);

        assert!(carousel.set_items(&["A"]));
        assert!(carousel.initial_page() < carousel.pages().len());
        assert_eq!(carousel.initial_page(), carousel.current_physical());

        assert!(carousel.set_items(&["A", "B", "C", "D"]));
        assert_eq!(carousel.initial_page(), 1);
        assert_eq!(carousel.pages()[carousel.initial_page()], "A");
    }

    #[test]
    fn container_style_is_passed_through() {
        #[derive(Debug, PartialEq)]
        struct Style {
            flex: u8,
        }
        let carousel: Carousel<u8, FakePager, Style> = Carousel::new(
            &[1, 2],
            CarouselOptions {
                initial_index: 0,
                container_style: Style { flex: 1 },
            },
        );
        assert_eq!(carousel.container_style(), &Style { flex: 1 });
        assert_eq!(vec![1_u8, 2], carousel.items());
    }
}
