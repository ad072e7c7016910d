// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted swipes through a looping carousel.
//!
//! A toy pager stands in for a host toolkit widget. Like a real one, it
//! raises page-changed and scroll-state events through the host's event
//! queue rather than calling back into the carousel directly, so programmatic
//! jumps are delivered on the next turn of the loop.
//!
//! Run:
//! - `RUST_LOG=understory_carousel=trace cargo run -p understory_demos --example carousel_walkthrough`

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tracing_subscriber::EnvFilter;
use understory_carousel::{Carousel, CarouselOptions, Pager, PagerError, ScrollState, Teleport};

/// Events a pager raises towards its host.
#[derive(Clone, Copy, Debug)]
enum PagerEvent {
    PageSelected(usize),
    ScrollState(ScrollState),
}

type EventQueue = Rc<RefCell<VecDeque<PagerEvent>>>;

/// A linear pager with no notion of wraparound.
#[derive(Debug)]
struct ToyPager {
    page: usize,
    len: usize,
    events: EventQueue,
}

impl ToyPager {
    /// Simulates a full swipe by `delta` pages: drag, settle, idle.
    fn swipe(&mut self, delta: isize) {
        let Some(next) = self.page.checked_add_signed(delta).filter(|p| *p < self.len) else {
            println!("  pager: hit the hard edge at page {}", self.page);
            return;
        };
        let mut events = self.events.borrow_mut();
        events.push_back(PagerEvent::ScrollState(ScrollState::Dragging));
        events.push_back(PagerEvent::PageSelected(next));
        events.push_back(PagerEvent::ScrollState(ScrollState::Settling));
        events.push_back(PagerEvent::ScrollState(ScrollState::Idle));
        self.page = next;
    }
}

impl Pager for ToyPager {
    fn set_page_without_animation(&mut self, page: usize) -> Result<(), PagerError> {
        if page >= self.len {
            return Err(PagerError::OutOfRange {
                page,
                len: self.len,
            });
        }
        self.page = page;
        self.events
            .borrow_mut()
            .push_back(PagerEvent::PageSelected(page));
        Ok(())
    }
}

fn drain(carousel: &mut Carousel<&'static str, ToyPager>, events: &EventQueue) {
    loop {
        let Some(event) = events.borrow_mut().pop_front() else {
            break;
        };
        match event {
            PagerEvent::PageSelected(page) => carousel.handle_position_changed(page),
            PagerEvent::ScrollState(state) => {
                if let Teleport::Applied(page) = carousel.handle_scroll_state_changed(state) {
                    println!("  carousel: relabeled sentinel as page {page}");
                }
            }
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .init();

    let items = ["Mercury", "Venus", "Earth", "Mars"];
    let events: EventQueue = Rc::default();

    let shown = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&shown);
    let mut carousel: Carousel<&'static str, ToyPager> = Carousel::new(
        &items,
        CarouselOptions {
            initial_index: 0,
            container_style: (),
        },
    )
    .on_page_selected(move |index| sink.borrow_mut().push(items[index]));

    let pages = carousel.render_pages(|item, page| format!("[{page}:{item}]"));
    println!("physical pages: {}", pages.join(" "));

    let pager = ToyPager {
        page: carousel.initial_page(),
        len: carousel.pages().len(),
        events: Rc::clone(&events),
    };
    if carousel.mount(pager).is_err() {
        eprintln!("pager handle is busy");
        return;
    }

    // Six swipes forward go round the ring one and a half times; a linear
    // pager alone would stop at the fourth.
    let handle = carousel.handle().clone();
    for _ in 0..6 {
        if handle.with(|pager| pager.swipe(1)).is_err() {
            break;
        }
        drain(&mut carousel, &events);
    }
    println!("forward:  {:?}", shown.borrow());

    shown.borrow_mut().clear();
    for _ in 0..6 {
        if handle.with(|pager| pager.swipe(-1)).is_err() {
            break;
        }
        drain(&mut carousel, &events);
    }
    println!("backward: {:?}", shown.borrow());

    if let Err(err) = carousel.go_to(2, false) {
        eprintln!("go_to failed: {err}");
    }
    drain(&mut carousel, &events);
    println!("jumped to: {:?}", shown.borrow().last());
}
