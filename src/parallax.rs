//! Scroll-driven parallax band.
//!
//! A parallax band is a fixed-height section whose background layer moves
//! at a fraction of the scroll speed. The layer is shifted with a transform
//! only, never with layout properties, so recomputation cannot reflow the
//! page.
//!
//! ## Offset
//!
//! ```text
//! offset = clamp(-top × speed, -height × speed, height × speed)
//! ```
//!
//! where `top` is the band's top edge relative to the viewport and
//! `height` the viewport height. The offset grows with scroll distance and
//! is bounded by `height × speed`; the rendered background layer overhangs
//! its band by that bound, so it never detaches from the container.
//!
//! ## Lifecycle
//!
//! [`ParallaxEffect::start`] computes once eagerly, then listens for scroll
//! and resize. Bursts of notifications collapse into at most one pending
//! frame. [`ParallaxEffect::stop`] (or drop) removes both listeners and
//! cancels the pending frame, after which nothing recomputes.
//!
//! Narrow viewports and hosts without smooth transforms get a static
//! background: no listeners, offset 0.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::host::{DocumentHost, Event, EventKind, FrameId, ListenerGuard, NodeId};

pub const DEFAULT_SPEED: f64 = 0.3;

/// Below this viewport width the band stays static.
pub const DEFAULT_MIN_VIEWPORT_WIDTH: f64 = 640.0;

/// Vertical offset of the background layer, in pixels.
pub fn parallax_offset(section_top: f64, viewport_height: f64, speed: f64) -> f64 {
    let bound = (viewport_height * speed).abs();
    (-section_top * speed).clamp(-bound, bound)
}

/// Use `speed` when it is finite and positive, `fallback` otherwise.
pub fn effective_speed(speed: Option<f64>, fallback: f64) -> f64 {
    match speed {
        Some(s) if s.is_finite() && s > 0.0 => s,
        _ => fallback,
    }
}

/// How far the background layer must overhang its band, in pixels, for a
/// viewport of `viewport_height`.
pub fn overhang(viewport_height: f64, speed: f64) -> f64 {
    (viewport_height * speed).abs().ceil()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxSettings {
    pub speed: f64,
    pub min_viewport_width: f64,
}

impl Default for ParallaxSettings {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            min_viewport_width: DEFAULT_MIN_VIEWPORT_WIDTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParallaxMode {
    /// Listening and recomputing.
    Animated,
    /// Degraded to a fixed background.
    Static,
    /// Stopped; holds nothing.
    Stopped,
}

struct Inner<H: DocumentHost + ?Sized> {
    host: Rc<H>,
    node: NodeId,
    speed: f64,
    mode: ParallaxMode,
    offset: f64,
    recomputes: u64,
    pending: Option<FrameId>,
    listeners: Vec<ListenerGuard<H>>,
}

impl<H: DocumentHost + ?Sized> Inner<H> {
    fn recompute(&mut self) {
        let top = self.host.element_top(self.node);
        let viewport = self.host.viewport();
        self.offset = parallax_offset(top, viewport.height, self.speed);
        self.recomputes += 1;
        self.host.set_translate_y(self.node, self.offset);
    }

    fn release(&mut self) {
        if let Some(frame) = self.pending.take() {
            self.host.cancel_frame(frame);
        }
        self.listeners.clear();
    }
}

/// The parallax effect of one band, tied to its visible lifetime.
pub struct ParallaxEffect<H: DocumentHost + 'static> {
    inner: Rc<RefCell<Inner<H>>>,
}

impl<H: DocumentHost + 'static> ParallaxEffect<H> {
    /// Mount the effect on the background layer `node`.
    pub fn start(host: Rc<H>, node: NodeId, settings: ParallaxSettings) -> Self {
        let speed = effective_speed(Some(settings.speed), DEFAULT_SPEED);
        let degraded = host.viewport().width < settings.min_viewport_width
            || !host.supports_transforms();

        let inner = Rc::new(RefCell::new(Inner {
            host: Rc::clone(&host),
            node,
            speed,
            mode: if degraded {
                ParallaxMode::Static
            } else {
                ParallaxMode::Animated
            },
            offset: 0.0,
            recomputes: 0,
            pending: None,
            listeners: Vec::new(),
        }));

        if !degraded {
            inner.borrow_mut().recompute();
            let listeners = [EventKind::Scroll, EventKind::Resize]
                .into_iter()
                .map(|kind| {
                    let weak = Rc::downgrade(&inner);
                    ListenerGuard::register(
                        &host,
                        kind,
                        Box::new(move |_: &Event| schedule(&weak)),
                    )
                })
                .collect();
            inner.borrow_mut().listeners = listeners;
        }

        Self { inner }
    }

    /// Remove listeners and cancel any pending frame. Idempotent.
    pub fn stop(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.release();
        inner.mode = ParallaxMode::Stopped;
    }

    pub fn offset(&self) -> f64 {
        self.inner.borrow().offset
    }

    pub fn mode(&self) -> ParallaxMode {
        self.inner.borrow().mode
    }

    /// How many times the offset has been computed.
    pub fn recompute_count(&self) -> u64 {
        self.inner.borrow().recomputes
    }

    pub fn has_pending_frame(&self) -> bool {
        self.inner.borrow().pending.is_some()
    }
}

impl<H: DocumentHost + 'static> Drop for ParallaxEffect<H> {
    fn drop(&mut self) {
        self.inner.borrow_mut().release();
    }
}

/// Queue one recomputation for the next frame unless one is already queued.
fn schedule<H: DocumentHost + 'static>(weak: &Weak<RefCell<Inner<H>>>) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let mut state = inner.borrow_mut();
    if state.pending.is_some() || state.mode != ParallaxMode::Animated {
        return;
    }
    let frame_target = Weak::clone(weak);
    let frame = state.host.request_frame(Box::new(move || {
        if let Some(inner) = frame_target.upgrade() {
            let mut state = inner.borrow_mut();
            state.pending = None;
            if state.mode == ParallaxMode::Animated {
                state.recompute();
            }
        }
    }));
    state.pending = Some(frame);
}
