//! The document the interactive layer runs against.
//!
//! The gallery modal and the parallax band never touch a browser API
//! directly. Everything they need from the page goes through
//! [`DocumentHost`]: the document scroll policy, event listener
//! registration, frame-aligned callbacks, element geometry, and the one
//! visual write the parallax performs (a vertical translate).
//!
//! ## Ownership
//!
//! Hosts are shared through `Rc` and mutate through `&self`. Listener and
//! frame callbacks are `'static` closures; components capture a `Weak`
//! handle to their own state so a registered listener never keeps a
//! component alive on its own.
//!
//! Registrations are released by dropping the guard that created them
//! ([`ListenerGuard`]). Nothing relies on the host to clean up after a
//! component that forgot to.
//!
//! ## Headless implementation
//!
//! [`HeadlessDocument`] is a deterministic in-memory host. Scrolling,
//! resizing and key presses are synthesized, frames run only when
//! [`HeadlessDocument::run_frames`] is called, and every scroll policy
//! write is recorded. The test suite and `studio-site check` drive the
//! interaction models through it.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Whether the page-level scroll container may scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPolicy {
    /// Normal document scrolling.
    Auto,
    /// Background scrolling suppressed (`overflow: hidden`).
    Locked,
}

/// The notification families a component can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Scroll,
    Resize,
    KeyDown,
}

/// A notification delivered to listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Scroll,
    Resize,
    KeyDown { key: String },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Scroll => EventKind::Scroll,
            Event::Resize => EventKind::Resize,
            Event::KeyDown { .. } => EventKind::KeyDown,
        }
    }

    pub fn key(key: &str) -> Self {
        Event::KeyDown {
            key: key.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(u64);

/// Handle to an element whose geometry the host can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

/// Visible viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

pub type ListenerFn = Box<dyn FnMut(&Event)>;
pub type FrameFn = Box<dyn FnOnce()>;

pub trait DocumentHost {
    fn scroll_policy(&self) -> ScrollPolicy;
    fn set_scroll_policy(&self, policy: ScrollPolicy);

    fn add_listener(&self, kind: EventKind, listener: ListenerFn) -> ListenerId;
    /// Returns `false` if the listener was not registered.
    fn remove_listener(&self, id: ListenerId) -> bool;

    /// Schedule `callback` to run before the next paint.
    fn request_frame(&self, callback: FrameFn) -> FrameId;
    /// Returns `false` if the frame already ran or was never scheduled.
    fn cancel_frame(&self, id: FrameId) -> bool;

    fn viewport(&self) -> Viewport;
    /// Top edge of `node` relative to the top of the viewport.
    fn element_top(&self, node: NodeId) -> f64;
    /// Whether transform updates can be applied smoothly.
    fn supports_transforms(&self) -> bool;
    /// Apply `translate3d(0, {offset}px, 0)` to `node`.
    fn set_translate_y(&self, node: NodeId, offset: f64);
}

/// A listener registration, removed from the host when dropped.
pub struct ListenerGuard<H: DocumentHost + ?Sized> {
    host: Rc<H>,
    id: ListenerId,
}

impl<H: DocumentHost + ?Sized> ListenerGuard<H> {
    pub fn register(host: &Rc<H>, kind: EventKind, listener: ListenerFn) -> Self {
        let id = host.add_listener(kind, listener);
        Self {
            host: Rc::clone(host),
            id,
        }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl<H: DocumentHost + ?Sized> Drop for ListenerGuard<H> {
    fn drop(&mut self) {
        self.host.remove_listener(self.id);
    }
}

// ============================================================================
// Headless host
// ============================================================================

type SharedListener = Rc<RefCell<ListenerFn>>;

struct HeadlessState {
    scroll_policy: ScrollPolicy,
    policy_writes: Vec<ScrollPolicy>,
    listeners: Vec<(ListenerId, EventKind, SharedListener)>,
    frames: Vec<(FrameId, FrameFn)>,
    viewport: Viewport,
    transforms_supported: bool,
    scroll_y: f64,
    /// Document-relative top of each element.
    elements: HashMap<NodeId, f64>,
    transforms: HashMap<NodeId, f64>,
}

/// Deterministic in-memory [`DocumentHost`].
pub struct HeadlessDocument {
    state: RefCell<HeadlessState>,
    next_id: Cell<u64>,
}

impl HeadlessDocument {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            state: RefCell::new(HeadlessState {
                scroll_policy: ScrollPolicy::Auto,
                policy_writes: Vec::new(),
                listeners: Vec::new(),
                frames: Vec::new(),
                viewport,
                transforms_supported: true,
                scroll_y: 0.0,
                elements: HashMap::new(),
                transforms: HashMap::new(),
            }),
            next_id: Cell::new(1),
        }
    }

    /// A 1280×800 desktop viewport.
    pub fn desktop() -> Self {
        Self::new(Viewport {
            width: 1280.0,
            height: 800.0,
        })
    }

    fn fresh_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    pub fn set_transforms_supported(&self, supported: bool) {
        self.state.borrow_mut().transforms_supported = supported;
    }

    /// Place an element at `document_top` (pixels from the top of the page).
    pub fn add_element(&self, document_top: f64) -> NodeId {
        let node = NodeId(self.fresh_id());
        self.state.borrow_mut().elements.insert(node, document_top);
        node
    }

    pub fn scroll_y(&self) -> f64 {
        self.state.borrow().scroll_y
    }

    /// Scroll the document and notify scroll listeners.
    pub fn scroll_to(&self, y: f64) {
        self.state.borrow_mut().scroll_y = y;
        self.dispatch(&Event::Scroll);
    }

    /// Resize the viewport and notify resize listeners.
    pub fn resize(&self, width: f64, height: f64) {
        self.state.borrow_mut().viewport = Viewport { width, height };
        self.dispatch(&Event::Resize);
    }

    pub fn press_key(&self, key: &str) {
        self.dispatch(&Event::key(key));
    }

    /// Deliver `event` to every listener registered for its kind.
    ///
    /// The host is not borrowed while listeners run, so a listener may add
    /// or remove registrations (including its own). A listener removed by
    /// an earlier listener during the same dispatch is skipped.
    pub fn dispatch(&self, event: &Event) {
        let kind = event.kind();
        let targets: Vec<(ListenerId, SharedListener)> = self
            .state
            .borrow()
            .listeners
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(id, _, l)| (*id, Rc::clone(l)))
            .collect();

        for (id, listener) in targets {
            let still_registered = self
                .state
                .borrow()
                .listeners
                .iter()
                .any(|(other, _, _)| *other == id);
            if still_registered {
                (&mut **listener.borrow_mut())(event);
            }
        }
    }

    /// Run every frame callback scheduled so far. Returns how many ran.
    ///
    /// Callbacks scheduled while running are left for the next call.
    pub fn run_frames(&self) -> usize {
        let frames = std::mem::take(&mut self.state.borrow_mut().frames);
        let count = frames.len();
        for (_, callback) in frames {
            callback();
        }
        count
    }

    pub fn pending_frames(&self) -> usize {
        self.state.borrow().frames.len()
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.state
            .borrow()
            .listeners
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .count()
    }

    pub fn total_listeners(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Every scroll policy written so far, oldest first.
    pub fn policy_writes(&self) -> Vec<ScrollPolicy> {
        self.state.borrow().policy_writes.clone()
    }

    /// Last offset applied to `node`, if any.
    pub fn translate_y(&self, node: NodeId) -> Option<f64> {
        self.state.borrow().transforms.get(&node).copied()
    }
}

impl DocumentHost for HeadlessDocument {
    fn scroll_policy(&self) -> ScrollPolicy {
        self.state.borrow().scroll_policy
    }

    fn set_scroll_policy(&self, policy: ScrollPolicy) {
        let mut state = self.state.borrow_mut();
        state.scroll_policy = policy;
        state.policy_writes.push(policy);
    }

    fn add_listener(&self, kind: EventKind, listener: ListenerFn) -> ListenerId {
        let id = ListenerId(self.fresh_id());
        self.state
            .borrow_mut()
            .listeners
            .push((id, kind, Rc::new(RefCell::new(listener))));
        id
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.listeners.len();
        state.listeners.retain(|(other, _, _)| *other != id);
        state.listeners.len() != before
    }

    fn request_frame(&self, callback: FrameFn) -> FrameId {
        let id = FrameId(self.fresh_id());
        self.state.borrow_mut().frames.push((id, callback));
        id
    }

    fn cancel_frame(&self, id: FrameId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.frames.len();
        state.frames.retain(|(other, _)| *other != id);
        state.frames.len() != before
    }

    fn viewport(&self) -> Viewport {
        self.state.borrow().viewport
    }

    fn element_top(&self, node: NodeId) -> f64 {
        let state = self.state.borrow();
        state.elements.get(&node).copied().unwrap_or(0.0) - state.scroll_y
    }

    fn supports_transforms(&self) -> bool {
        self.state.borrow().transforms_supported
    }

    fn set_translate_y(&self, node: NodeId, offset: f64) {
        self.state.borrow_mut().transforms.insert(node, offset);
    }
}
