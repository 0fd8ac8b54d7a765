//! Portfolio gallery modal.
//!
//! The portfolio page shows a grid of project cards. Activating a card
//! opens a dialog with that project's gallery and facts. The modal is a
//! two-state machine:
//!
//! ```text
//!            select(p)                       select(q)
//!   Closed ───────────────▶ Open(p) ───────────────────▶ Open(q)
//!      ▲                       │
//!      └───────────────────────┘
//!        close(CloseButton | Backdrop | Escape), unmount
//! ```
//!
//! ## Resources held while open
//!
//! Entering `Open` acquires a [`ScrollLock`] and registers one Escape key
//! listener. Both live inside the open session; leaving `Open` by any path
//! drops the session, which restores the prior scroll policy and removes
//! the listener. No call site resets either by hand.
//!
//! Switching projects while open replaces the project inside the session.
//! The lock is never released in between, so there is no observable
//! `Closed` state and no scroll flicker.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::host::{DocumentHost, Event, EventKind, ListenerGuard, ScrollPolicy};
use crate::project::{self, Project};

/// Accessible label used when a project has no title.
pub const FALLBACK_LABEL: &str = "Project details";

/// `sizes` hint for the lead image.
pub const LEAD_IMAGE_SIZES: &str = "(min-width: 1024px) 60vw, 100vw";

/// Suppresses document scrolling for as long as it lives.
///
/// Remembers the policy in force when acquired and writes it back exactly
/// once, on drop.
pub struct ScrollLock<H: DocumentHost + ?Sized> {
    host: Rc<H>,
    prior: ScrollPolicy,
}

impl<H: DocumentHost + ?Sized> ScrollLock<H> {
    pub fn acquire(host: &Rc<H>) -> Self {
        let prior = host.scroll_policy();
        host.set_scroll_policy(ScrollPolicy::Locked);
        Self {
            host: Rc::clone(host),
            prior,
        }
    }
}

impl<H: DocumentHost + ?Sized> Drop for ScrollLock<H> {
    fn drop(&mut self) {
        self.host.set_scroll_policy(self.prior);
    }
}

/// What closed the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    CloseButton,
    Backdrop,
    Escape,
    /// The owning page went away while the modal was open.
    Unmount,
    /// A lookup by id found no project.
    Missing,
}

/// Snapshot of the modal state.
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryState {
    Closed,
    Open(Project),
}

/// A state change, reported to observers after it took effect.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Opened { id: String },
    Switched { from: String, to: String },
    Closed { id: String, trigger: CloseTrigger },
}

type Observer = Box<dyn FnMut(&Transition)>;

struct OpenSession<H: DocumentHost + ?Sized> {
    project: Project,
    _escape: ListenerGuard<H>,
    _lock: ScrollLock<H>,
}

struct Inner<H: DocumentHost + ?Sized> {
    host: Rc<H>,
    session: Option<OpenSession<H>>,
    observers: Vec<Observer>,
}

/// The gallery modal of one portfolio page.
///
/// Dropping it is the unmount: an open session is closed with
/// [`CloseTrigger::Unmount`].
pub struct GalleryModal<H: DocumentHost + 'static> {
    inner: Rc<RefCell<Inner<H>>>,
}

impl<H: DocumentHost + 'static> GalleryModal<H> {
    pub fn new(host: Rc<H>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                host,
                session: None,
                observers: Vec::new(),
            })),
        }
    }

    /// Call `observer` after every transition.
    pub fn observe(&self, observer: impl FnMut(&Transition) + 'static) {
        self.inner.borrow_mut().observers.push(Box::new(observer));
    }

    pub fn state(&self) -> GalleryState {
        match &self.inner.borrow().session {
            Some(session) => GalleryState::Open(session.project.clone()),
            None => GalleryState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        self.inner.borrow().session.is_some()
    }

    pub fn open_id(&self) -> Option<String> {
        self.inner
            .borrow()
            .session
            .as_ref()
            .map(|s| s.project.id.clone())
    }

    /// The detail view of the open project.
    pub fn detail(&self) -> Option<ProjectDetail> {
        self.inner
            .borrow()
            .session
            .as_ref()
            .map(|s| ProjectDetail::new(&s.project))
    }

    /// Show `project`, opening the modal or replacing the open project.
    pub fn select(&self, project: Project) {
        let transition = {
            let mut guard = self.inner.borrow_mut();
            let inner = &mut *guard;
            match &mut inner.session {
                Some(session) => {
                    let from = std::mem::replace(&mut session.project, project);
                    Transition::Switched {
                        from: from.id,
                        to: session.project.id.clone(),
                    }
                }
                None => {
                    let id = project.id.clone();
                    let lock = ScrollLock::acquire(&inner.host);
                    let escape = escape_listener(&inner.host, Rc::downgrade(&self.inner));
                    inner.session = Some(OpenSession {
                        project,
                        _escape: escape,
                        _lock: lock,
                    });
                    Transition::Opened { id }
                }
            }
        };
        notify(&self.inner, &transition);
    }

    /// Open the project with `id` from `projects`.
    ///
    /// An unknown id never opens anything; if the modal was open it closes
    /// with [`CloseTrigger::Missing`]. Returns whether a project is shown.
    pub fn select_by_id(&self, projects: &[Project], id: &str) -> bool {
        match project::find(projects, id) {
            Some(found) => {
                self.select(found.clone());
                true
            }
            None => {
                self.close(CloseTrigger::Missing);
                false
            }
        }
    }

    /// Close the modal. A no-op while closed.
    pub fn close(&self, trigger: CloseTrigger) {
        close_inner(&self.inner, trigger);
    }

    /// Tear the modal down, releasing anything an open session holds.
    pub fn unmount(self) {
        drop(self);
    }
}

impl<H: DocumentHost + 'static> Drop for GalleryModal<H> {
    fn drop(&mut self) {
        close_inner(&self.inner, CloseTrigger::Unmount);
    }
}

fn escape_listener<H: DocumentHost + 'static>(
    host: &Rc<H>,
    inner: Weak<RefCell<Inner<H>>>,
) -> ListenerGuard<H> {
    ListenerGuard::register(
        host,
        EventKind::KeyDown,
        Box::new(move |event: &Event| {
            let Event::KeyDown { key } = event else {
                return;
            };
            if key == "Escape" {
                if let Some(inner) = inner.upgrade() {
                    close_inner(&inner, CloseTrigger::Escape);
                }
            }
        }),
    )
}

fn close_inner<H: DocumentHost + 'static>(inner: &Rc<RefCell<Inner<H>>>, trigger: CloseTrigger) {
    let Some(session) = inner.borrow_mut().session.take() else {
        return;
    };
    let id = session.project.id.clone();
    // Releases the scroll lock and removes the Escape listener.
    drop(session);
    notify(inner, &Transition::Closed { id, trigger });
}

fn notify<H: DocumentHost + 'static>(inner: &Rc<RefCell<Inner<H>>>, transition: &Transition) {
    // Observers run without the state borrowed so they may inspect the modal.
    let mut observers = std::mem::take(&mut inner.borrow_mut().observers);
    for observer in observers.iter_mut() {
        observer(transition);
    }
    let mut inner = inner.borrow_mut();
    observers.append(&mut inner.observers);
    inner.observers = observers;
}

// ============================================================================
// Detail view model
// ============================================================================

/// Everything the dialog renders for one project, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDetail {
    pub id: String,
    /// `aria-label` of the dialog.
    pub label: String,
    pub title: String,
    pub subtext: Option<String>,
    pub description: Option<String>,
    pub lead_image: String,
    /// `(src, alt)` for gallery positions 1..=6.
    pub thumbnails: Vec<(String, String)>,
    /// Fact cards in mapping order.
    pub facts: Vec<(String, String)>,
}

impl ProjectDetail {
    pub fn new(project: &Project) -> Self {
        let title = project.title.trim();
        let label = if title.is_empty() {
            FALLBACK_LABEL.to_string()
        } else {
            title.to_string()
        };
        let thumbnails = project
            .thumbnails()
            .into_iter()
            .enumerate()
            .map(|(i, src)| (src.to_string(), format!("{} {}", project.title, i + 2)))
            .collect();

        Self {
            id: project.id.clone(),
            label,
            title: project.title.clone(),
            subtext: project.subtext.clone(),
            description: project.description.clone(),
            lead_image: project.lead_image().to_string(),
            thumbnails,
            facts: project
                .meta
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}
