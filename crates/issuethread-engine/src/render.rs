use std::sync::{Arc, Mutex, Weak};

use issuethread_types::ThreadState;

use crate::store::WatcherId;
use crate::theme::Theme;
use crate::thread::CommentThread;

/// Named render functions a theme provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderKind {
    Root,
    Header,
    Comments,
    Editor,
    Footer,
}

/// Output of one render function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderNode {
    pub kind: RenderKind,
    pub markup: String,
}

impl RenderNode {
    pub fn new(kind: RenderKind, markup: impl Into<String>) -> Self {
        Self {
            kind,
            markup: markup.into(),
        }
    }
}

/// Place a rendered node is mounted into.
///
/// `swap` replaces the previous content; the first call inserts.
pub trait RenderTarget: Send + Sync {
    fn swap(&self, node: RenderNode);
}

/// Target that keeps the last node it received
#[derive(Debug, Default)]
pub struct MemoryTarget {
    current: Mutex<Option<RenderNode>>,
    swaps: Mutex<usize>,
}

impl MemoryTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<RenderNode> {
        self.current.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn markup(&self) -> String {
        self.current().map(|n| n.markup).unwrap_or_default()
    }

    pub fn swap_count(&self) -> usize {
        *self.swaps.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl RenderTarget for MemoryTarget {
    fn swap(&self, node: RenderNode) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = Some(node);
        *self.swaps.lock().unwrap_or_else(|e| e.into_inner()) += 1;
    }
}

/// A target bound to one render kind. Unchanged output is not swapped in again.
pub(crate) struct BoundTarget {
    kind: RenderKind,
    target: Arc<dyn RenderTarget>,
    last: Mutex<Option<String>>,
}

impl BoundTarget {
    fn refresh(&self, theme: &dyn Theme, state: &ThreadState, thread: &CommentThread) {
        let node = theme.render(self.kind, state, thread);
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        if last.as_deref() == Some(node.markup.as_str()) {
            return;
        }
        *last = Some(node.markup.clone());
        drop(last);
        self.target.swap(node);
    }
}

pub(crate) struct Binding {
    id: WatcherId,
    bound: Arc<BoundTarget>,
}

impl CommentThread {
    /// Render `kind` into `target` now and after every state change.
    pub fn bind(self: &Arc<Self>, kind: RenderKind, target: Arc<dyn RenderTarget>) -> WatcherId {
        let bound = Arc::new(BoundTarget {
            kind,
            target,
            last: Mutex::new(None),
        });

        let thread: Weak<CommentThread> = Arc::downgrade(self);
        let watched = Arc::clone(&bound);
        let id = self.store.watch(move |state: &ThreadState| {
            if let Some(thread) = thread.upgrade() {
                let theme = thread.theme();
                watched.refresh(theme.as_ref(), state, &thread);
            }
        });

        let state = self.store.snapshot();
        bound.refresh(self.theme().as_ref(), &state, self);

        tracing::debug!("Bound {:?} renderer as watcher {}", kind, id);
        self.bindings
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Binding { id, bound });
        id
    }

    /// Stop re-rendering a bound target
    pub fn unbind(&self, id: WatcherId) -> bool {
        self.bindings
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .retain(|b| b.id != id);
        self.store.unwatch(id)
    }

    /// Switch themes and re-render every bound target from the current state.
    pub fn use_theme(&self, theme: Arc<dyn Theme>) {
        *self.theme.write().unwrap_or_else(|e| e.into_inner()) = theme;

        let bound: Vec<Arc<BoundTarget>> = self
            .bindings
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|b| Arc::clone(&b.bound))
            .collect();
        let state = self.store.snapshot();
        let theme = self.theme();
        for target in bound {
            target.refresh(theme.as_ref(), &state, self);
        }
    }

    /// One-shot render of the current state
    pub fn render(&self, kind: RenderKind) -> RenderNode {
        let state = self.store.snapshot();
        self.theme().render(kind, &state, self)
    }

    pub fn theme(&self) -> Arc<dyn Theme> {
        Arc::clone(&self.theme.read().unwrap_or_else(|e| e.into_inner()))
    }
}
