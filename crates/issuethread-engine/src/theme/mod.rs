pub mod default;

use issuethread_types::ThreadState;

use crate::render::{RenderKind, RenderNode};
use crate::thread::CommentThread;

/// A set of render functions, one per render kind.
///
/// Every method defaults to the built-in markup, so a theme only overrides the parts
/// it cares about. Implementations must be pure functions of their inputs and must
/// not mutate the thread.
pub trait Theme: Send + Sync {
    fn header(&self, state: &ThreadState, thread: &CommentThread) -> RenderNode {
        default::header(state, thread)
    }

    fn comments(&self, state: &ThreadState, thread: &CommentThread) -> RenderNode {
        default::comments(state, thread)
    }

    fn editor(&self, state: &ThreadState, thread: &CommentThread) -> RenderNode {
        default::editor(state, thread)
    }

    fn footer(&self, state: &ThreadState, thread: &CommentThread) -> RenderNode {
        default::footer(state, thread)
    }

    /// Whole thread, composed from this theme's other render functions
    fn root(&self, state: &ThreadState, thread: &CommentThread) -> RenderNode {
        default::root(self, state, thread)
    }

    fn render(&self, kind: RenderKind, state: &ThreadState, thread: &CommentThread) -> RenderNode {
        match kind {
            RenderKind::Root => self.root(state, thread),
            RenderKind::Header => self.header(state, thread),
            RenderKind::Comments => self.comments(state, thread),
            RenderKind::Editor => self.editor(state, thread),
            RenderKind::Footer => self.footer(state, thread),
        }
    }
}

/// Built-in theme
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTheme;

impl Theme for DefaultTheme {}
