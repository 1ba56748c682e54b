use crate::error::ThreadError;
use crate::models::{Comment, Issue, Reaction, UserIdentity};

/// Visitor part of the thread state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserState {
    /// `None` for anonymous visitors
    pub identity: Option<UserIdentity>,
    /// Set while an authorization code is being exchanged
    pub logging_in: bool,
}

impl UserState {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn login(&self) -> Option<&str> {
        self.identity.as_ref().map(|u| u.login.as_str())
    }
}

/// Snapshot observed by renderers.
///
/// `comments == None` means the current page has not been loaded yet, which is
/// different from `Some(vec![])` (a loaded, empty page).
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadState {
    pub user: UserState,
    pub error: Option<ThreadError>,
    pub meta: Option<Issue>,
    pub comments: Option<Vec<Comment>>,
    pub reactions: Vec<Reaction>,
    pub current_page: u32,
}

impl Default for ThreadState {
    fn default() -> Self {
        Self {
            user: UserState::anonymous(),
            error: None,
            meta: None,
            comments: None,
            reactions: Vec::new(),
            current_page: 1,
        }
    }
}

impl ThreadState {
    pub fn new(user: UserState) -> Self {
        Self {
            user,
            ..Self::default()
        }
    }

    pub fn is_ready(&self) -> bool {
        self.meta.is_some()
    }

    pub fn comments_loaded(&self) -> bool {
        self.comments.is_some()
    }

    pub fn heart_count(&self) -> u32 {
        self.meta.as_ref().map(|m| m.reactions.heart).unwrap_or(0)
    }

    /// Whether `login` has a reaction in the loaded list
    pub fn liked_by(&self, login: &str) -> bool {
        self.reactions.iter().any(|r| r.user.login == login)
    }

    /// Like-membership test for the current visitor
    pub fn is_liked(&self) -> bool {
        self.user.login().map(|login| self.liked_by(login)).unwrap_or(false)
    }

    /// Page count derived from the issue's comment total
    pub fn page_count(&self, per_page: u32) -> u32 {
        let total = self.meta.as_ref().map(|m| m.comments).unwrap_or(0);
        if per_page == 0 || total == 0 {
            return 1;
        }
        total.div_ceil(per_page)
    }
}
