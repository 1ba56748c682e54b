use std::sync::atomic::Ordering;

use issuethread_types::{
    Comment, Issue, Reaction, Result, ThreadError, User, UserIdentity, UserState, HEART,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::thread::CommentThread;

/// Page size used when fetching the like list
const REACTIONS_PER_PAGE: u32 = 100;

#[derive(Deserialize)]
struct PermissionLevel {
    permission: String,
}

impl CommentThread {
    /// Load one page of comments, defaulting to `state.current_page`.
    ///
    /// Only the most recently started request may write its result; responses for
    /// pages the visitor has already navigated away from are dropped.
    pub async fn load_comments(&self, page: Option<u32>) -> Result<Vec<Comment>> {
        let ticket = self.comment_requests.fetch_add(1, Ordering::SeqCst) + 1;
        let page = page.unwrap_or_else(|| self.store.read(|s| s.current_page));

        let issue = self.get_issue().await?;
        let query = [
            ("page", page.to_string()),
            ("per_page", self.config.per_page.to_string()),
        ];
        let value = self.transport.get(&issue.comments_url, &query).await?;
        let comments: Vec<Comment> = serde_json::from_value(value)?;

        if self.comment_requests.load(Ordering::SeqCst) != ticket {
            tracing::debug!("Discarding stale comments for page {}", page);
            return Ok(comments);
        }

        tracing::debug!("Loaded {} comments for page {}", comments.len(), page);
        self.store.mutate(|s| s.comments = Some(comments.clone()));
        Ok(comments)
    }

    /// Switch to `page` (clamped to 1) and load it.
    ///
    /// The page change and the reset of `comments` are one mutation, so the previous
    /// page is never rendered under the new page number.
    pub async fn goto(&self, page: u32) -> Result<Vec<Comment>> {
        let page = page.max(1);
        self.store.mutate(|s| {
            s.current_page = page;
            s.comments = None;
        });
        self.load_comments(Some(page)).await
    }

    /// Load the heart reactions on the backing issue.
    ///
    /// Skipped when there is no token or the issue reports no hearts.
    pub async fn load_reactions(&self) -> Result<Vec<Reaction>> {
        if self.access_token().is_none() {
            return Ok(Vec::new());
        }

        let issue = self.get_issue().await?;
        if issue.reactions.heart == 0 {
            self.store.mutate(|s| s.reactions.clear());
            return Ok(Vec::new());
        }

        let path = if issue.reactions.url.is_empty() {
            self.reactions_path(&issue)
        } else {
            issue.reactions.url.clone()
        };
        let query = [
            ("content", HEART.to_string()),
            ("per_page", REACTIONS_PER_PAGE.to_string()),
        ];
        let value = self.transport.get(&path, &query).await?;
        let reactions: Vec<Reaction> = serde_json::from_value(value)?;

        self.store.mutate(|s| s.reactions = reactions.clone());
        Ok(reactions)
    }

    /// Add a heart reaction for the current user.
    pub async fn like(&self) -> Result<Reaction> {
        if self.access_token().is_none() {
            self.notifier.notify("Login to like");
            return Err(ThreadError::Unauthenticated);
        }

        let issue = self.get_issue().await?;
        let value = self
            .transport
            .post(&self.reactions_path(&issue), json!({ "content": HEART }))
            .await?;
        let reaction: Reaction = serde_json::from_value(value)?;

        self.store.mutate(|s| {
            // The tracker answers a repeated like with the existing reaction
            if s.reactions.iter().any(|r| r.id == reaction.id) {
                return;
            }
            s.reactions.push(reaction.clone());
            if let Some(meta) = s.meta.as_mut() {
                meta.reactions.heart += 1;
                meta.reactions.total_count += 1;
            }
        });
        Ok(reaction)
    }

    /// Remove the current user's heart reaction.
    pub async fn unlike(&self) -> Result<()> {
        if self.access_token().is_none() {
            self.notifier.notify("Login to like");
            return Err(ThreadError::Unauthenticated);
        }

        let own = self.store.read(|s| {
            s.user.login().and_then(|login| {
                s.reactions
                    .iter()
                    .find(|r| r.user.login == login && r.content == HEART)
                    .map(|r| r.id)
            })
        });
        let Some(reaction_id) = own else {
            return Err(ThreadError::ReactionNotFound);
        };

        let issue = self.get_issue().await?;
        let path = format!("{}/{}", self.reactions_path(&issue), reaction_id);
        match self.transport.delete(&path).await {
            Ok(_) => {}
            Err(ThreadError::Transport {
                status: Some(404), ..
            }) => {
                tracing::warn!("Reaction {} already removed", reaction_id);
            }
            Err(e) => return Err(e),
        }

        self.store.mutate(|s| {
            let before = s.reactions.len();
            s.reactions.retain(|r| r.id != reaction_id);
            if s.reactions.len() == before {
                return;
            }
            if let Some(meta) = s.meta.as_mut() {
                meta.reactions.heart = meta.reactions.heart.saturating_sub(1);
                meta.reactions.total_count = meta.reactions.total_count.saturating_sub(1);
            }
        });
        Ok(())
    }

    /// Resolve the authenticated user and their permission on the repository.
    ///
    /// Without a token this logs out and returns `None`.
    pub async fn load_user_info(&self) -> Result<Option<UserIdentity>> {
        if self.access_token().is_none() {
            self.logout();
            return Ok(None);
        }

        let value = self.transport.get("/user", &[]).await?;
        let user: User = serde_json::from_value(value)?;

        let permission_path = self.repo_path(&format!("collaborators/{}/permission", user.login));
        let permission = match self.transport.get(&permission_path, &[]).await {
            Ok(value) => serde_json::from_value::<PermissionLevel>(value)
                .map(|p| p.permission)
                .ok(),
            Err(ThreadError::Transport {
                status: Some(status @ (403 | 404)),
                ..
            }) => {
                tracing::warn!(
                    "Permission lookup for {} returned {}, continuing without it",
                    user.login,
                    status
                );
                None
            }
            Err(e) => return Err(e),
        };

        let identity = UserIdentity {
            login: user.login,
            avatar_url: user.avatar_url,
            html_url: user.html_url,
            permission,
            from_cache: false,
        };

        self.store.mutate(|s| {
            s.user = UserState {
                identity: Some(identity.clone()),
                logging_in: false,
            }
        });
        if let Err(e) = self.identity.store_user(&identity) {
            tracing::warn!("Failed to cache user profile: {}", e);
        }
        Ok(Some(identity))
    }

    /// Post a new comment on the backing issue.
    pub async fn post(&self, body: &str) -> Result<Comment> {
        if self.access_token().is_none() {
            self.notifier.notify("Login to comment");
            return Err(ThreadError::Unauthenticated);
        }

        let issue = self.get_issue().await?;
        let value = self
            .transport
            .post(&issue.comments_url, json!({ "body": body }))
            .await?;
        let comment: Comment = serde_json::from_value(value)?;

        self.store.mutate(|s| {
            if let Some(meta) = s.meta.as_mut() {
                meta.comments += 1;
            }
        });
        Ok(comment)
    }

    /// Render markdown through the tracker's GFM endpoint.
    pub async fn markdown(&self, text: &str) -> Result<String> {
        let value = self
            .transport
            .post("/markdown", json!({ "text": text, "mode": "gfm" }))
            .await?;
        match value {
            Value::String(html) => Ok(html),
            other => Err(ThreadError::Decode(format!(
                "expected markdown html, got {}",
                other
            ))),
        }
    }

    /// Whether the current user has a heart on the issue
    pub fn is_liked(&self) -> bool {
        self.store.read(|s| s.is_liked())
    }

    fn reactions_path(&self, issue: &Issue) -> String {
        self.repo_path(&format!("issues/{}/reactions", issue.number))
    }
}
