use issuethread_types::{Comment, Issue, Result, ThreadError};
use serde_json::json;

use crate::thread::{BootstrapPhase, CommentThread};

impl CommentThread {
    /// Look up the backing issue by creator and thread-id label.
    ///
    /// Callers must hold `issue_lookup`.
    async fn fetch_meta(&self) -> Result<Issue> {
        self.set_phase(BootstrapPhase::Locating);

        let query = [
            ("creator", self.config.owner.clone()),
            ("labels", self.config.id.clone()),
        ];
        let value = self.transport.get(&self.repo_path("issues"), &query).await?;
        let issues: Vec<Issue> = serde_json::from_value(value)?;

        let Some(issue) = issues.into_iter().next() else {
            tracing::info!("No backing issue for thread {}", self.config.id);
            self.set_phase(BootstrapPhase::NotInitialized);
            return Err(ThreadError::NotInitialized);
        };

        tracing::debug!("Thread {} backed by issue #{}", self.config.id, issue.number);
        self.store.mutate(|s| s.meta = Some(issue.clone()));
        self.set_phase(BootstrapPhase::Found);
        Ok(issue)
    }

    /// Refresh `meta` from the tracker.
    pub async fn load_meta(&self) -> Result<Issue> {
        let _lookup = self.issue_lookup.lock().await;
        self.fetch_meta().await
    }

    /// Cached `meta`, or a lookup when it is not known yet.
    ///
    /// Concurrent callers wait on one in-flight lookup instead of issuing their own.
    pub async fn get_issue(&self) -> Result<Issue> {
        if let Some(issue) = self.store.read(|s| s.meta.clone()) {
            return Ok(issue);
        }

        let _lookup = self.issue_lookup.lock().await;
        if let Some(issue) = self.store.read(|s| s.meta.clone()) {
            return Ok(issue);
        }
        self.fetch_meta().await
    }

    /// Create the backing issue. The thread id is attached as a label.
    pub async fn create_issue(&self) -> Result<Issue> {
        let _lookup = self.issue_lookup.lock().await;
        self.set_phase(BootstrapPhase::Creating);

        let body = json!({
            "title": self.config.title,
            "labels": self.config.issue_labels(),
            "body": self.config.issue_body(),
        });

        let value = match self.transport.post(&self.repo_path("issues"), body).await {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to create issue for thread {}: {}", self.config.id, e);
                self.set_phase(BootstrapPhase::NotInitialized);
                return Err(e);
            }
        };
        let issue: Issue = serde_json::from_value(value)?;

        tracing::info!("Created issue #{} for thread {}", issue.number, self.config.id);
        self.store.mutate(|s| s.meta = Some(issue.clone()));
        self.set_phase(BootstrapPhase::Found);
        Ok(issue)
    }

    /// Create the backing issue, load the first page and clear the error.
    pub async fn init(&self) -> Result<Vec<Comment>> {
        self.create_issue().await?;
        let comments = self.load_comments(None).await?;
        self.store.mutate(|s| s.error = None);
        self.set_phase(BootstrapPhase::Ready);
        Ok(comments)
    }

    /// Full refresh.
    ///
    /// Issue and user are loaded concurrently, then comments and reactions. The first
    /// failure is recorded in `state.error` and also returned.
    pub async fn update(&self) -> Result<()> {
        let (meta, user) = tokio::join!(self.load_meta(), self.load_user_info());
        if let Err(e) = meta.map(|_| ()).and(user.map(|_| ())) {
            return Err(self.record_error(e));
        }

        let (comments, reactions) = tokio::join!(self.load_comments(None), self.load_reactions());
        if let Err(e) = comments.map(|_| ()).and(reactions.map(|_| ())) {
            return Err(self.record_error(e));
        }

        self.set_phase(BootstrapPhase::Ready);
        Ok(())
    }

    fn record_error(&self, e: ThreadError) -> ThreadError {
        if e == ThreadError::NotInitialized {
            tracing::info!("Thread {} is waiting for initialization", self.config.id);
        } else {
            tracing::warn!("Thread {} update failed: {}", self.config.id, e);
        }
        self.store.mutate(|s| s.error = Some(e.clone()));
        e
    }
}
