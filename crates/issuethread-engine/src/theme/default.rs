use issuethread_types::{Comment, ErrorKind, ThreadState};

use super::Theme;
use crate::render::{RenderKind, RenderNode};
use crate::thread::CommentThread;

pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn header(state: &ThreadState, thread: &CommentThread) -> RenderNode {
    let likes = state.heart_count();
    let comments = state.meta.as_ref().map(|m| m.comments).unwrap_or(0);
    let action = if state.is_liked() { "Unlike" } else { "Like" };

    let mut markup = String::from("<div class=\"it-header\">");
    markup.push_str(&format!(
        "<span class=\"it-header-like-btn\" data-action=\"{}\">{} <strong>{}</strong></span>",
        action.to_lowercase(),
        action,
        likes
    ));
    markup.push_str(&format!(
        "<span class=\"it-header-comment-count\">{} Comments</span>",
        comments
    ));
    if let Some(meta) = state.meta.as_ref().filter(|m| !m.html_url.is_empty()) {
        markup.push_str(&format!(
            "<a class=\"it-header-issue-link\" href=\"{}\">Issue Page</a>",
            escape(&meta.html_url)
        ));
    }
    if state.user.logging_in {
        markup.push_str("<span class=\"it-header-login\">Logging in...</span>");
    } else if let Some(login) = state.user.login() {
        markup.push_str(&format!(
            "<span class=\"it-header-login\">{}</span>",
            escape(login)
        ));
    } else if let Ok(link) = thread.login_link() {
        markup.push_str(&format!(
            "<a class=\"it-header-login\" href=\"{}\">Login</a>",
            escape(link.as_str())
        ));
    }
    markup.push_str("</div>");

    RenderNode::new(RenderKind::Header, markup)
}

pub fn comments(state: &ThreadState, thread: &CommentThread) -> RenderNode {
    let markup = match (&state.error, &state.comments) {
        (Some(e), _) if e.kind() == ErrorKind::NotInitialized => {
            let is_admin = state
                .user
                .identity
                .as_ref()
                .map(|u| u.is_admin())
                .unwrap_or(false);
            if is_admin {
                "<div class=\"it-comments-init\">Comments are not initialized yet. \
                 <button class=\"it-comments-init-btn\">Initialize Comments</button></div>"
                    .to_string()
            } else {
                "<div class=\"it-comments-init\">Comments are not initialized yet.</div>".to_string()
            }
        }
        (Some(e), _) => format!(
            "<div class=\"it-comments-error\">{}</div>",
            escape(&e.to_string())
        ),
        (None, None) => "<div class=\"it-comments-loading\">Loading comments...</div>".to_string(),
        (None, Some(list)) if list.is_empty() => {
            "<div class=\"it-comments-empty\">No comment yet.</div>".to_string()
        }
        (None, Some(list)) => {
            let mut markup = String::from("<ul class=\"it-comments-list\">");
            for comment in list {
                markup.push_str(&comment_item(comment));
            }
            markup.push_str("</ul>");
            markup.push_str(&pagination(state, thread.config().per_page));
            markup
        }
    };

    RenderNode::new(
        RenderKind::Comments,
        format!("<div class=\"it-comments\">{}</div>", markup),
    )
}

fn comment_item(comment: &Comment) -> String {
    let body = match (&comment.body_html, &comment.body) {
        (Some(html), _) => html.clone(),
        (None, Some(text)) => escape(text),
        (None, None) => String::new(),
    };
    let avatar = comment
        .user
        .avatar_url
        .as_deref()
        .map(|url| format!("<img class=\"it-comment-avatar\" src=\"{}\">", escape(url)))
        .unwrap_or_default();
    let date = comment
        .created_at
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_default();

    format!(
        "<li class=\"it-comment\" data-id=\"{}\">{}<span class=\"it-comment-author\">{}</span>\
         <span class=\"it-comment-date\">{}</span><div class=\"it-comment-body\">{}</div></li>",
        comment.id,
        avatar,
        escape(&comment.user.login),
        date,
        body
    )
}

fn pagination(state: &ThreadState, per_page: u32) -> String {
    let pages = state.page_count(per_page);
    if pages <= 1 {
        return String::new();
    }

    let mut markup = String::from("<ul class=\"it-comments-page\">");
    for page in 1..=pages {
        let class = if page == state.current_page {
            "it-comments-page-item it-selected"
        } else {
            "it-comments-page-item"
        };
        markup.push_str(&format!(
            "<li class=\"{}\" data-page=\"{}\">{}</li>",
            class, page, page
        ));
    }
    markup.push_str("</ul>");
    markup
}

pub fn editor(state: &ThreadState, thread: &CommentThread) -> RenderNode {
    let markup = match state.user.login() {
        Some(_) => "<div class=\"it-editor\"><textarea class=\"it-editor-input\" \
                    placeholder=\"Leave a comment\"></textarea>\
                    <button class=\"it-editor-submit\">Comment</button></div>"
            .to_string(),
        None => {
            let href = thread
                .login_link()
                .map(|link| format!(" href=\"{}\"", escape(link.as_str())))
                .unwrap_or_default();
            format!(
                "<div class=\"it-editor\"><a class=\"it-editor-login\"{}>Login with GitHub</a> \
                 to leave a comment</div>",
                href
            )
        }
    };

    RenderNode::new(RenderKind::Editor, markup)
}

pub fn footer(_state: &ThreadState, _thread: &CommentThread) -> RenderNode {
    RenderNode::new(
        RenderKind::Footer,
        "<div class=\"it-footer\">Powered by issuethread</div>",
    )
}

pub fn root<T: Theme + ?Sized>(theme: &T, state: &ThreadState, thread: &CommentThread) -> RenderNode {
    let markup = format!(
        "<div class=\"it-container\">{}{}{}{}</div>",
        theme.header(state, thread).markup,
        theme.comments(state, thread).markup,
        theme.editor(state, thread).markup,
        theme.footer(state, thread).markup,
    );
    RenderNode::new(RenderKind::Root, markup)
}
