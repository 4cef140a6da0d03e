//! Post service.

use chirp_common::{AppError, AppResult, IdGenerator};
use chirp_store::{
    CommentStore, FollowGraph, PostStore, UserStore,
    entities::{Comment, Post, User},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::services::user::UserView;

/// Post service for creating, liking, resharing and reading posts.
#[derive(Clone)]
pub struct PostService {
    post_store: PostStore,
    comment_store: CommentStore,
    user_store: UserStore,
    follow_graph: FollowGraph,
    id_gen: IdGenerator,
}

/// A post enriched with viewer-relative fields, computed at read time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub liker_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_post_id: Option<String>,

    /// The authoring user.
    pub user: UserView,

    pub likes_count: usize,
    pub comments_count: usize,

    /// Whether the viewer currently likes this post. `false` for
    /// anonymous reads.
    pub liked_by_me: bool,

    /// Whether the viewer follows the author. `false` for anonymous reads.
    pub followed_by_viewer: bool,
}

/// A comment enriched with its author.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,

    /// The commenting user.
    pub user: UserView,
}

impl PostService {
    /// Create a new post service.
    #[must_use]
    pub fn new(
        post_store: PostStore,
        comment_store: CommentStore,
        user_store: UserStore,
        follow_graph: FollowGraph,
    ) -> Self {
        Self {
            post_store,
            comment_store,
            user_store,
            follow_graph,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new post.
    pub async fn create(&self, author_id: &str, content: &str) -> AppResult<Post> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::Validation(
                "Post content must not be empty".to_string(),
            ));
        }
        if !self.user_store.contains(author_id).await {
            return Err(AppError::UserNotFound(author_id.to_string()));
        }

        let post = Post {
            id: self.id_gen.generate(),
            author_id: author_id.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
            liker_ids: Vec::new(),
            original_post_id: None,
        };

        let post = self.post_store.insert(post).await;
        tracing::debug!(post_id = %post.id, author_id = %author_id, "Created post");

        Ok(post)
    }

    /// Flip the user's like on a post and return the updated post.
    ///
    /// One verb for both directions: liking an already-liked post removes
    /// the like. The store serializes concurrent toggles, so membership
    /// flips exactly once per call.
    pub async fn toggle_like(&self, post_id: &str, user_id: &str) -> AppResult<Post> {
        let post = self.post_store.toggle_like(post_id, user_id).await?;
        tracing::debug!(
            post_id = %post_id,
            user_id = %user_id,
            liked = post.is_liked_by(user_id),
            "Toggled like"
        );
        Ok(post)
    }

    /// Reshare another user's post.
    ///
    /// The new post copies the original's content, references it via
    /// `original_post_id` and starts with an empty like-set. Resharing
    /// your own post is rejected — including your own reshare of someone
    /// else's post. Chains through other users are permitted.
    pub async fn reshare(&self, original_post_id: &str, user_id: &str) -> AppResult<Post> {
        let original = self.post_store.get(original_post_id).await?;
        if original.author_id == user_id {
            return Err(AppError::Validation(
                "Cannot reshare your own post".to_string(),
            ));
        }

        let post = Post {
            id: self.id_gen.generate(),
            author_id: user_id.to_string(),
            content: original.content,
            created_at: Utc::now(),
            liker_ids: Vec::new(),
            original_post_id: Some(original.id),
        };

        let post = self.post_store.insert(post).await;
        tracing::debug!(
            post_id = %post.id,
            original_post_id = %original_post_id,
            user_id = %user_id,
            "Created reshare"
        );

        Ok(post)
    }

    /// Add a comment to a post.
    pub async fn add_comment(
        &self,
        post_id: &str,
        author_id: &str,
        content: &str,
    ) -> AppResult<Comment> {
        self.post_store.get(post_id).await?;

        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::Validation(
                "Comment content must not be empty".to_string(),
            ));
        }

        let comment = Comment {
            id: self.id_gen.generate(),
            post_id: post_id.to_string(),
            author_id: author_id.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        };

        let comment = self.comment_store.insert(comment).await;
        tracing::debug!(comment_id = %comment.id, post_id = %post_id, "Added comment");

        Ok(comment)
    }

    /// Comments on a post with their authors, most recent first.
    ///
    /// Recomputed per call; nothing is cached.
    pub async fn comments(&self, post_id: &str) -> AppResult<Vec<CommentView>> {
        self.post_store.get(post_id).await?;

        let mut comments = self.comment_store.for_post(post_id).await;
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut views = Vec::with_capacity(comments.len());
        for comment in comments {
            let author = self.author_of(&comment.author_id, &comment.id).await?;
            views.push(CommentView {
                id: comment.id,
                post_id: comment.post_id,
                author_id: comment.author_id,
                content: comment.content,
                created_at: comment.created_at,
                user: UserView::from(&author),
            });
        }

        Ok(views)
    }

    /// The feed: all posts sorted by creation time descending, enriched
    /// with viewer-relative fields.
    ///
    /// The sort is stable, so posts sharing a timestamp keep their
    /// insertion order. All derived fields are computed fresh on every
    /// call.
    pub async fn feed(&self, viewer_id: Option<&str>) -> AppResult<Vec<PostView>> {
        let mut posts = self.post_store.all().await;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let following = match viewer_id {
            Some(viewer) => self.follow_graph.following(viewer).await,
            None => std::collections::HashSet::new(),
        };

        let mut views = Vec::with_capacity(posts.len());
        for post in posts {
            let author = self.author_of(&post.author_id, &post.id).await?;
            let comments_count = self.comment_store.count_for_post(&post.id).await;
            let liked_by_me = viewer_id.is_some_and(|viewer| post.is_liked_by(viewer));
            let followed_by_viewer = following.contains(post.author_id.as_str());

            views.push(PostView {
                likes_count: post.liker_ids.len(),
                comments_count,
                liked_by_me,
                followed_by_viewer,
                user: UserView::from(&author),
                id: post.id,
                author_id: post.author_id,
                content: post.content,
                created_at: post.created_at,
                liker_ids: post.liker_ids,
                original_post_id: post.original_post_id,
            });
        }

        Ok(views)
    }

    /// Resolve a record's author. A missing author is an internal
    /// inconsistency: users are never deleted and every write checks its
    /// references.
    async fn author_of(&self, author_id: &str, record_id: &str) -> AppResult<User> {
        self.user_store.find_by_id(author_id).await.ok_or_else(|| {
            AppError::Internal(format!(
                "Record {record_id} references missing author {author_id}"
            ))
        })
    }
}
