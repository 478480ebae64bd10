//! A feed item under evaluation.

use crate::Signals;

/// One post in a batch being ranked.
///
/// The `score` field starts at `0.0` and is written exactly once per ranking
/// pass by [`rank_posts`](crate::rank_posts); nothing else mutates the post.
/// Identifiers are expected to be unique within a batch. Duplicate or empty
/// identifiers are accepted, but ordering among posts sharing an identifier
/// is undefined once the recent-top penalty applies.
///
/// # Examples
///
/// ```
/// use tideline_core::{Post, Signals};
///
/// let post = Post::new("p1", "hello", 1_700_000_000, Signals::default());
/// assert_eq!(post.id, "p1");
/// assert_eq!(post.score, 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Post {
    /// Identifier, unique within a batch.
    pub id: String,
    /// Textual content.
    pub content: String,
    /// Creation time as Unix seconds.
    pub created_at: i64,
    /// Scoring inputs for this post.
    pub signals: Signals,
    /// Relevance score from the most recent ranking pass.
    #[cfg_attr(feature = "serde", serde(default))]
    pub score: f64,
}

impl Post {
    /// Construct a post with a zeroed score.
    pub fn new(
        id: impl Into<String>,
        content: impl Into<String>,
        created_at: i64,
        signals: Signals,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            created_at,
            signals,
            score: 0.0,
        }
    }
}
