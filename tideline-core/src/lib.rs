//! Core domain types for the Tideline feed-ranking engine.
//!
//! The crate defines the signal set consumed by scoring, the [`Scorer`]
//! seam implemented by scoring engines, the [`RecentTopIds`] cache that
//! remembers identifiers recently surfaced in top feed slots, and the
//! [`rank_posts`] orchestrator that orders a batch by score. None of these
//! perform I/O; callers supply every signal already computed.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod cache;
mod post;
mod rank;
mod scorer;
mod signals;

pub use cache::RecentTopIds;
pub use post::Post;
pub use rank::{RECENT_TOP_PENALTY, rank_posts, top_ids};
pub use scorer::Scorer;
pub use signals::Signals;
