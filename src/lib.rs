//! Facade crate for the Tideline feed-ranking engine.
//!
//! This crate re-exports the core domain types, the recent-top cache, the
//! ranking orchestrator, and the default weighted scorer so most callers can
//! depend on a single crate.

#![forbid(unsafe_code)]

pub use tideline_core::{
    Post, RecentTopIds, Scorer, Signals, rank_posts, top_ids, RECENT_TOP_PENALTY,
};

pub use tideline_scorer::{RelevanceScorer, RelevanceWeights, WeightsError};
