//! Decodes a timeline payload, derives signals, ranks, and re-encodes.

use std::collections::HashMap;

use rand::Rng;
use tideline_core::{Post, RECENT_TOP_PENALTY, RecentTopIds, Signals, rank_posts, top_ids};
use tideline_scorer::RelevanceScorer;

use crate::analysis;
use crate::payload::{PostRecord, RankedPayload, RankedRecord, TimelinePayload};

/// Default display window when the caller does not request one.
const DEFAULT_LIMIT: usize = 10;

/// Largest display window a caller may request.
const MAX_LIMIT: usize = 60;

/// Ranks a decoded payload.
///
/// Derives the content signals each post is missing, then scores and sorts
/// the batch. The output timeline is the full reordered batch, display
/// window first, with `top_ids` naming the window so callers can truncate
/// or feed a recent-top cache. `now` is the current time in Unix seconds;
/// the payload's own `now` field, when present, takes precedence so callers
/// can replay a batch deterministically.
pub fn rank_timeline<R: Rng>(
    payload: TimelinePayload,
    scorer: &RelevanceScorer,
    rng: &mut R,
    now: i64,
) -> RankedPayload {
    let now = payload.now.unwrap_or(now);

    let mut recent = RecentTopIds::new();
    recent.replace_all(payload.recent_top);

    let author_counts = count_by_key(&payload.timeline, |record| {
        record.author_key().map(str::to_owned)
    });
    let content_counts = count_by_key(&payload.timeline, |record| {
        let key = analysis::normalise_content(&record.content);
        (!key.is_empty()).then_some(key)
    });
    let all_seen = !payload.timeline.is_empty()
        && payload
            .timeline
            .iter()
            .all(|record| payload.seen.contains_key(&record.id));

    let limit = resolve_limit(payload.limit, payload.timeline.len());
    log::debug!(
        "ranking {} posts into a window of {limit} (all_seen: {all_seen})",
        payload.timeline.len()
    );

    let mut records: HashMap<String, Vec<PostRecord>> = HashMap::new();
    let mut posts = Vec::with_capacity(payload.timeline.len());
    for record in payload.timeline {
        let signals = derive_signals(
            &record,
            &payload.seen,
            &author_counts,
            &content_counts,
            all_seen,
            rng,
            now,
        );
        let created_at = record.created_at.unwrap_or(now);
        posts.push(Post::new(record.id.clone(), record.content.clone(), created_at, signals));
        records.entry(record.id.clone()).or_default().push(record);
    }

    rank_posts(&mut posts, scorer, &recent, RECENT_TOP_PENALTY);

    let top = top_ids(&posts, limit);
    let mut timeline = Vec::with_capacity(posts.len());
    for post in posts {
        // Duplicate identifiers consume their records in arrival order.
        let Some(record) = records.get_mut(&post.id).and_then(|queue| {
            if queue.is_empty() {
                None
            } else {
                Some(queue.remove(0))
            }
        }) else {
            continue;
        };
        timeline.push(RankedRecord {
            post: record,
            score: post.score,
        });
    }

    RankedPayload {
        timeline,
        top_ids: top,
    }
}

/// Builds the full signal set for one post.
fn derive_signals<R: Rng>(
    record: &PostRecord,
    seen: &HashMap<String, Option<i64>>,
    author_counts: &HashMap<String, u32>,
    content_counts: &HashMap<String, u32>,
    all_seen: bool,
    rng: &mut R,
    now: i64,
) -> Signals {
    let hours_since_seen = match seen.get(&record.id) {
        Some(Some(seen_at)) => ((now - seen_at) as f64 / 3_600.0).max(0.0),
        // Seen with an unknown time still counts as never shown for decay.
        Some(None) | None => -1.0,
    };

    let author_repeats = record
        .author_key()
        .and_then(|key| author_counts.get(key))
        .map_or(0, |count| count.saturating_sub(1));
    let content_key = analysis::normalise_content(&record.content);
    let content_repeats = if content_key.is_empty() {
        0
    } else {
        content_counts
            .get(&content_key)
            .map_or(0, |count| count.saturating_sub(1))
    };

    let url_metrics = analysis::extract_url_metrics(&record.content);
    let age_seconds = record.created_at.map_or(0, |created| now - created);

    Signals {
        like_count: record.like_count,
        retweet_count: record.retweet_count,
        reply_count: record.reply_count,
        quote_count: record.quote_count,
        has_media: record.has_media(),
        is_video: analysis::has_video_attachment(&record.attachments),
        hours_since_seen,
        seen_count: 0,
        author_repeats,
        content_repeats,
        cluster_size: record.cluster_size,
        all_seen,
        novelty_factor: analysis::novelty_factor(hours_since_seen),
        random_factor: rng.r#gen(),
        verified: record.is_verified(),
        gold: record.is_gold(),
        follower_count: record.followers(),
        has_community_note: record.has_community_note,
        super_tweeter_boost: record.super_boost(),
        blocked_by_count: record.blocked_by(),
        muted_by_count: record.muted_by(),
        spam_score: record.spam(),
        account_age_days: record.account_age_days(now),
        url_count: url_metrics.url_count,
        suspicious_url_count: url_metrics.suspicious_count,
        hashtag_count: analysis::count_hashtags(&record.content),
        mention_count: analysis::count_mentions(&record.content),
        emoji_density: analysis::emoji_density(&record.content),
        spam_keyword_score: analysis::spam_keyword_score(&record.content),
        retweet_like_ratio: analysis::retweet_like_ratio(record.retweet_count, record.like_count),
        engagement_velocity: analysis::engagement_velocity(
            record.like_count,
            record.retweet_count,
            record.reply_count,
            age_seconds,
        ),
        author_timing_score: record.timing_score(),
    }
}

/// Clamps the requested window to `1..=MAX_LIMIT` and the batch size.
///
/// Zero means "no preference" and takes the default window, like an absent
/// limit.
fn resolve_limit(requested: Option<u32>, batch_len: usize) -> usize {
    let limit = match requested {
        None | Some(0) => DEFAULT_LIMIT,
        Some(value) => (value as usize).clamp(1, MAX_LIMIT),
    };
    limit.min(batch_len)
}

fn count_by_key<F>(records: &[PostRecord], key_of: F) -> HashMap<String, u32>
where
    F: Fn(&PostRecord) -> Option<String>,
{
    let mut counts = HashMap::new();
    for record in records {
        if let Some(key) = key_of(record) {
            *counts.entry(key).or_insert(0) += 1;
        }
    }
    counts
}
