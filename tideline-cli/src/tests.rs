//! Unit and end-to-end coverage for the timeline CLI.

use std::io::Write as _;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rstest::rstest;
use tideline_scorer::RelevanceScorer;

use crate::analysis::{
    UrlMetrics, count_hashtags, count_mentions, emoji_density, engagement_velocity,
    extract_url_metrics, has_video_attachment, normalise_content, novelty_factor,
    retweet_like_ratio, spam_keyword_score,
};
use crate::payload::{Attachment, PostRecord, TimelinePayload};
use crate::{Cli, CliError, build_scorer, rank, run_with};

fn record(id: &str, likes: u32) -> PostRecord {
    PostRecord {
        id: id.to_owned(),
        like_count: likes,
        ..PostRecord::default()
    }
}

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(7)
}

#[rstest]
#[case("no links here", UrlMetrics { url_count: 0, suspicious_count: 0 })]
#[case("see https://example.com/post", UrlMetrics { url_count: 1, suspicious_count: 0 })]
#[case("go https://bit.ly/abc now", UrlMetrics { url_count: 1, suspicious_count: 1 })]
#[case(
    "https://sub.bit.ly/x and HTTP://EXAMPLE.ORG",
    UrlMetrics { url_count: 2, suspicious_count: 1 }
)]
fn url_metrics_flag_shortener_hosts(#[case] content: &str, #[case] expected: UrlMetrics) {
    assert_eq!(extract_url_metrics(content), expected);
}

#[rstest]
fn hostname_matching_ignores_port_and_path() {
    let metrics = extract_url_metrics("https://bit.ly:443/deep/path?q=1");
    assert_eq!(metrics.suspicious_count, 1);
}

#[rstest]
#[case("#one #two and #three_3", 3)]
#[case("no tags", 0)]
#[case("## doubled #ok", 1)]
fn hashtags_are_counted(#[case] content: &str, #[case] expected: u32) {
    assert_eq!(count_hashtags(content), expected);
}

#[rstest]
#[case("@alice hello @bob", 2)]
#[case("mail me at example @ example.com", 0)]
fn mentions_are_counted(#[case] content: &str, #[case] expected: u32) {
    assert_eq!(count_mentions(content), expected);
}

#[rstest]
fn emoji_density_is_zero_for_plain_text() {
    assert_eq!(emoji_density("just words"), 0.0);
    assert_eq!(emoji_density(""), 0.0);
}

#[rstest]
fn emoji_density_is_capped_at_one() {
    let wall = "😀".repeat(100);
    assert!(emoji_density(&wall) <= 1.0);
    assert!(emoji_density(&wall) > 0.9);
}

#[rstest]
fn spam_keywords_accumulate_and_cap() {
    assert_eq!(spam_keyword_score("a perfectly normal post"), 0.0);
    let one = spam_keyword_score("Crypto Giveaway today");
    assert!((one - 0.15).abs() < 1e-9);
    let many = spam_keyword_score(
        "free money click here limited time act now buy now winner you won congratulations",
    );
    assert_eq!(many, 1.0);
}

#[rstest]
#[case(0, 0, 0.0)]
#[case(5, 0, 0.5)]
#[case(30, 0, 1.0)]
#[case(10, 9, 1.0)]
#[case(5, 99, 0.05)]
fn retweet_like_ratio_follows_the_rules(
    #[case] retweets: u32,
    #[case] likes: u32,
    #[case] expected: f64,
) {
    assert!((retweet_like_ratio(retweets, likes) - expected).abs() < 1e-9);
}

#[rstest]
fn velocity_is_zero_for_future_posts_and_capped_otherwise() {
    assert_eq!(engagement_velocity(100, 0, 0, 0), 0.0);
    assert_eq!(engagement_velocity(100, 0, 0, -60), 0.0);
    // 1000 interactions in one hour blows through the cap.
    assert_eq!(engagement_velocity(1_000, 0, 0, 3_600), 10.0);
    let slow = engagement_velocity(10, 0, 0, 7_200);
    assert!((slow - 5.0).abs() < 1e-9);
}

#[rstest]
#[case(-1.0, 1.2)]
#[case(0.0, 1.0)]
#[case(72.0, 1.0)]
#[case(73.0, 1.05)]
fn novelty_factor_brackets_hours(#[case] hours: f64, #[case] expected: f64) {
    assert_eq!(novelty_factor(hours), expected);
}

#[rstest]
fn video_attachments_are_detected_by_any_hint() {
    let by_kind = Attachment {
        kind: Some("video".to_owned()),
        ..Attachment::default()
    };
    let by_mime = Attachment {
        mime_type: Some("video/mp4".to_owned()),
        ..Attachment::default()
    };
    let by_url = Attachment {
        url: Some("https://cdn.example/c.MOV".to_owned()),
        ..Attachment::default()
    };
    let image = Attachment {
        kind: Some("image".to_owned()),
        ..Attachment::default()
    };
    assert!(has_video_attachment(&[by_kind]));
    assert!(has_video_attachment(&[by_mime]));
    assert!(has_video_attachment(&[image.clone(), by_url]));
    assert!(!has_video_attachment(&[image]));
    assert!(!has_video_attachment(&[]));
}

#[rstest]
fn normalised_content_strips_urls_and_case() {
    assert_eq!(
        normalise_content("Check THIS https://example.com/x  out"),
        "check this out"
    );
    assert_eq!(normalise_content("   "), "");
}

#[rstest]
fn minimal_payload_decodes_with_defaults() {
    let payload: TimelinePayload =
        serde_json::from_str(r#"{"timeline": [{"id": "a"}]}"#).unwrap();
    assert_eq!(payload.timeline.len(), 1);
    assert!(payload.seen.is_empty());
    assert!(payload.recent_top.is_empty());
    assert_eq!(payload.limit, None);
}

#[rstest]
fn author_signals_fall_back_to_the_nested_record() {
    let post: PostRecord = serde_json::from_str(
        r#"{"id": "a", "author": {"id": "u1", "verified": true, "follower_count": 500}}"#,
    )
    .unwrap();
    assert_eq!(post.author_key(), Some("u1"));
    assert!(post.is_verified());
    assert_eq!(post.followers(), 500);
}

#[rstest]
fn ranking_orders_by_engagement_and_windows() {
    let payload = TimelinePayload {
        timeline: vec![record("low", 1), record("high", 5_000), record("mid", 200)],
        limit: Some(2),
        now: Some(1_700_000_000),
        ..TimelinePayload::default()
    };
    let ranked = rank::rank_timeline(
        payload,
        &RelevanceScorer::with_defaults(),
        &mut rng(),
        1_700_000_000,
    );
    let ids: Vec<&str> = ranked.timeline.iter().map(|r| r.post.id.as_str()).collect();
    assert_eq!(ids, ["high", "mid", "low"]);
    assert_eq!(ranked.top_ids, ["high", "mid"]);
}

#[rstest]
fn the_remainder_follows_the_window_in_rank_order() {
    let timeline: Vec<PostRecord> = (0..30).map(|n| record(&format!("p{n}"), n * 40)).collect();
    let payload = TimelinePayload {
        timeline,
        limit: Some(5),
        now: Some(1_700_000_000),
        ..TimelinePayload::default()
    };
    let ranked = rank::rank_timeline(
        payload,
        &RelevanceScorer::with_defaults(),
        &mut rng(),
        1_700_000_000,
    );
    // Nothing is dropped, and scores stay descending past the window.
    assert_eq!(ranked.timeline.len(), 30);
    assert_eq!(ranked.top_ids.len(), 5);
    assert!(
        ranked
            .timeline
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score)
    );
}

#[rstest]
#[case(None)]
#[case(Some(0))]
fn missing_or_zero_limits_take_the_default_window(#[case] limit: Option<u32>) {
    let timeline: Vec<PostRecord> = (0..25).map(|n| record(&format!("p{n}"), n)).collect();
    let payload = TimelinePayload {
        timeline,
        limit,
        now: Some(1_700_000_000),
        ..TimelinePayload::default()
    };
    let ranked = rank::rank_timeline(
        payload,
        &RelevanceScorer::with_defaults(),
        &mut rng(),
        1_700_000_000,
    );
    assert_eq!(ranked.timeline.len(), 25);
    assert_eq!(ranked.top_ids.len(), 10);
}

#[rstest]
fn oversized_limits_are_clamped() {
    let timeline: Vec<PostRecord> = (0..100).map(|n| record(&format!("p{n}"), n)).collect();
    let payload = TimelinePayload {
        timeline,
        limit: Some(500),
        now: Some(1_700_000_000),
        ..TimelinePayload::default()
    };
    let ranked = rank::rank_timeline(
        payload,
        &RelevanceScorer::with_defaults(),
        &mut rng(),
        1_700_000_000,
    );
    assert_eq!(ranked.timeline.len(), 100);
    assert_eq!(ranked.top_ids.len(), 60);
}

#[rstest]
fn recent_top_ids_are_pushed_down() {
    let payload = TimelinePayload {
        timeline: vec![record("a", 100), record("b", 100)],
        recent_top: vec!["a".to_owned()],
        now: Some(1_700_000_000),
        ..TimelinePayload::default()
    };
    let ranked = rank::rank_timeline(
        payload,
        &RelevanceScorer::with_defaults(),
        &mut rng(),
        1_700_000_000,
    );
    let ids: Vec<&str> = ranked.timeline.iter().map(|r| r.post.id.as_str()).collect();
    assert_eq!(ids, ["b", "a"]);
}

#[rstest]
fn seen_posts_decay_against_unseen_ones() {
    let mut seen = std::collections::HashMap::new();
    // Seen two full days ago.
    seen.insert("old".to_owned(), Some(1_700_000_000 - 48 * 3_600));
    let payload = TimelinePayload {
        timeline: vec![record("old", 300), record("new", 300)],
        seen,
        now: Some(1_700_000_000),
        ..TimelinePayload::default()
    };
    let ranked = rank::rank_timeline(
        payload,
        &RelevanceScorer::with_defaults(),
        &mut rng(),
        1_700_000_000,
    );
    let ids: Vec<&str> = ranked.timeline.iter().map(|r| r.post.id.as_str()).collect();
    assert_eq!(ids, ["new", "old"]);
}

#[rstest]
fn identical_seeds_reproduce_the_ranking() {
    let make = || TimelinePayload {
        timeline: (0..20).map(|n| record(&format!("p{n}"), 50)).collect(),
        now: Some(1_700_000_000),
        ..TimelinePayload::default()
    };
    let scorer = RelevanceScorer::with_defaults();
    let first = rank::rank_timeline(make(), &scorer, &mut rng(), 1_700_000_000);
    let second = rank::rank_timeline(make(), &scorer, &mut rng(), 1_700_000_000);
    assert_eq!(first.top_ids, second.top_ids);
}

#[rstest]
fn empty_timelines_rank_to_empty_output() {
    let ranked = rank::rank_timeline(
        TimelinePayload::default(),
        &RelevanceScorer::with_defaults(),
        &mut rng(),
        1_700_000_000,
    );
    assert!(ranked.timeline.is_empty());
    assert!(ranked.top_ids.is_empty());
}

#[rstest]
fn run_with_reads_a_payload_file_and_writes_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"timeline": [{{"id": "a", "like_count": 3}}, {{"id": "b", "like_count": 900}}]}}"#
    )
    .unwrap();
    let cli = Cli {
        payload: Some(file.path().to_path_buf()),
        weights: None,
        seed: Some(7),
        now: Some(1_700_000_000),
    };
    let mut output = Vec::new();
    run_with(cli, &mut output).unwrap();
    let ranked: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(ranked["top_ids"][0], "b");
    assert_eq!(ranked["timeline"][0]["id"], "b");
}

#[rstest]
fn malformed_payloads_are_reported_not_emptied() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    let cli = Cli {
        payload: Some(file.path().to_path_buf()),
        weights: None,
        seed: Some(7),
        now: Some(1_700_000_000),
    };
    let mut output = Vec::new();
    let err = run_with(cli, &mut output).unwrap_err();
    assert!(matches!(err, CliError::ParsePayload(_)));
    assert!(output.is_empty());
}

#[rstest]
fn weights_files_override_the_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"media_bonus": 9.5}}"#).unwrap();
    let scorer = build_scorer(Some(file.path())).unwrap();
    assert_eq!(scorer.weights().media_bonus, 9.5);
}

#[rstest]
fn invalid_weights_files_are_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"spam_scale": -2.0}}"#).unwrap();
    let err = build_scorer(Some(file.path())).unwrap_err();
    assert!(matches!(err, CliError::InvalidWeights(_)));
}
