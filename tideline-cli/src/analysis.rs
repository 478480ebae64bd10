//! Content analysis: derives the signals the payload does not carry.
//!
//! Everything here is pure string and number work over a single post, so the
//! functions stay trivially testable and the ranking layer owns all batching.

use crate::payload::Attachment;

/// Shortener and redirect hosts treated as suspicious link targets.
const SUSPICIOUS_DOMAINS: &[&str] = &[
    "bit.ly",
    "tinyurl.com",
    "goo.gl",
    "ow.ly",
    "t.co",
    "is.gd",
    "cli.gs",
    "tiny.cc",
    "cutt.ly",
    "rb.gy",
    "shorturl.at",
    "adf.ly",
    "ouo.io",
    "linktr.ee",
];

/// Phrases that each contribute [`SPAM_KEYWORD_WEIGHT`] to the keyword score.
const SPAM_KEYWORDS: &[&str] = &[
    "free money",
    "click here",
    "limited time",
    "act now",
    "buy now",
    "make money fast",
    "earn cash",
    "100% free",
    "no credit card",
    "winner",
    "you won",
    "congratulations",
    "exclusive offer",
    "special promotion",
    "dm for",
    "dm me",
    "check bio",
    "link in bio",
    "crypto giveaway",
    "airdrop",
    "nft drop",
    "whitelist",
    "presale",
    "pump",
    "moon",
    "lambo",
    "10x",
    "100x",
    "1000x",
    "guaranteed profit",
    "passive income",
    "work from home",
    "be your own boss",
    "financial freedom",
    "get rich",
    "s3x",
    "xxx",
    "onlyfans",
    "subscribe to my",
    "follow for follow",
    "f4f",
    "like4like",
    "retweet to win",
    "rt to win",
    "cashapp",
    "paypal me",
    "venmo me",
    "send btc",
    "send eth",
];

/// Score contributed by each matched spam phrase.
const SPAM_KEYWORD_WEIGHT: f64 = 0.15;

/// Upper bound on the engagement velocity signal, in interactions per hour.
const VELOCITY_CAP: f64 = 10.0;

/// Floor on post age when computing velocity, to keep brand-new posts sane.
const MIN_AGE_HOURS: f64 = 0.1;

/// URL metrics extracted from post content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrlMetrics {
    /// Total URLs found.
    pub url_count: u32,
    /// URLs whose host resolves to a suspicious domain.
    pub suspicious_count: u32,
}

/// Lowercases content, strips URLs, and collapses whitespace.
///
/// The result is the key used to detect duplicated content across a batch;
/// an empty key means the post has no comparable text.
pub fn normalise_content(content: &str) -> String {
    let lowered = content.to_lowercase();
    let mut pieces = Vec::new();
    for token in lowered.split_whitespace() {
        let kept = scheme_offset(token).map_or(token, |idx| &token[..idx]);
        if !kept.is_empty() {
            pieces.push(kept);
        }
    }
    pieces.join(" ")
}

/// Counts URLs in the content and how many point at suspicious hosts.
pub fn extract_url_metrics(content: &str) -> UrlMetrics {
    let mut metrics = UrlMetrics::default();
    for token in content.split_whitespace() {
        let Some(idx) = scheme_offset(token) else {
            continue;
        };
        metrics.url_count += 1;
        if hostname(&token[idx..]).is_some_and(|host| is_suspicious_host(&host)) {
            metrics.suspicious_count += 1;
        }
    }
    metrics
}

/// Counts `#word` hashtags in the content.
pub fn count_hashtags(content: &str) -> u32 {
    count_sigils(content, '#')
}

/// Counts `@name` mentions in the content.
pub fn count_mentions(content: &str) -> u32 {
    count_sigils(content, '@')
}

/// Emoji characters relative to a floor of the non-whitespace length.
///
/// The floor keeps short posts from registering as emoji-heavy; the result
/// is capped at `1.0`.
pub fn emoji_density(content: &str) -> f64 {
    let emojis = content.chars().filter(|&ch| is_emoji(ch)).count();
    let non_whitespace = content.chars().filter(|ch| !ch.is_whitespace()).count();
    if non_whitespace == 0 {
        return 0.0;
    }
    let floor = (non_whitespace as f64 / 4.0).max(15.0);
    (emojis as f64 / floor).min(1.0)
}

/// Fraction of known spam phrases present in the content, capped at `1.0`.
pub fn spam_keyword_score(content: &str) -> f64 {
    let lowered = content.to_lowercase();
    let mut score = 0.0;
    for keyword in SPAM_KEYWORDS {
        if lowered.contains(keyword) {
            score += SPAM_KEYWORD_WEIGHT;
        }
    }
    score.min(1.0)
}

/// Retweet-to-like ratio in `0..=1`, used to spot amplification anomalies.
pub fn retweet_like_ratio(retweet_count: u32, like_count: u32) -> f64 {
    if like_count == 0 && retweet_count == 0 {
        return 0.0;
    }
    if like_count == 0 {
        return (f64::from(retweet_count) * 0.1).min(1.0);
    }
    (f64::from(retweet_count) / f64::from(like_count + 1)).min(1.0)
}

/// Interactions per hour of post age, floored at [`MIN_AGE_HOURS`] and
/// capped at [`VELOCITY_CAP`].
pub fn engagement_velocity(
    like_count: u32,
    retweet_count: u32,
    reply_count: u32,
    age_seconds: i64,
) -> f64 {
    if age_seconds <= 0 {
        return 0.0;
    }
    let total = f64::from(like_count) + f64::from(retweet_count) + f64::from(reply_count);
    let hours = (age_seconds as f64 / 3_600.0).max(MIN_AGE_HOURS);
    (total / hours).min(VELOCITY_CAP)
}

/// Novelty multiplier from hours since the viewer last saw the post.
///
/// Never-seen content (negative hours) earns the full boost; content last
/// seen over three days ago earns a small one.
pub fn novelty_factor(hours_since_seen: f64) -> f64 {
    if hours_since_seen < 0.0 {
        1.2
    } else if hours_since_seen > 72.0 {
        1.05
    } else {
        1.0
    }
}

/// Whether any attachment looks like video, by type, MIME type, or URL.
pub fn has_video_attachment(attachments: &[Attachment]) -> bool {
    attachments.iter().any(|attachment| {
        attachment.kind.as_deref() == Some("video")
            || attachment
                .mime_type
                .as_deref()
                .is_some_and(|mime| mime.starts_with("video/"))
            || attachment
                .url
                .as_deref()
                .is_some_and(has_video_extension)
    })
}

/// Byte offset of the first `http://` or `https://` in the token.
fn scheme_offset(token: &str) -> Option<usize> {
    (0..token.len()).find(|&idx| {
        token.get(idx..).is_some_and(|rest| {
            starts_with_ignore_case(rest, "http://") || starts_with_ignore_case(rest, "https://")
        })
    })
}

fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
    haystack
        .as_bytes()
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
}

/// The lowercased host of a URL, without userinfo or port.
fn hostname(url: &str) -> Option<String> {
    let after_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .or_else(|| strip_scheme_ignore_case(url))?;
    let authority = after_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or(after_scheme);
    let host_port = authority.rsplit('@').next().unwrap_or(authority);
    let host = host_port.split(':').next().unwrap_or(host_port);
    if host.is_empty() {
        None
    } else {
        Some(host.to_lowercase())
    }
}

fn strip_scheme_ignore_case(url: &str) -> Option<&str> {
    if starts_with_ignore_case(url, "https://") {
        url.get("https://".len()..)
    } else if starts_with_ignore_case(url, "http://") {
        url.get("http://".len()..)
    } else {
        None
    }
}

fn is_suspicious_host(host: &str) -> bool {
    SUSPICIOUS_DOMAINS.iter().any(|domain| {
        host == *domain || host.strip_suffix(domain).is_some_and(|rest| rest.ends_with('.'))
    })
}

/// Counts occurrences of `sigil` immediately followed by a word character.
fn count_sigils(content: &str, sigil: char) -> u32 {
    let mut count = 0;
    let mut chars = content.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != sigil {
            continue;
        }
        if chars
            .peek()
            .is_some_and(|&next| next.is_ascii_alphanumeric() || next == '_')
        {
            count += 1;
            // Consume the word so `#a#b` counts each tag once.
            while chars
                .peek()
                .is_some_and(|&next| next.is_ascii_alphanumeric() || next == '_')
            {
                chars.next();
            }
        }
    }
    count
}

fn is_emoji(ch: char) -> bool {
    matches!(
        u32::from(ch),
        0x1F600..=0x1F64F
            | 0x1F300..=0x1F5FF
            | 0x1F680..=0x1F6FF
            | 0x1F900..=0x1F9FF
            | 0x2600..=0x26FF
            | 0x2700..=0x27BF
    )
}

fn has_video_extension(url: &str) -> bool {
    let lowered = url.to_lowercase();
    [".mp4", ".webm", ".mov", ".avi"]
        .iter()
        .any(|ext| lowered.ends_with(ext))
}
