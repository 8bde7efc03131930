//! Popularity score and the display ordering for posts.
//!
//! Promoted posts always precede non-promoted posts. Within a tier the order
//! is by descending score, but scores within `SCORE_TIE_BAND` of each other
//! count as a tie and fall back to recency. The band is deliberate: it keeps
//! near-equal posts from swapping places as their age decay drifts apart.

use std::cmp::Ordering;

use super::model::{ForumModel, Post};
use super::types::{Timestamp, MS_PER_HOUR};

pub const TIP_SCORE_WEIGHT: f64 = 3.0;
pub const DOWNVOTE_SCORE_WEIGHT: f64 = 2.0;
pub const AGE_DECAY_PER_HOUR: f64 = 0.1;
pub const SCORE_TIE_BAND: f64 = 1.0;

pub fn popularity_score(post: &Post, now: Timestamp) -> f64 {
    let age_hours = now.saturating_sub(post.created_at) as f64 / MS_PER_HOUR as f64;
    post.tips as f64 * TIP_SCORE_WEIGHT
        - post.downvotes as f64 * DOWNVOTE_SCORE_WEIGHT
        - age_hours * AGE_DECAY_PER_HOUR
}

pub fn compare_posts(a: &Post, b: &Post, now: Timestamp) -> Ordering {
    match (a.promoted, b.promoted) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }

    let a_score = popularity_score(a, now);
    let b_score = popularity_score(b, now);
    if (a_score - b_score).abs() > SCORE_TIE_BAND {
        return b_score.partial_cmp(&a_score).unwrap_or(Ordering::Equal);
    }

    // Scores within the band: newer first.
    b.created_at.cmp(&a.created_at)
}

/// Posts in display order, optionally restricted to one category.
pub fn ranked_posts<'a>(
    model: &'a ForumModel,
    category: Option<&str>,
    now: Timestamp,
) -> Vec<&'a Post> {
    let mut posts: Vec<&Post> = model
        .posts
        .values()
        .filter(|post| category.map_or(true, |wanted| post.category == wanted))
        .collect();
    // The band-then-recency rule is not a total order: pairwise score gaps
    // that straddle the band can form comparison cycles, which `sort_by`
    // rejects at runtime. Insertion sort needs only the pairwise rule and
    // leaves no adjacent pair out of order.
    for unsorted in 1..posts.len() {
        let mut index = unsorted;
        while index > 0 && compare_posts(posts[index - 1], posts[index], now) == Ordering::Greater
        {
            posts.swap(index - 1, index);
            index -= 1;
        }
    }
    posts
}
