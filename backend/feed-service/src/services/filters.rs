//! Reusable post filter predicates
//!
//! Every feed strategy runs the same AND-combined chain. Each predicate
//! treats an absent filter as "matches everything".

use chrono::{DateTime, Utc};

use waypost_common::Post;

use crate::models::FeedQuery;

/// Category filter: an absent or empty filter matches everything; a post
/// without a category never matches a non-empty filter.
pub fn matches_categories(post: &Post, categories: Option<&[String]>) -> bool {
    let filter = match categories {
        Some(names) if !names.is_empty() => names,
        _ => return true,
    };

    match &post.category {
        Some(category) => filter.iter().any(|name| name == category),
        None => false,
    }
}

/// Keyword filter: case-insensitive substring search over title and
/// caption. An absent field is absent from the search, so a post with
/// neither title nor caption never matches a non-empty keyword.
pub fn matches_keyword(post: &Post, keyword: Option<&str>) -> bool {
    let keyword = match keyword {
        Some(k) if !k.is_empty() => k.to_lowercase(),
        _ => return true,
    };

    let field_contains = |field: &Option<String>| {
        field
            .as_deref()
            .map(|text| text.to_lowercase().contains(&keyword))
            .unwrap_or(false)
    };

    field_contains(&post.title) || field_contains(&post.caption)
}

/// Date-range filter with inclusive bounds. With no bounds at all the
/// range is open and matches every post; with at least one bound, a post
/// without a creation timestamp fails.
pub fn matches_date_range(
    post: &Post,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> bool {
    if from.is_none() && to.is_none() {
        return true;
    }

    let created_at = match post.created_at {
        Some(t) => t,
        None => return false,
    };

    if let Some(from) = from {
        if created_at < from {
            return false;
        }
    }
    if let Some(to) = to {
        if created_at > to {
            return false;
        }
    }

    true
}

/// AND combination of every predicate a query carries.
pub fn matches_query(post: &Post, query: &FeedQuery) -> bool {
    matches_categories(post, query.category_filter())
        && matches_keyword(post, query.keyword.as_deref())
        && matches_date_range(post, query.date_from, query.date_to)
}
