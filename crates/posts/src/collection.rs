//! Queries over compiled posts.
//!
//! Mirrors what the site's views need: the landing page wants the newest
//! few posts, the archive pages through everything, and the filter bar
//! works off tags and free-text search.

use crate::post::Post;

/// Number of posts the landing view shows.
pub const LATEST_POSTS_COUNT: usize = 3;
/// Posts per page in the archive view.
pub const POSTS_PER_PAGE: usize = 10;

/// Sorts posts for display: ascending order weight, ties broken by id.
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
}

/// Leading `count` posts of an already sorted slice. The landing view
/// passes [`LATEST_POSTS_COUNT`].
pub fn latest(posts: &[Post], count: usize) -> &[Post] {
    &posts[..posts.len().min(count)]
}

/// Posts carrying `tag`, compared case-insensitively.
pub fn with_tag<'a>(posts: &'a [Post], tag: &str) -> Vec<&'a Post> {
    let needle = tag.to_lowercase();
    posts
        .iter()
        .filter(|post| post.tags.iter().any(|t| t.to_lowercase() == needle))
        .collect()
}

/// Posts whose title or excerpt contains `query`, case-insensitively.
pub fn search<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    let needle = query.to_lowercase();
    posts
        .iter()
        .filter(|post| {
            post.title.to_lowercase().contains(&needle)
                || post.excerpt.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Every tag in use, sorted and deduplicated.
pub fn all_tags(posts: &[Post]) -> Vec<String> {
    let mut tags: Vec<String> = posts
        .iter()
        .flat_map(|post| post.tags.iter().cloned())
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

/// One page of posts, 1-based. Out-of-range pages are empty.
pub fn page(posts: &[Post], number: usize, per_page: usize) -> &[Post] {
    if per_page == 0 {
        return &[];
    }
    let start = number.saturating_sub(1).saturating_mul(per_page);
    if start >= posts.len() {
        return &[];
    }
    let end = (start + per_page).min(posts.len());
    &posts[start..end]
}

/// Number of pages needed for `total` posts.
pub fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 { 0 } else { total.div_ceil(per_page) }
}
