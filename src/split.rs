//! Splitting the combined run output into its research and blog halves

use serde::Serialize;

/// Literal the writer is asked to put in front of the blog post
pub const BLOG_MARKER: &str = "BLOG POST:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitResult {
    pub research: String,
    pub blog: String,
    pub marker_found: bool,
}

/// Split on the first occurrence of [`BLOG_MARKER`].
///
/// Without a marker the whole text is research and the blog is empty. That
/// is a valid outcome, not an error.
pub fn split(text: &str) -> SplitResult {
    match text.split_once(BLOG_MARKER) {
        Some((research, blog)) => SplitResult {
            research: research.to_string(),
            blog: blog.to_string(),
            marker_found: true,
        },
        None => SplitResult {
            research: text.to_string(),
            blog: String::new(),
            marker_found: false,
        },
    }
}
