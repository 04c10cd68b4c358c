//! Content Writer
//!
//! Second stage. Turns the research brief into a blog post. Its output is
//! expected to open with the blog marker so the combined result can be
//! split, but nothing enforces that beyond the instruction itself.

use super::descriptors::{RoleDescriptor, TaskDescriptor};
use crate::split::BLOG_MARKER;

pub const WRITER_NAME: &str = "Content Writer";

pub fn role() -> RoleDescriptor {
    RoleDescriptor {
        name: WRITER_NAME.to_string(),
        goal: "Transform research findings into engaging blog post while maintaining accuracy"
            .to_string(),
        backstory: "Experienced content writer specializing in technical and industry analysis"
            .to_string(),
        allow_delegation: false,
        verbose: true,
        capabilities: vec![],
    }
}

pub fn writing_task() -> TaskDescriptor {
    TaskDescriptor {
        description: r#"Using the research brief provided, create an engaging blog post that:
    1. Transforms technical information into accessible content
    2. Maintains all factual accuracy and citations from the research
    3. Includes:
        - Attention-grabbing introduction
        - Well-structured body sections with clear headings
        - Compelling conclusion
    4. Preserves all source citations in [Source: URL] format
    5. Includes a References section at the end"#
            .to_string(),
        expected_output: format!(
            r#"A polished blog post in markdown format that:
    - Starts with the line "{marker}" followed by the post
    - Engages readers while maintaining accuracy
    - Contains properly structured sections
    - Includes inline citations hyperlinked to the original source URL
    - Presents information in an accessible yet informative way
    - Follows proper markdown formatting"#,
            marker = BLOG_MARKER
        ),
        assigned_role: WRITER_NAME.to_string(),
    }
}
