//! Agent System
//!
//! Role and task definitions for the two-stage content pipeline:
//!
//! - **Senior Research Analyst**: researches the topic with web search
//! - **Content Writer**: turns the research brief into a blog post
//!
//! ## Pipeline Overview
//!
//! ```text
//!    Topic
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Research   │  → Web search + research brief
//! │   Analyst   │
//! └─────────────┘
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Content    │  → "BLOG POST:" + markdown post
//! │   Writer    │
//! └─────────────┘
//!      │
//!      ▼
//!  Combined text
//! ```

pub mod analyst;
pub mod descriptors;
pub mod writer;

pub use descriptors::{Capability, Crew, RoleDescriptor, TaskDescriptor};

/// Everything one run needs, built fresh per topic
#[derive(Debug, Clone)]
pub struct PipelineSetup {
    pub analyst: RoleDescriptor,
    pub writer: RoleDescriptor,
    pub research_task: TaskDescriptor,
    pub writing_task: TaskDescriptor,
}

impl PipelineSetup {
    /// Roles and tasks in execution order
    pub fn into_crew(self) -> Crew {
        Crew {
            roles: vec![self.analyst, self.writer],
            tasks: vec![self.research_task, self.writing_task],
        }
    }
}

/// Build the roles and tasks for a topic. The topic is not validated; an
/// empty topic flows into the research template as is.
pub fn configure(topic: &str) -> PipelineSetup {
    configure_with_search(topic, analyst::SEARCH_RESULT_COUNT)
}

pub fn configure_with_search(topic: &str, search_result_count: usize) -> PipelineSetup {
    PipelineSetup {
        analyst: analyst::role(search_result_count),
        writer: writer::role(),
        research_task: analyst::research_task(topic),
        writing_task: writer::writing_task(),
    }
}
