//! Senior Research Analyst
//!
//! First stage of the pipeline. The only role with web search.

use super::descriptors::{Capability, RoleDescriptor, TaskDescriptor};

pub const ANALYST_NAME: &str = "Senior Research Analyst";

/// Results per web search made by the analyst
pub const SEARCH_RESULT_COUNT: usize = 5;

pub fn role(search_result_count: usize) -> RoleDescriptor {
    RoleDescriptor {
        name: ANALYST_NAME.to_string(),
        goal: "Research, analyze and synthesize".to_string(),
        backstory: "Expert researcher with years of experience in analyzing industry trends"
            .to_string(),
        allow_delegation: false,
        verbose: true,
        capabilities: vec![Capability::WebSearch {
            result_count: search_result_count,
        }],
    }
}

pub fn research_task(topic: &str) -> TaskDescriptor {
    TaskDescriptor {
        description: format!(
            r#"1. Conduct comprehensive research on {topic} including:
    - Recent developments and news
    - Key industry trends and innovations
    - Expert opinions and analyses
    - Statistical data and market insights
2. Evaluate source credibility and fact-check all information
3. Organize findings into a structured research brief
4. Include all relevant citations and sources"#,
            topic = topic
        ),
        expected_output: r#"A detailed research report containing:
    - Executive summary of key findings
    - Comprehensive analysis of current trends and developments
    - List of verified facts and statistics
    - All citations and links to original sources
    - Clear categorization of main themes and patterns"#
            .to_string(),
        assigned_role: ANALYST_NAME.to_string(),
    }
}
