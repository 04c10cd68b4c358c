//! Role and task descriptors handed to the orchestrator

use serde::Serialize;

/// A tool a role may use while working on its task
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Capability {
    WebSearch { result_count: usize },
}

/// Static persona for one stage of the pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleDescriptor {
    pub name: String,
    pub goal: String,
    pub backstory: String,
    pub allow_delegation: bool,
    pub verbose: bool,
    pub capabilities: Vec<Capability>,
}

impl RoleDescriptor {
    pub fn search_result_count(&self) -> Option<usize> {
        self.capabilities.iter().find_map(|c| match c {
            Capability::WebSearch { result_count } => Some(*result_count),
        })
    }

    /// Persona prompt sent as the system instruction
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {}. {}\nYour personal goal is: {}",
            self.name, self.backstory, self.goal
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskDescriptor {
    pub description: String,
    pub expected_output: String,
    /// Name of the role that performs this task
    pub assigned_role: String,
}

/// Ordered roles and tasks for one orchestration call
#[derive(Debug, Clone, Serialize)]
pub struct Crew {
    pub roles: Vec<RoleDescriptor>,
    pub tasks: Vec<TaskDescriptor>,
}

impl Crew {
    pub fn role_for(&self, task: &TaskDescriptor) -> Option<&RoleDescriptor> {
        self.roles.iter().find(|r| r.name == task.assigned_role)
    }
}
