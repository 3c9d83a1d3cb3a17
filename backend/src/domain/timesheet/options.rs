//! Suggested values offered by the entry form.

use serde::Serialize;
use utoipa::ToSchema;

/// Projects suggested when logging time.
pub const PROJECT_OPTIONS: [&str; 3] = ["Website Redesign", "Mobile App", "Internal Tool"];

/// Work types suggested when logging time.
pub const WORK_TYPE_OPTIONS: [&str; 4] = ["Development", "Design", "Testing", "Bug fixes"];

/// Form choices returned to clients. Values outside these lists are still
/// accepted on entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryOptions {
    #[schema(example = json!(["Website Redesign", "Mobile App", "Internal Tool"]))]
    projects: Vec<&'static str>,
    #[schema(example = json!(["Development", "Design", "Testing", "Bug fixes"]))]
    work_types: Vec<&'static str>,
}

impl EntryOptions {
    /// Suggested project names.
    pub fn projects(&self) -> &[&'static str] {
        self.projects.as_slice()
    }

    /// Suggested work types.
    pub fn work_types(&self) -> &[&'static str] {
        self.work_types.as_slice()
    }
}

impl Default for EntryOptions {
    fn default() -> Self {
        Self {
            projects: PROJECT_OPTIONS.to_vec(),
            work_types: WORK_TYPE_OPTIONS.to_vec(),
        }
    }
}
