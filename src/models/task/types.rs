use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{flexible_id, nullable_string};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Pending,
    #[serde(alias = "in_progress")]
    InProgress,
    Completed,
    Overdue,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Overdue,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Overdue => "overdue",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Overdue => "Overdue",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown task status '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

/// `assignedBy` / `assignedTo` arrive either as a bare id or as a populated
/// employee document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PersonRef {
    Id(String),
    Person {
        #[serde(default, alias = "_id", deserialize_with = "flexible_id")]
        id: String,
        #[serde(default, deserialize_with = "nullable_string")]
        name: String,
        #[serde(default, deserialize_with = "nullable_string")]
        email: String,
    },
}

impl PersonRef {
    pub fn display_name(&self) -> &str {
        match self {
            PersonRef::Id(id) => id,
            PersonRef::Person { name, email, id } => {
                if !name.is_empty() {
                    name
                } else if !email.is_empty() {
                    email
                } else {
                    id
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default, alias = "_id", deserialize_with = "flexible_id")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub progress: i64,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub assigned_by: Option<PersonRef>,
    #[serde(default)]
    pub assigned_to: Option<PersonRef>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

impl Task {
    /// Progress clamped to 0..=100 for display.
    pub fn progress_percent(&self) -> u8 {
        self.progress.clamp(0, 100) as u8
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressUpdate {
    pub progress: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardTask {
    pub assigned_to: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub note: String,
}

/// Counts per status for dashboard tiles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub overdue: usize,
}

impl TaskCounts {
    pub fn tally(tasks: &[Task]) -> Self {
        let mut counts = Self::default();
        for task in tasks {
            match task.status {
                TaskStatus::Pending => counts.pending += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::Completed => counts.completed += 1,
                TaskStatus::Overdue => counts.overdue += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_task_variants() {
        let json = r#"[
            {"_id": "t1", "title": "Call leads", "status": "in-progress", "priority": "high",
             "progress": 40, "assignedBy": {"_id": "e1", "name": "Meera"}, "assignedTo": "e2",
             "highlights": ["Q3"]},
            {"id": 2, "title": "Report", "progress": 140}
        ]"#;
        let tasks: Vec<Task> = serde_json::from_str(json).unwrap();
        assert_eq!(tasks[0].status, TaskStatus::InProgress);
        assert_eq!(tasks[0].priority, Priority::High);
        assert_eq!(tasks[0].assigned_by.as_ref().unwrap().display_name(), "Meera");
        assert_eq!(tasks[0].assigned_to.as_ref().unwrap().display_name(), "e2");
        assert_eq!(tasks[1].id, "2");
        assert_eq!(tasks[1].status, TaskStatus::Pending);
        assert_eq!(tasks[1].priority, Priority::Medium);
        assert_eq!(tasks[1].progress_percent(), 100);
    }

    #[test]
    fn test_status_round_trip_through_form_value() {
        for st in TaskStatus::ALL {
            assert_eq!(st.as_str().parse::<TaskStatus>().unwrap(), st);
        }
        assert!("done".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_tally() {
        let tasks = vec![
            Task { status: TaskStatus::Overdue, ..Task::default() },
            Task { status: TaskStatus::Overdue, ..Task::default() },
            Task { status: TaskStatus::Completed, ..Task::default() },
        ];
        let counts = TaskCounts::tally(&tasks);
        assert_eq!(counts.overdue, 2);
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.pending, 0);
    }
}
