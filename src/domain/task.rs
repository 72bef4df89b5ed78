use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TaskId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub done: bool,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            done: false,
        }
    }
}

/// Payload of an inline title edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTask {
    pub task_id: TaskId,
    pub new_title: String,
}
