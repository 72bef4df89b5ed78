use thiserror::Error;

use super::task::TaskId;

/// Business-rule outcomes of the task operations. None of them is fatal; the
/// collection is left untouched whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("a task named {0:?} is already registered")]
    DuplicateTitle(String),
    #[error("no task with id {0}")]
    NotFound(TaskId),
    #[error("removal of task {0} was declined")]
    RemovalDeclined(TaskId),
}
