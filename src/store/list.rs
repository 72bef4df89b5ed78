//! Pure transforms from one task snapshot to the next.
//!
//! Each function either returns a freshly built collection or `None` when the
//! input leaves the collection unchanged, so callers can keep the old snapshot
//! on a no-op.

use std::rc::Rc;

use crate::domain::task::{EditTask, Task, TaskId};

pub type Snapshot = Rc<[Task]>;

pub fn empty() -> Snapshot {
    Rc::from(Vec::new())
}

pub fn find_by_title<'a>(tasks: &'a [Task], title: &str) -> Option<&'a Task> {
    tasks.iter().find(|t| t.title == title)
}

pub fn appended(tasks: &[Task], task: Task) -> Snapshot {
    let mut next = Vec::with_capacity(tasks.len() + 1);
    next.extend_from_slice(tasks);
    next.push(task);
    next.into()
}

pub fn toggled(tasks: &[Task], id: TaskId) -> Option<Snapshot> {
    if !tasks.iter().any(|t| t.id == id) {
        return None;
    }
    Some(
        tasks
            .iter()
            .map(|t| Task {
                done: if t.id == id { !t.done } else { t.done },
                ..t.clone()
            })
            .collect(),
    )
}

pub fn without(tasks: &[Task], id: TaskId) -> Option<Snapshot> {
    if !tasks.iter().any(|t| t.id == id) {
        return None;
    }
    Some(tasks.iter().filter(|t| t.id != id).cloned().collect())
}

pub fn retitled(tasks: &[Task], edit: &EditTask) -> Option<Snapshot> {
    if !tasks.iter().any(|t| t.id == edit.task_id) {
        return None;
    }
    Some(
        tasks
            .iter()
            .map(|t| {
                if t.id == edit.task_id {
                    Task {
                        title: edit.new_title.clone(),
                        ..t.clone()
                    }
                } else {
                    t.clone()
                }
            })
            .collect(),
    )
}
