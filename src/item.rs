use tracing::debug;

use crate::domain::task::{EditTask, Task, TaskId};

/// Callbacks a row uses to reach the owner of the task collection.
pub trait TaskActions {
    fn toggle_task_done(&mut self, id: TaskId);
    fn remove_task(&mut self, id: TaskId);
    fn edit_task(&mut self, edit: EditTask);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Viewing,
    Editing,
}

/// Edit buffer and state machine for a single row.
///
/// While `Viewing`, `draft` always equals the committed title of the task.
#[derive(Debug, Clone)]
pub struct TaskItem {
    task_id: TaskId,
    state: ItemState,
    draft: String,
}

impl TaskItem {
    pub fn new(task: &Task) -> Self {
        Self {
            task_id: task.id,
            state: ItemState::Viewing,
            draft: task.title.clone(),
        }
    }

    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    pub fn state(&self) -> ItemState {
        self.state
    }

    pub fn is_editing(&self) -> bool {
        self.state == ItemState::Editing
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn start_edit(&mut self, task: &Task) {
        if self.is_editing() {
            return;
        }
        debug!(id = %task.id, "edit started");
        self.draft = task.title.clone();
        self.state = ItemState::Editing;
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        if self.is_editing() {
            self.draft = text.into();
        }
    }

    pub fn insert(&mut self, c: char) {
        if self.is_editing() {
            self.draft.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.is_editing() {
            self.draft.pop();
        }
    }

    pub fn cancel(&mut self, task: &Task) {
        if self.is_editing() {
            debug!(id = %task.id, "edit cancelled");
        }
        self.state = ItemState::Viewing;
        self.draft = task.title.clone();
    }

    /// Losing focus without submitting discards the draft.
    pub fn blur(&mut self, task: &Task) {
        self.cancel(task);
    }

    pub fn submit(&mut self, task: &Task, actions: &mut impl TaskActions) {
        if !self.is_editing() {
            return;
        }
        actions.edit_task(EditTask {
            task_id: task.id,
            new_title: self.draft.clone(),
        });
        self.state = ItemState::Viewing;
    }

    pub fn toggle(&self, task: &Task, actions: &mut impl TaskActions) {
        actions.toggle_task_done(task.id);
    }

    /// Returns `false` without calling back while the row is being edited.
    pub fn remove(&self, task: &Task, actions: &mut impl TaskActions) -> bool {
        if self.is_editing() {
            return false;
        }
        actions.remove_task(task.id);
        true
    }

    /// Realigns the draft with the latest committed title while viewing.
    pub fn sync(&mut self, task: &Task) {
        if !self.is_editing() && self.draft != task.title {
            self.draft = task.title.clone();
        }
    }
}
