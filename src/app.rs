use std::collections::HashMap;

use crate::domain::error::TaskError;
use crate::domain::task::{Task, TaskId};
use crate::item::TaskItem;
use crate::store::TaskStore;
use crate::store::dialog::{Choice, Dialog};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    NewTask,
}

pub struct App {
    pub store: TaskStore,
    rows: HashMap<TaskId, TaskItem>,
    seen_revision: Option<u64>,
    pub selected: usize,
    pub focus: Focus,
    pub input: String,
    pub status: Option<String>,
}

impl App {
    pub fn new(store: TaskStore) -> Self {
        let mut app = Self {
            store,
            rows: HashMap::new(),
            seen_revision: None,
            selected: 0,
            focus: Focus::List,
            input: String::new(),
            status: None,
        };
        app.reconcile();
        app
    }

    /// Brings the row controllers in line with the latest published snapshot.
    pub fn reconcile(&mut self) {
        if self.seen_revision == Some(self.store.revision()) {
            return;
        }
        let tasks = self.store.snapshot();
        for task in tasks.iter() {
            self.rows
                .entry(task.id)
                .or_insert_with(|| TaskItem::new(task))
                .sync(task);
        }
        self.rows.retain(|id, _| tasks.iter().any(|t| t.id == *id));
        if self.selected >= tasks.len() {
            self.selected = tasks.len().saturating_sub(1);
        }
        self.seen_revision = Some(self.store.revision());
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn row(&self, id: TaskId) -> Option<&TaskItem> {
        self.rows.get(&id)
    }

    pub fn editing_id(&self) -> Option<TaskId> {
        self.rows.values().find(|r| r.is_editing()).map(|r| r.task_id())
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.store.dialog()
    }

    fn selected_task(&self) -> Option<Task> {
        self.store.tasks().get(self.selected).cloned()
    }

    fn blur_editing(&mut self) {
        if let Some(id) = self.editing_id()
            && let Some(task) = self.store.get(id).cloned()
            && let Some(row) = self.rows.get_mut(&id)
        {
            row.blur(&task);
        }
    }

    pub fn select_next(&mut self) {
        if !self.store.is_empty() {
            self.blur_editing();
            self.selected = (self.selected + 1).min(self.store.len() - 1);
        }
    }

    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.blur_editing();
            self.selected -= 1;
        }
    }

    pub fn focus_new_task(&mut self) {
        self.blur_editing();
        self.focus = Focus::NewTask;
        self.set_status("Type a new task and press Enter");
    }

    pub fn leave_new_task(&mut self) {
        self.focus = Focus::List;
        self.input.clear();
        self.set_status("Canceled");
    }

    pub fn submit_new_task(&mut self) {
        let title = self.input.clone();
        match self.store.add_task(title) {
            Ok(_) => {
                self.input.clear();
                self.focus = Focus::List;
                self.reconcile();
                self.selected = self.store.len().saturating_sub(1);
                self.set_status("Added");
            }
            Err(TaskError::DuplicateTitle(_)) => {
                self.set_status("Duplicate title, task not added");
            }
            Err(err) => self.set_status(&err.to_string()),
        }
    }

    pub fn toggle_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        if let Some(row) = self.rows.get(&task.id) {
            row.toggle(&task, &mut self.store);
            self.reconcile();
            self.set_status("Toggled completion");
        }
    }

    pub fn start_edit_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        if let Some(row) = self.rows.get_mut(&task.id) {
            row.start_edit(&task);
            self.set_status("Editing: Enter to save, Esc to cancel");
        }
    }

    fn editing_row(&mut self) -> Option<(Task, &mut TaskItem)> {
        let id = self.editing_id()?;
        let task = self.store.get(id)?.clone();
        let row = self.rows.get_mut(&id)?;
        Some((task, row))
    }

    pub fn edit_insert(&mut self, c: char) {
        if let Some((_, row)) = self.editing_row() {
            row.insert(c);
        }
    }

    pub fn edit_backspace(&mut self) {
        if let Some((_, row)) = self.editing_row() {
            row.backspace();
        }
    }

    pub fn submit_edit(&mut self) {
        let Some(id) = self.editing_id() else {
            return;
        };
        let Some(task) = self.store.get(id).cloned() else {
            return;
        };
        if let Some(row) = self.rows.get_mut(&id) {
            row.submit(&task, &mut self.store);
            self.reconcile();
            self.set_status("Saved");
        }
    }

    pub fn cancel_edit(&mut self) {
        if let Some((task, row)) = self.editing_row() {
            row.cancel(&task);
            self.set_status("Canceled");
        }
    }

    /// Toggles the row being edited, keeping the edit open.
    pub fn toggle_editing(&mut self) {
        let Some(id) = self.editing_id() else {
            return;
        };
        let Some(task) = self.store.get(id).cloned() else {
            return;
        };
        if let Some(row) = self.rows.get(&id) {
            row.toggle(&task, &mut self.store);
            self.reconcile();
        }
    }

    pub fn remove_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        if let Some(row) = self.rows.get(&task.id)
            && !row.remove(&task, &mut self.store)
        {
            self.set_status("Finish editing before removing");
        }
    }

    pub fn cycle_dialog(&mut self) {
        if let Some(dialog) = self.store.dialog_mut() {
            dialog.cycle();
        }
    }

    pub fn answer_dialog(&mut self, choice: Choice) {
        match self.store.answer(choice) {
            Ok(Some(removed)) => {
                self.reconcile();
                self.set_status(&format!("Removed {:?}", removed.title));
            }
            Ok(None) => {}
            Err(TaskError::RemovalDeclined(_)) => self.set_status("Kept"),
            Err(_) => self.reconcile(),
        }
    }

    pub fn activate_dialog(&mut self) {
        if let Some(choice) = self.store.dialog().map(Dialog::highlighted) {
            self.answer_dialog(choice);
        }
    }

    pub fn set_status(&mut self, msg: &str) {
        self.status = Some(msg.to_string());
    }
}
