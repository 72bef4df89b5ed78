pub mod dialog;
pub mod list;

use tracing::{debug, info, warn};

use crate::domain::error::TaskError;
use crate::domain::task::{EditTask, Task, TaskId};
use crate::item::TaskActions;
use dialog::{Choice, Dialog};
use list::Snapshot;

/// Screen-level owner of the task collection.
///
/// Every successful operation publishes a new snapshot and bumps `revision`;
/// rejected or unmatched operations leave both untouched.
pub struct TaskStore {
    tasks: Snapshot,
    revision: u64,
    dialog: Option<Dialog>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self {
            tasks: list::empty(),
            revision: 0,
            dialog: None,
        }
    }
}

impl TaskStore {
    pub fn tasks(&self) -> &Snapshot {
        &self.tasks
    }

    pub fn snapshot(&self) -> Snapshot {
        self.tasks.clone()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn done_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.done).count()
    }

    pub fn open_count(&self) -> usize {
        self.len() - self.done_count()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn dialog_mut(&mut self) -> Option<&mut Dialog> {
        self.dialog.as_mut()
    }

    fn publish(&mut self, next: Snapshot) {
        self.tasks = next;
        self.revision += 1;
    }

    pub fn add_task(&mut self, title: impl Into<String>) -> Result<TaskId, TaskError> {
        let title = title.into();
        if list::find_by_title(&self.tasks, &title).is_some() {
            warn!(%title, "duplicate task title rejected");
            self.dialog = Some(Dialog::DuplicateTitle {
                title: title.clone(),
            });
            return Err(TaskError::DuplicateTitle(title));
        }
        let task = Task::new(title);
        let id = task.id;
        info!(%id, title = %task.title, "task added");
        self.publish(list::appended(&self.tasks, task));
        Ok(id)
    }

    pub fn toggle_task_done(&mut self, id: TaskId) -> Result<(), TaskError> {
        let next = list::toggled(&self.tasks, id).ok_or(TaskError::NotFound(id))?;
        debug!(%id, "task toggled");
        self.publish(next);
        Ok(())
    }

    /// Asks for confirmation; the removal itself happens in [`TaskStore::answer`].
    pub fn remove_task(&mut self, id: TaskId) {
        debug!(%id, "removal requested");
        self.dialog = Some(Dialog::confirm_remove(id));
    }

    pub fn edit_task(&mut self, edit: EditTask) -> Result<(), TaskError> {
        let next = list::retitled(&self.tasks, &edit).ok_or(TaskError::NotFound(edit.task_id))?;
        info!(id = %edit.task_id, title = %edit.new_title, "task edited");
        self.publish(next);
        Ok(())
    }

    /// Resolves the open dialog. Returns the removed task when a removal was
    /// confirmed, `None` when a notice was acknowledged or nothing was open.
    pub fn answer(&mut self, choice: Choice) -> Result<Option<Task>, TaskError> {
        match self.dialog.take() {
            None | Some(Dialog::DuplicateTitle { .. }) => Ok(None),
            Some(Dialog::ConfirmRemove { id, .. }) => match choice {
                Choice::Decline => {
                    debug!(%id, "removal declined");
                    Err(TaskError::RemovalDeclined(id))
                }
                Choice::Confirm => {
                    let removed = self.get(id).cloned().ok_or(TaskError::NotFound(id))?;
                    let next = list::without(&self.tasks, id).ok_or(TaskError::NotFound(id))?;
                    info!(%id, title = %removed.title, "task removed");
                    self.publish(next);
                    Ok(Some(removed))
                }
            },
        }
    }

    /// Closes the dialog as if its decline action was chosen.
    pub fn dismiss(&mut self) {
        let _ = self.answer(Choice::Decline);
    }
}

impl TaskActions for TaskStore {
    fn toggle_task_done(&mut self, id: TaskId) {
        if let Err(err) = TaskStore::toggle_task_done(self, id) {
            debug!(%err, "toggle ignored");
        }
    }

    fn remove_task(&mut self, id: TaskId) {
        TaskStore::remove_task(self, id);
    }

    fn edit_task(&mut self, edit: EditTask) {
        if let Err(err) = TaskStore::edit_task(self, edit) {
            debug!(%err, "edit ignored");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::rc::Rc;

    use super::*;
    use uuid::Uuid;

    fn titles(store: &TaskStore) -> Vec<String> {
        store.tasks().iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn distinct_adds_grow_with_unique_ids() {
        let mut store = TaskStore::default();
        for title in ["one", "two", "three", "four"] {
            store.add_task(title).unwrap();
        }
        assert_eq!(store.len(), 4);
        let ids: HashSet<_> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), 4);
        assert!(store.tasks().iter().all(|t| !t.done));
        assert_eq!(titles(&store), ["one", "two", "three", "four"]);
    }

    #[test]
    fn duplicate_add_is_rejected_with_notice() {
        let mut store = TaskStore::default();
        store.add_task("Wash car").unwrap();
        let before = store.snapshot();
        let rev = store.revision();

        let err = store.add_task("Wash car").unwrap_err();
        assert_eq!(err, TaskError::DuplicateTitle("Wash car".into()));
        assert!(Rc::ptr_eq(&before, store.tasks()));
        assert_eq!(store.revision(), rev);
        assert!(matches!(
            store.dialog(),
            Some(Dialog::DuplicateTitle { title }) if title == "Wash car"
        ));

        assert_eq!(store.answer(Choice::Confirm), Ok(None));
        assert!(store.dialog().is_none());
    }

    #[test]
    fn empty_title_is_accepted() {
        let mut store = TaskStore::default();
        store.add_task("").unwrap();
        store.add_task("   ").unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn toggle_twice_restores() {
        let mut store = TaskStore::default();
        let a = store.add_task("a").unwrap();
        store.add_task("b").unwrap();
        let original = store.snapshot();

        store.toggle_task_done(a).unwrap();
        assert!(store.get(a).unwrap().done);
        assert_eq!(store.tasks()[1], original[1]);
        assert_eq!(store.done_count(), 1);
        assert_eq!(store.open_count(), 1);

        store.toggle_task_done(a).unwrap();
        assert_eq!(&store.tasks()[..], &original[..]);
        assert!(!Rc::ptr_eq(&original, store.tasks()));
    }

    #[test]
    fn unknown_id_is_a_silent_noop() {
        let mut store = TaskStore::default();
        store.add_task("a").unwrap();
        let before = store.snapshot();
        let ghost = Uuid::new_v4();

        assert_eq!(store.toggle_task_done(ghost), Err(TaskError::NotFound(ghost)));
        let edit = EditTask {
            task_id: ghost,
            new_title: "b".into(),
        };
        assert_eq!(store.edit_task(edit), Err(TaskError::NotFound(ghost)));
        store.remove_task(ghost);
        assert_eq!(store.answer(Choice::Confirm), Err(TaskError::NotFound(ghost)));

        assert!(Rc::ptr_eq(&before, store.tasks()));
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn declined_removal_keeps_collection() {
        let mut store = TaskStore::default();
        let id = store.add_task("a").unwrap();
        let before = store.snapshot();

        store.remove_task(id);
        assert_eq!(store.dialog(), Some(&Dialog::confirm_remove(id)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.answer(Choice::Decline), Err(TaskError::RemovalDeclined(id)));
        assert!(store.dialog().is_none());
        assert!(Rc::ptr_eq(&before, store.tasks()));

        store.remove_task(id);
        store.dismiss();
        assert!(store.dialog().is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn confirmed_removal_drops_only_that_task() {
        let mut store = TaskStore::default();
        let a = store.add_task("a").unwrap();
        let b = store.add_task("b").unwrap();
        let c = store.add_task("c").unwrap();

        store.remove_task(b);
        let removed = store.answer(Choice::Confirm).unwrap().unwrap();
        assert_eq!(removed.id, b);
        let ids: Vec<_> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, [a, c]);
    }

    #[test]
    fn edit_changes_title_only_and_allows_duplicates() {
        let mut store = TaskStore::default();
        let a = store.add_task("a").unwrap();
        store.add_task("b").unwrap();
        store.toggle_task_done(a).unwrap();

        store
            .edit_task(EditTask {
                task_id: a,
                new_title: "b".into(),
            })
            .unwrap();
        let task = store.get(a).unwrap();
        assert_eq!(task.title, "b");
        assert!(task.done);
        assert_eq!(titles(&store), ["b", "b"]);
    }

    #[test]
    fn end_to_end_scenario() {
        let mut store = TaskStore::default();
        let id = store.add_task("Wash car").unwrap();
        assert_eq!(
            &store.tasks()[..],
            &[Task {
                id,
                title: "Wash car".into(),
                done: false
            }]
        );

        assert!(store.add_task("Wash car").is_err());
        store.dismiss();
        assert_eq!(store.len(), 1);

        store.toggle_task_done(id).unwrap();
        assert!(store.tasks()[0].done);

        store.remove_task(id);
        store.answer(Choice::Confirm).unwrap();
        assert!(store.is_empty());
    }
}
