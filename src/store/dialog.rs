use crate::domain::task::TaskId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Decline,
    Confirm,
}

/// Modal surface owned by the store: a notice with a single acknowledgement,
/// or a yes/no confirmation gating a removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    DuplicateTitle { title: String },
    ConfirmRemove { id: TaskId, highlighted: Choice },
}

const ACK: &[(&str, Choice)] = &[("OK", Choice::Confirm)];
const YES_NO: &[(&str, Choice)] = &[("No", Choice::Decline), ("Yes", Choice::Confirm)];

impl Dialog {
    pub fn confirm_remove(id: TaskId) -> Self {
        Self::ConfirmRemove {
            id,
            highlighted: Choice::Decline,
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Self::DuplicateTitle { .. } => "Task already registered",
            Self::ConfirmRemove { .. } => "Remove item",
        }
    }

    pub fn body(&self) -> &'static str {
        match self {
            Self::DuplicateTitle { .. } => "You cannot register a task with the same name",
            Self::ConfirmRemove { .. } => "Are you sure you want to remove this item?",
        }
    }

    pub fn actions(&self) -> &'static [(&'static str, Choice)] {
        match self {
            Self::DuplicateTitle { .. } => ACK,
            Self::ConfirmRemove { .. } => YES_NO,
        }
    }

    pub fn highlighted(&self) -> Choice {
        match self {
            Self::DuplicateTitle { .. } => Choice::Confirm,
            Self::ConfirmRemove { highlighted, .. } => *highlighted,
        }
    }

    /// Moves the highlight to the other action. Notices have only one.
    pub fn cycle(&mut self) {
        if let Self::ConfirmRemove { highlighted, .. } = self {
            *highlighted = match highlighted {
                Choice::Decline => Choice::Confirm,
                Choice::Confirm => Choice::Decline,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn confirm_starts_on_decline_and_cycles() {
        let mut dialog = Dialog::confirm_remove(Uuid::new_v4());
        assert_eq!(dialog.highlighted(), Choice::Decline);
        dialog.cycle();
        assert_eq!(dialog.highlighted(), Choice::Confirm);
        dialog.cycle();
        assert_eq!(dialog.highlighted(), Choice::Decline);
        assert_eq!(dialog.actions().len(), 2);
    }

    #[test]
    fn notice_has_single_action() {
        let mut dialog = Dialog::DuplicateTitle {
            title: "x".into(),
        };
        dialog.cycle();
        assert_eq!(dialog.highlighted(), Choice::Confirm);
        assert_eq!(dialog.actions(), &[("OK", Choice::Confirm)]);
    }
}
