//! The one way the dashboard talks back to the user: a dismissible banner,
//! plus a confirmation step in front of every delete.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

impl NoticeLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "notice success",
            NoticeLevel::Error => "notice error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    /// Distinguishes two notices with the same text so each gets its own timer.
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

/// A delete the user asked for but has not confirmed yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingDelete {
    Transaction(i64),
    Budget(i64),
    Goal(i64),
}

impl PendingDelete {
    pub fn prompt(&self) -> &'static str {
        match self {
            PendingDelete::Transaction(_) => "Delete this transaction?",
            PendingDelete::Budget(_) => "Delete this budget?",
            PendingDelete::Goal(_) => "Delete this goal?",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            PendingDelete::Transaction(_) => "Error deleting transaction",
            PendingDelete::Budget(_) => "Error deleting budget",
            PendingDelete::Goal(_) => "Error deleting goal",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            PendingDelete::Transaction(_) => "Transaction deleted.",
            PendingDelete::Budget(_) => "Budget deleted.",
            PendingDelete::Goal(_) => "Goal deleted.",
        }
    }
}
