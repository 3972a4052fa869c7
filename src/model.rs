use chrono::{DateTime, Local, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TodoId(u64);

impl TodoId {
    pub(crate) fn new(raw: u64) -> Self {
        TodoId(raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: TodoId,
    pub title: String,
    pub done: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderMode {
    Daily,
    Once,
}

/// A reminder the user asked for. Never stored; it only lives long enough to
/// be turned into a [`NotificationRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderRequest {
    pub time: DateTime<Local>,
    pub mode: ReminderMode,
}

impl ReminderRequest {
    pub fn daily(time: DateTime<Local>) -> Self {
        ReminderRequest {
            time,
            mode: ReminderMode::Daily,
        }
    }

    pub fn once(time: DateTime<Local>) -> Self {
        ReminderRequest {
            time,
            mode: ReminderMode::Once,
        }
    }

    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    pub fn minute(&self) -> u32 {
        self.time.minute()
    }

    pub fn trigger(&self) -> Trigger {
        match self.mode {
            ReminderMode::Daily => Trigger::Calendar {
                hour: self.hour(),
                minute: self.minute(),
                repeats: true,
            },
            ReminderMode::Once => Trigger::Date(self.time),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    Calendar { hour: u32, minute: u32, repeats: bool },
    Date(DateTime<Local>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub content: NotificationContent,
    pub trigger: Trigger,
}
