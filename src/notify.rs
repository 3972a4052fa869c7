use std::thread;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::model::{NotificationContent, NotificationRequest};

pub type NotificationId = i64;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification permission denied")]
    PermissionDenied,
    #[error("invalid calendar trigger {hour:02}:{minute:02}")]
    InvalidTime { hour: u32, minute: u32 },
    #[error("trigger date {0} is not in the future")]
    TriggerInPast(NaiveDateTime),
    #[error("notification store: {0}")]
    Store(#[from] rusqlite::Error),
    #[error("notification io: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// How a notification is presented once it fires. Passed in at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationBehavior {
    pub show_alert: bool,
    pub play_sound: bool,
    pub set_badge: bool,
    pub show_banner: bool,
    pub show_list: bool,
}

impl Default for NotificationBehavior {
    fn default() -> Self {
        NotificationBehavior {
            show_alert: true,
            play_sound: false,
            set_badge: false,
            show_banner: true,
            show_list: true,
        }
    }
}

/// The notification subsystem reminders are handed to.
pub trait NotificationService {
    fn schedule(&mut self, request: NotificationRequest) -> Result<NotificationId, NotifyError>;

    /// Removes one-shot notifications that are due and advances repeating
    /// ones, returning what should be shown now.
    fn take_due(&mut self, now: NaiveDateTime) -> Result<Vec<NotificationContent>, NotifyError>;

    fn pending(&self) -> Result<usize, NotifyError>;
}

pub trait Presenter {
    fn present(
        &mut self,
        content: &NotificationContent,
        behavior: &NotificationBehavior,
    ) -> Result<(), NotifyError>;
}

pub struct DesktopPresenter {
    app_name: String,
}

impl DesktopPresenter {
    pub fn new(app_name: &str) -> Self {
        DesktopPresenter {
            app_name: app_name.to_string(),
        }
    }
}

impl Presenter for DesktopPresenter {
    fn present(
        &mut self,
        content: &NotificationContent,
        behavior: &NotificationBehavior,
    ) -> Result<(), NotifyError> {
        if !behavior.show_alert {
            return Ok(());
        }
        if behavior.set_badge {
            tracing::debug!("badges are not supported by desktop notifications");
        }

        let mut notification = notify_rust::Notification::new();
        notification
            .summary(&content.title)
            .body(&content.body)
            .appname(&self.app_name)
            .icon("alarm-clock");

        #[cfg(all(unix, not(target_os = "macos")))]
        {
            use notify_rust::Hint;
            if !behavior.play_sound {
                notification.hint(Hint::SuppressSound(true));
            }
            if !behavior.show_list {
                notification.hint(Hint::Transient(true));
            }
        }

        // `show` waits on the session bus; keep it off the UI loop.
        thread::Builder::new()
            .name("notification".to_string())
            .spawn(move || {
                if let Err(err) = notification.show() {
                    tracing::warn!(error = %err, "could not show notification");
                }
            })?;
        Ok(())
    }
}
