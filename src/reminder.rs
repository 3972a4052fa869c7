use chrono::{DateTime, Local, NaiveDateTime};

use crate::{
    model::{NotificationContent, NotificationRequest, ReminderMode, ReminderRequest},
    notify::{NotificationBehavior, NotificationId, NotificationService, Presenter},
};

pub const DAILY_TITLE: &str = "Atgādinājums";
pub const DAILY_BODY: &str = "Ir pienācis tavs ieplānotais laiks!";
pub const ONCE_TITLE: &str = "Atgādinājums (vienreiz)";

const ONCE_BODY_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleOutcome {
    Scheduled {
        mode: ReminderMode,
        id: NotificationId,
    },
    Failed {
        mode: ReminderMode,
        reason: String,
    },
}

impl ScheduleOutcome {
    pub fn is_scheduled(&self) -> bool {
        matches!(self, ScheduleOutcome::Scheduled { .. })
    }

    /// The message shown to the user.
    pub fn notice(&self) -> &'static str {
        match self {
            ScheduleOutcome::Scheduled {
                mode: ReminderMode::Daily,
                ..
            } => "Dienas paziņojums ieplānots.",
            ScheduleOutcome::Scheduled {
                mode: ReminderMode::Once,
                ..
            } => "Vienreizējs paziņojums ieplānots.",
            ScheduleOutcome::Failed {
                mode: ReminderMode::Daily,
                ..
            } => "Neizdevās ieplānot. Pārbaudi vides ierobežojumus un mēģini pilnu būvējumu.",
            ScheduleOutcome::Failed {
                mode: ReminderMode::Once,
                ..
            } => "Neizdevās ieplānot vienreizēju paziņojumu.",
        }
    }
}

/// Hands reminders to a [`NotificationService`]. Every call adds a new
/// notification; nothing is ever replaced or cancelled.
pub struct ReminderScheduler<N> {
    service: N,
    behavior: NotificationBehavior,
}

impl<N: NotificationService> ReminderScheduler<N> {
    pub fn new(service: N, behavior: NotificationBehavior) -> Self {
        ReminderScheduler { service, behavior }
    }

    pub fn behavior(&self) -> &NotificationBehavior {
        &self.behavior
    }

    pub fn service(&self) -> &N {
        &self.service
    }

    #[cfg(test)]
    pub(crate) fn service_mut(&mut self) -> &mut N {
        &mut self.service
    }

    pub fn schedule_daily(&mut self, time: DateTime<Local>) -> ScheduleOutcome {
        self.schedule(ReminderRequest::daily(time))
    }

    pub fn schedule_once(&mut self, time: DateTime<Local>) -> ScheduleOutcome {
        self.schedule(ReminderRequest::once(time))
    }

    pub fn schedule(&mut self, request: ReminderRequest) -> ScheduleOutcome {
        let content = match request.mode {
            ReminderMode::Daily => NotificationContent {
                title: DAILY_TITLE.to_string(),
                body: DAILY_BODY.to_string(),
            },
            ReminderMode::Once => NotificationContent {
                title: ONCE_TITLE.to_string(),
                body: request.time.format(ONCE_BODY_FORMAT).to_string(),
            },
        };
        let notification = NotificationRequest {
            content,
            trigger: request.trigger(),
        };

        match self.service.schedule(notification) {
            Ok(id) => {
                tracing::info!(
                    id,
                    mode = ?request.mode,
                    hour = request.hour(),
                    minute = request.minute(),
                    "reminder scheduled"
                );
                ScheduleOutcome::Scheduled {
                    mode: request.mode,
                    id,
                }
            }
            Err(err) => {
                tracing::warn!(mode = ?request.mode, error = %err, "failed to schedule reminder");
                ScheduleOutcome::Failed {
                    mode: request.mode,
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Presents every notification that is due at `now` and returns them.
    pub fn fire_due<P: Presenter>(
        &mut self,
        now: NaiveDateTime,
        presenter: &mut P,
    ) -> Vec<NotificationContent> {
        let due = match self.service.take_due(now) {
            Ok(due) => due,
            Err(err) => {
                tracing::error!(error = %err, "could not read due notifications");
                return vec![];
            }
        };
        for content in &due {
            tracing::info!(title = %content.title, "notification fired");
            if let Err(err) = presenter.present(content, &self.behavior) {
                tracing::warn!(error = %err, "could not show notification");
            }
        }
        due
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{model::Trigger, notify::NotifyError};
    use chrono::TimeZone;

    #[derive(Default)]
    pub(crate) struct RecordingService {
        pub requests: Vec<NotificationRequest>,
        pub due: Vec<NotificationContent>,
        pub fail: bool,
    }

    impl NotificationService for RecordingService {
        fn schedule(&mut self, request: NotificationRequest) -> Result<NotificationId, NotifyError> {
            if self.fail {
                return Err(NotifyError::PermissionDenied);
            }
            self.requests.push(request);
            Ok(self.requests.len() as NotificationId)
        }

        fn take_due(&mut self, _now: NaiveDateTime) -> Result<Vec<NotificationContent>, NotifyError> {
            Ok(std::mem::take(&mut self.due))
        }

        fn pending(&self) -> Result<usize, NotifyError> {
            Ok(self.requests.len())
        }
    }

    #[derive(Default)]
    pub(crate) struct RecordingPresenter {
        pub shown: Vec<NotificationContent>,
        pub fail: bool,
    }

    impl Presenter for RecordingPresenter {
        fn present(
            &mut self,
            content: &NotificationContent,
            _behavior: &NotificationBehavior,
        ) -> Result<(), NotifyError> {
            if self.fail {
                return Err(NotifyError::PermissionDenied);
            }
            self.shown.push(content.clone());
            Ok(())
        }
    }

    fn scheduler(fail: bool) -> ReminderScheduler<RecordingService> {
        ReminderScheduler::new(
            RecordingService {
                fail,
                ..Default::default()
            },
            NotificationBehavior::default(),
        )
    }

    fn half_past_two() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 20, 14, 30, 0).unwrap()
    }

    #[test]
    fn daily_issues_a_repeating_calendar_trigger() {
        let mut scheduler = scheduler(false);
        let outcome = scheduler.schedule_daily(half_past_two());

        assert!(outcome.is_scheduled());
        assert_eq!(outcome.notice(), "Dienas paziņojums ieplānots.");
        let request = &scheduler.service().requests[0];
        assert_eq!(request.content.title, DAILY_TITLE);
        assert_eq!(request.content.body, DAILY_BODY);
        assert_eq!(
            request.trigger,
            Trigger::Calendar {
                hour: 14,
                minute: 30,
                repeats: true
            }
        );
    }

    #[test]
    fn once_passes_the_full_date_through() {
        let mut scheduler = scheduler(false);
        let outcome = scheduler.schedule_once(half_past_two());

        assert!(outcome.is_scheduled());
        let request = &scheduler.service().requests[0];
        assert_eq!(request.trigger, Trigger::Date(half_past_two()));
        assert_eq!(request.content.title, ONCE_TITLE);
        assert_eq!(request.content.body, "20.10.2026 14:30:00");
    }

    #[test]
    fn failures_are_absorbed_with_distinct_notices() {
        let mut scheduler = scheduler(true);

        let daily = scheduler.schedule_daily(half_past_two());
        let once = scheduler.schedule_once(half_past_two());

        for outcome in [&daily, &once] {
            assert!(matches!(outcome, ScheduleOutcome::Failed { reason, .. } if reason.contains("permission")));
        }
        assert_ne!(daily.notice(), "Dienas paziņojums ieplānots.");
        assert_ne!(once.notice(), "Vienreizējs paziņojums ieplānots.");
        assert_ne!(daily.notice(), once.notice());
    }

    #[test]
    fn repeated_calls_accumulate() {
        let mut scheduler = scheduler(false);
        scheduler.schedule_daily(half_past_two());
        scheduler.schedule_daily(half_past_two());
        assert_eq!(scheduler.service().requests.len(), 2);
    }

    #[test]
    fn due_notifications_are_presented_even_if_one_fails() {
        let mut scheduler = scheduler(false);
        scheduler.service.due = vec![NotificationContent {
            title: DAILY_TITLE.to_string(),
            body: DAILY_BODY.to_string(),
        }];
        let mut presenter = RecordingPresenter {
            fail: true,
            ..Default::default()
        };

        let fired = scheduler.fire_due(half_past_two().naive_local(), &mut presenter);
        assert_eq!(fired.len(), 1);
        assert!(presenter.shown.is_empty());
    }
}
