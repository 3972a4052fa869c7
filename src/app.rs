use std::cmp::min;

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;

use crate::{
    notify::{NotificationService, Presenter},
    picker::{PickerField, PickerStyle, TimePicker},
    reminder::{ReminderScheduler, ScheduleOutcome},
    store::TodoStore,
    theme::{Appearance, Palette, ThemeOverride},
};

pub enum Mode {
    List,
    Input,
    Picker(TimePicker),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
    Reminder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

pub struct App<N> {
    pub store: TodoStore,
    pub scheduler: ReminderScheduler<N>,
    pub time: DateTime<Local>,
    pub mode: Mode,
    pub theme: ThemeOverride,
    pub host: Appearance,
    pub picker_style: PickerStyle,
    pub list_state: ListState,
    pub notice: Option<Notice>,
    pub should_quit: bool,
}

impl<N: NotificationService> App<N> {
    pub fn new(
        store: TodoStore,
        scheduler: ReminderScheduler<N>,
        time: DateTime<Local>,
        theme: ThemeOverride,
        host: Appearance,
        picker_style: PickerStyle,
    ) -> Self {
        let mut list_state = ListState::default();
        if !store.is_empty() {
            list_state.select(Some(0));
        }
        App {
            store,
            scheduler,
            time,
            mode: Mode::List,
            theme,
            host,
            picker_style,
            list_state,
            notice: None,
            should_quit: false,
        }
    }

    pub fn palette(&self) -> Palette {
        Palette::for_appearance(self.theme.resolve(self.host))
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::List => self.handle_list_key(key.code),
            Mode::Input => self.handle_input_key(key),
            Mode::Picker(picker) => self.handle_picker_key(picker, key.code),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return;
        }
        match key.code {
            KeyCode::Char(c) => self.store.push_draft(c),
            KeyCode::Backspace => self.store.pop_draft(),
            KeyCode::Enter => {
                if self.store.submit_draft().is_some() {
                    self.list_state.select(Some(0));
                    self.mode = Mode::List;
                }
            }
            KeyCode::Esc => self.mode = Mode::List,
            _ => {}
        }
    }

    /// Edits a copy of the selected time; only Enter writes it back.
    fn handle_picker_key(&mut self, mut picker: TimePicker, code: KeyCode) {
        self.mode = match code {
            KeyCode::Enter => {
                self.time = picker.value();
                Mode::List
            }
            KeyCode::Esc | KeyCode::Char('q') => Mode::List,
            code => {
                match code {
                    KeyCode::Char('k') | KeyCode::Up => picker.step(1),
                    KeyCode::Char('j') | KeyCode::Down => picker.step(-1),
                    KeyCode::Char('h') | KeyCode::Left => picker.select(PickerField::Hour),
                    KeyCode::Char('l') | KeyCode::Right => picker.select(PickerField::Minute),
                    KeyCode::Tab => picker.next_field(),
                    _ => {}
                }
                Mode::Picker(picker)
            }
        };
    }

    fn handle_list_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),
            KeyCode::Char(' ') | KeyCode::Char('x') => self.toggle_selected(),
            KeyCode::Char('D') => self.remove_selected(),
            KeyCode::Char('i') | KeyCode::Char('a') => self.mode = Mode::Input,
            KeyCode::Char('p') => self.mode = Mode::Picker(TimePicker::new(self.time)),
            KeyCode::Char('d') => {
                let outcome = self.scheduler.schedule_daily(self.time);
                self.report(outcome);
            }
            KeyCode::Char('o') => {
                let outcome = self.scheduler.schedule_once(self.time);
                self.report(outcome);
            }
            KeyCode::Char('T') => self.theme = self.theme.flip_switch(self.host),
            KeyCode::Char('S') => self.theme = self.theme.toggle_follow(),
            _ => {}
        }
    }

    fn report(&mut self, outcome: ScheduleOutcome) {
        let kind = if outcome.is_scheduled() {
            NoticeKind::Success
        } else {
            NoticeKind::Failure
        };
        let text = match &outcome {
            ScheduleOutcome::Scheduled { id, .. } => format!("{} #{}", outcome.notice(), id),
            ScheduleOutcome::Failed { reason, .. } => format!("{} ({})", outcome.notice(), reason),
        };
        self.notice = Some(Notice { kind, text });
    }

    fn toggle_selected(&mut self) {
        if let Some(item) = self
            .list_state
            .selected()
            .and_then(|index| self.store.list().get(index))
        {
            let id = item.id;
            self.store.toggle(id);
        }
    }

    fn remove_selected(&mut self) {
        if let Some(item) = self
            .list_state
            .selected()
            .and_then(|index| self.store.list().get(index))
        {
            let id = item.id;
            self.store.remove(id);
        }
        let selected = match (self.list_state.selected(), self.store.len()) {
            (_, 0) => None,
            (Some(index), len) => Some(min(index, len - 1)),
            (None, _) => None,
        };
        self.list_state.select(selected);
    }

    fn move_up(&mut self) {
        match self.list_state.selected() {
            Some(0) | None => self.list_state.select(if self.store.is_empty() {
                None
            } else {
                Some(0)
            }),
            Some(index) => self.list_state.select(Some(index - 1)),
        }
    }

    fn move_down(&mut self) {
        if self.store.is_empty() {
            return;
        }
        match self.list_state.selected() {
            Some(index) => self
                .list_state
                .select(Some(min(index + 1, self.store.len() - 1))),
            None => self.list_state.select(Some(0)),
        }
    }

    /// Shows reminders that came due since the last tick.
    pub fn tick<P: Presenter>(&mut self, now: DateTime<Local>, presenter: &mut P) {
        let fired = self.scheduler.fire_due(now.naive_local(), presenter);
        if !self.scheduler.behavior().show_banner {
            return;
        }
        if let Some(content) = fired.last() {
            self.notice = Some(Notice {
                kind: NoticeKind::Reminder,
                text: format!("{}: {}", content.title, content.body),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{NotificationContent, Trigger},
        notify::NotificationBehavior,
        reminder::tests::{RecordingPresenter, RecordingService},
    };
    use chrono::{TimeZone, Timelike};

    fn app(fail: bool) -> App<RecordingService> {
        App::new(
            TodoStore::with_sample_items(),
            ReminderScheduler::new(
                RecordingService {
                    fail,
                    ..Default::default()
                },
                NotificationBehavior::default(),
            ),
            Local.with_ymd_and_hms(2026, 10, 16, 14, 30, 0).unwrap(),
            ThemeOverride::FollowSystem,
            Appearance::Light,
            PickerStyle::Spinner,
        )
    }

    fn press(app: &mut App<RecordingService>, keys: &str) {
        for c in keys.chars() {
            app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    fn press_code(app: &mut App<RecordingService>, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn typing_and_enter_adds_to_the_top() {
        let mut app = app(false);
        press(&mut app, "i");
        press(&mut app, "Test");
        press_code(&mut app, KeyCode::Enter);

        assert!(matches!(app.mode, Mode::List));
        assert_eq!(app.store.list()[0].title, "Test");
        assert_eq!(app.store.draft(), "");
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn blank_draft_stays_in_input_mode() {
        let mut app = app(false);
        press(&mut app, "i  ");
        press_code(&mut app, KeyCode::Enter);
        assert!(matches!(app.mode, Mode::Input));
        assert_eq!(app.store.len(), 2);
    }

    #[test]
    fn toggle_and_delete_act_on_the_selection() {
        let mut app = app(false);
        press(&mut app, " ");
        assert!(app.store.list()[0].done);

        press(&mut app, "jD");
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.list_state.selected(), Some(0));

        press(&mut app, "D");
        assert!(app.store.is_empty());
        assert_eq!(app.list_state.selected(), None);
        press(&mut app, "jk D");
    }

    #[test]
    fn picker_commits_on_enter_only() {
        let mut app = app(false);
        press(&mut app, "pkk");
        press_code(&mut app, KeyCode::Esc);
        assert_eq!(app.time.hour(), 14);

        press(&mut app, "pklj");
        press_code(&mut app, KeyCode::Enter);
        assert_eq!((app.time.hour(), app.time.minute()), (15, 29));
    }

    #[test]
    fn scheduling_reports_a_notice() {
        let mut app = app(false);
        press(&mut app, "d");
        assert_eq!(app.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Success));
        press(&mut app, "o");
        assert_eq!(
            app.scheduler.service().requests[1].trigger,
            Trigger::Date(app.time)
        );
    }

    #[test]
    fn scheduling_failure_is_shown_not_raised() {
        let mut app = app(true);
        press(&mut app, "o");
        let notice = app.notice.clone().unwrap();
        assert_eq!(notice.kind, NoticeKind::Failure);
        assert!(notice
            .text
            .starts_with("Neizdevās ieplānot vienreizēju paziņojumu."));
        assert!(!app.should_quit);
    }

    #[test]
    fn theme_keys() {
        let mut app = app(false);
        press(&mut app, "S");
        assert_eq!(app.theme, ThemeOverride::ForceDark);
        press(&mut app, "T");
        assert_eq!(app.theme, ThemeOverride::ForceLight);
        press(&mut app, "S");
        assert_eq!(app.theme, ThemeOverride::FollowSystem);
    }

    #[test]
    fn fired_reminders_become_a_banner() {
        let mut app = app(false);
        let content = NotificationContent {
            title: "Atgādinājums".to_string(),
            body: "Ir pienācis tavs ieplānotais laiks!".to_string(),
        };
        let mut presenter = RecordingPresenter::default();
        app.tick(app.time, &mut presenter);
        assert!(app.notice.is_none());

        press(&mut app, "d");
        app.scheduler.service_mut().due = vec![content.clone()];
        app.tick(app.time, &mut presenter);
        assert_eq!(presenter.shown, vec![content]);
        assert_eq!(app.notice.map(|n| n.kind), Some(NoticeKind::Reminder));
    }

    #[test]
    fn control_chords_do_not_type() {
        let mut app = app(false);
        press(&mut app, "i");
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        app.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT));
        press(&mut app, "A");
        assert_eq!(app.store.draft(), "A");
    }

    #[test]
    fn hidden_banner_still_presents() {
        let mut app = App::new(
            TodoStore::new(),
            ReminderScheduler::new(
                RecordingService::default(),
                NotificationBehavior {
                    show_banner: false,
                    ..Default::default()
                },
            ),
            Local.with_ymd_and_hms(2026, 10, 16, 14, 30, 0).unwrap(),
            ThemeOverride::FollowSystem,
            Appearance::Light,
            PickerStyle::Spinner,
        );
        let content = NotificationContent {
            title: "Atgādinājums".to_string(),
            body: "Ir pienācis tavs ieplānotais laiks!".to_string(),
        };
        app.scheduler.service_mut().due = vec![content.clone()];
        let mut presenter = RecordingPresenter::default();

        app.tick(app.time, &mut presenter);
        assert_eq!(presenter.shown, vec![content]);
        assert!(app.notice.is_none());
    }

    #[test]
    fn quit() {
        let mut app = app(false);
        press(&mut app, "q");
        assert!(app.should_quit);
    }
}
