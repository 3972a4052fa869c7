use std::{io, path::PathBuf};

use clap::Parser;

use crate::{
    database::default_data_dir,
    notify::{NotificationBehavior, Permission},
    picker::PickerStyle,
    theme::ThemeOverride,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Project Todo - a to-do list with local reminders")]
pub struct Args {
    /// Colour theme; "system" follows the terminal background
    #[arg(short, long, value_enum, default_value_t = ThemeOverride::FollowSystem)]
    pub theme: ThemeOverride,

    /// Time picker style. Defaults to the platform's native look
    #[arg(long, value_enum)]
    pub picker: Option<PickerStyle>,

    /// Where scheduled notifications and the log are kept (default ~/.todo)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Behave as if notification permission was not granted
    #[arg(long)]
    pub deny_notifications: bool,

    /// Play a sound when a reminder fires
    #[arg(long)]
    pub sound: bool,

    /// Start with an empty list instead of the sample items
    #[arg(long)]
    pub empty: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: ThemeOverride,
    pub picker: PickerStyle,
    pub data_dir: PathBuf,
    pub permission: Permission,
    pub behavior: NotificationBehavior,
    pub sample_items: bool,
}

impl Config {
    pub fn from_args(args: Args) -> io::Result<Self> {
        let data_dir = match args.data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        Ok(Config {
            theme: args.theme,
            picker: args
                .picker
                .unwrap_or_else(|| PickerStyle::for_platform(std::env::consts::OS)),
            data_dir,
            permission: if args.deny_notifications {
                Permission::Denied
            } else {
                Permission::Granted
            },
            behavior: NotificationBehavior {
                play_sound: args.sound,
                ..NotificationBehavior::default()
            },
            sample_items: !args.empty,
        })
    }

    pub fn notification_db(&self) -> PathBuf {
        self.data_dir.join("notifications.sqlite")
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("project-todo.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let args = Args::try_parse_from(std::iter::once("project-todo").chain(args.iter().copied()))
            .unwrap();
        Config::from_args(args).unwrap()
    }

    #[test]
    fn defaults() {
        let config = parse(&["--data-dir", "/tmp/todo"]);
        assert_eq!(config.theme, ThemeOverride::FollowSystem);
        assert_eq!(config.permission, Permission::Granted);
        assert_eq!(config.behavior, NotificationBehavior::default());
        assert!(config.sample_items);
        assert_eq!(
            config.notification_db(),
            PathBuf::from("/tmp/todo/notifications.sqlite")
        );
    }

    #[test]
    fn flags_override_defaults() {
        let config = parse(&[
            "--data-dir",
            "/tmp/todo",
            "--theme",
            "dark",
            "--picker",
            "clock",
            "--deny-notifications",
            "--sound",
            "--empty",
        ]);
        assert_eq!(config.theme, ThemeOverride::ForceDark);
        assert_eq!(config.picker, PickerStyle::Clock);
        assert_eq!(config.permission, Permission::Denied);
        assert!(config.behavior.play_sound);
        assert!(!config.sample_items);
    }

    #[test]
    fn unknown_theme_is_rejected() {
        assert!(Args::try_parse_from(["project-todo", "--theme", "sepia"]).is_err());
    }
}
