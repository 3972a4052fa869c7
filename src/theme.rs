use clap::ValueEnum;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Light,
    Dark,
}

impl Appearance {
    /// Reads the `COLORFGBG` convention (`"fg;bg"`). Background indices 0-6
    /// and 8 are dark colours.
    pub fn from_colorfgbg(value: Option<&str>) -> Self {
        let background = value
            .and_then(|value| value.rsplit(';').next())
            .and_then(|bg| bg.trim().parse::<u8>().ok());
        match background {
            Some(0..=6) | Some(8) => Appearance::Dark,
            _ => Appearance::Light,
        }
    }

    pub fn detect() -> Self {
        let value = std::env::var("COLORFGBG").ok();
        Appearance::from_colorfgbg(value.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeOverride {
    #[value(name = "system")]
    FollowSystem,
    #[value(name = "dark")]
    ForceDark,
    #[value(name = "light")]
    ForceLight,
}

impl ThemeOverride {
    pub fn resolve(self, host: Appearance) -> Appearance {
        match self {
            ThemeOverride::FollowSystem => host,
            ThemeOverride::ForceDark => Appearance::Dark,
            ThemeOverride::ForceLight => Appearance::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeOverride::FollowSystem => "Sistēma",
            ThemeOverride::ForceDark => "Tumša",
            ThemeOverride::ForceLight => "Gaiša",
        }
    }

    /// Position of the dark-mode switch.
    pub fn switch_on(self, host: Appearance) -> bool {
        self.resolve(host) == Appearance::Dark
    }

    /// Flipping the switch always pins the theme.
    pub fn flip_switch(self, host: Appearance) -> Self {
        if self.switch_on(host) {
            ThemeOverride::ForceLight
        } else {
            ThemeOverride::ForceDark
        }
    }

    pub fn toggle_follow(self) -> Self {
        match self {
            ThemeOverride::FollowSystem => ThemeOverride::ForceDark,
            ThemeOverride::ForceDark | ThemeOverride::ForceLight => ThemeOverride::FollowSystem,
        }
    }

    pub fn follow_action_label(self) -> &'static str {
        match self {
            ThemeOverride::FollowSystem => "Atvienot no sistēmas",
            ThemeOverride::ForceDark | ThemeOverride::ForceLight => "Saskaņot ar sistēmu",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub card: Color,
    pub text: Color,
    pub sub: Color,
    pub accent: Color,
    pub input_bg: Color,
    pub border: Color,
}

impl Palette {
    pub fn for_appearance(appearance: Appearance) -> Self {
        match appearance {
            Appearance::Dark => Palette {
                bg: Color::Rgb(0x0f, 0x11, 0x15),
                card: Color::Rgb(0x17, 0x1a, 0x21),
                text: Color::Rgb(0xe8, 0xec, 0xf1),
                sub: Color::Rgb(0x9a, 0xa4, 0xb2),
                accent: Color::Rgb(0x4e, 0xa1, 0xff),
                input_bg: Color::Rgb(0x1e, 0x23, 0x2d),
                border: Color::Rgb(0x2a, 0x2f, 0x3a),
            },
            Appearance::Light => Palette {
                bg: Color::Rgb(0xf5, 0xf7, 0xfb),
                card: Color::Rgb(0xff, 0xff, 0xff),
                text: Color::Rgb(0x0f, 0x11, 0x15),
                sub: Color::Rgb(0x4b, 0x55, 0x63),
                accent: Color::Rgb(0x0b, 0x74, 0xff),
                input_bg: Color::Rgb(0xf0, 0xf3, 0xf9),
                border: Color::Rgb(0xe5, 0xe7, 0xeb),
            },
        }
    }
}
