use chrono::{DateTime, Local, Timelike};
use clap::ValueEnum;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::theme::Palette;

/// How the time picker is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PickerStyle {
    Clock,
    Spinner,
}

impl PickerStyle {
    pub fn for_platform(os: &str) -> Self {
        match os {
            "android" => PickerStyle::Clock,
            _ => PickerStyle::Spinner,
        }
    }

    pub fn lines(self, picker: &TimePicker, palette: &Palette) -> Vec<Line<'static>> {
        match self {
            PickerStyle::Clock => clock_lines(picker, palette),
            PickerStyle::Spinner => spinner_lines(picker, palette),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerField {
    Hour,
    Minute,
}

/// Editable copy of the selected time. Only hour and minute change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePicker {
    value: DateTime<Local>,
    field: PickerField,
}

impl TimePicker {
    pub fn new(value: DateTime<Local>) -> Self {
        TimePicker {
            value,
            field: PickerField::Hour,
        }
    }

    pub fn value(&self) -> DateTime<Local> {
        self.value
    }

    pub fn field(&self) -> PickerField {
        self.field
    }

    pub fn select(&mut self, field: PickerField) {
        self.field = field;
    }

    pub fn next_field(&mut self) {
        self.field = match self.field {
            PickerField::Hour => PickerField::Minute,
            PickerField::Minute => PickerField::Hour,
        };
    }

    pub fn step(&mut self, delta: i32) {
        let changed = match self.field {
            PickerField::Hour => self.value.with_hour(wrap(self.value.hour(), delta, 24)),
            PickerField::Minute => self.value.with_minute(wrap(self.value.minute(), delta, 60)),
        };
        // Times that fall into a DST gap do not exist; keep the old value.
        if let Some(value) = changed {
            self.value = value;
        }
    }
}

fn wrap(value: u32, delta: i32, modulus: u32) -> u32 {
    (value as i32 + delta).rem_euclid(modulus as i32) as u32
}

fn field_style(picker: &TimePicker, field: PickerField, palette: &Palette) -> Style {
    if picker.field() == field {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(palette.text)
    }
}

fn clock_lines(picker: &TimePicker, palette: &Palette) -> Vec<Line<'static>> {
    let hour = picker.value().hour();
    let minute = picker.value().minute();
    let dial = |range: std::ops::Range<u32>, step: u32, current: u32, field: PickerField| {
        let spans: Vec<Span<'static>> = range
            .step_by(step as usize)
            .map(|mark| {
                let style = if current / step == mark / step && picker.field() == field {
                    Style::default().fg(palette.bg).bg(palette.accent)
                } else if current / step == mark / step {
                    Style::default().fg(palette.accent)
                } else {
                    Style::default().fg(palette.sub)
                };
                Span::styled(format!(" {:02} ", mark), style)
            })
            .collect();
        Line::from(spans)
    };

    vec![
        Line::from(vec![
            Span::styled(format!("{:02}", hour), field_style(picker, PickerField::Hour, palette)),
            Span::styled(":", Style::default().fg(palette.text)),
            Span::styled(
                format!("{:02}", minute),
                field_style(picker, PickerField::Minute, palette),
            ),
        ]),
        Line::from(""),
        dial(0..12, 1, hour, PickerField::Hour),
        dial(12..24, 1, hour, PickerField::Hour),
        Line::from(""),
        dial(0..60, 5, minute, PickerField::Minute),
    ]
}

fn spinner_lines(picker: &TimePicker, palette: &Palette) -> Vec<Line<'static>> {
    let hour = picker.value().hour();
    let minute = picker.value().minute();
    let faded = Style::default().fg(palette.sub);

    (-1..=1)
        .map(|offset| {
            let (hour_style, minute_style) = if offset == 0 {
                (
                    field_style(picker, PickerField::Hour, palette),
                    field_style(picker, PickerField::Minute, palette),
                )
            } else {
                (faded, faded)
            };
            Line::from(vec![
                Span::styled(format!("{:02}", wrap(hour, offset, 24)), hour_style),
                Span::styled("   ", faded),
                Span::styled(format!("{:02}", wrap(minute, offset, 60)), minute_style),
            ])
        })
        .collect()
}
