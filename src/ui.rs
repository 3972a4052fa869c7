use ratatui::{
    backend::Backend,
    layout::Rect,
    prelude::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::{
    app::{App, Mode, NoticeKind},
    notify::NotificationService,
    theme::Palette,
};

pub fn draw<B: Backend, N: NotificationService>(frame: &mut Frame<B>, app: &mut App<N>) {
    let palette = app.palette();
    let size = frame.size();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.bg).fg(palette.text)),
        size,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(6),
                Constraint::Length(4),
                Constraint::Min(3),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(size);

    draw_header(frame, chunks[0], app, &palette);
    draw_input(frame, chunks[1], app, &palette);
    draw_todos(frame, chunks[2], app, &palette);
    draw_status(frame, chunks[3], app, &palette);

    if let Mode::Picker(picker) = &app.mode {
        let area = centered(size, 64, 11);
        let lines = app.picker_style.lines(picker, &palette);
        let mut text = vec![
            Line::from(Span::styled(
                "Izvēlies laiku",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        text.extend(lines);
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            "(j/k) mainīt  (h/l) stunda/minūte  (Enter) OK  (Esc) Aizvērt",
            Style::default().fg(palette.sub),
        )));

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(text)
                .block(card(&palette, "").border_style(Style::default().fg(palette.accent)))
                .alignment(Alignment::Center),
            area,
        );
    }
}

fn card<'a>(palette: &Palette, title: &'a str) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.border))
        .style(Style::default().bg(palette.card).fg(palette.text))
}

fn draw_header<B: Backend, N: NotificationService>(
    frame: &mut Frame<B>,
    area: Rect,
    app: &App<N>,
    palette: &Palette,
) {
    let sub = Style::default().fg(palette.sub);
    let accent = Style::default().fg(palette.accent);
    let switch = if app.theme.switch_on(app.host) {
        "[ ●]"
    } else {
        "[○ ]"
    };
    let pending = match app.scheduler.service().pending() {
        Ok(count) => count.to_string(),
        Err(_) => "?".to_string(),
    };

    let text = vec![
        Line::from(Span::styled(
            "Project Todo",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Tēma ", sub),
            Span::styled(format!("{} ", app.theme.label()), sub),
            Span::styled(format!("{} (T)  ", switch), accent),
            Span::styled(format!("(S) {}", app.theme.follow_action_label()), accent),
        ]),
        Line::from(vec![
            Span::styled("(p) Izvēlēties laiku  ", accent),
            Span::raw(app.time.format("%H:%M").to_string()),
        ]),
        Line::from(vec![
            Span::styled("(d) Katru dienu  ", accent),
            Span::styled("(o) Vienreiz  ", accent),
            Span::styled(format!("Ieplānoti: {}", pending), sub),
        ]),
    ];

    frame.render_widget(Paragraph::new(text).block(card(palette, "")), area);
}

fn draw_input<B: Backend, N: NotificationService>(
    frame: &mut Frame<B>,
    area: Rect,
    app: &App<N>,
    palette: &Palette,
) {
    let editing = matches!(app.mode, Mode::Input);
    let draft = app.store.draft();
    let line = if draft.is_empty() && !editing {
        Line::from(Span::styled("Ko jādara?", Style::default().fg(palette.sub)))
    } else if editing {
        Line::from(vec![
            Span::raw(draft.to_string()),
            Span::styled("▏", Style::default().fg(palette.accent)),
        ])
    } else {
        Line::from(draft.to_string())
    };
    let hint = if editing {
        "(Enter) Pievienot  (Esc) atpakaļ"
    } else {
        "(i) rakstīt"
    };

    let border = if editing { palette.accent } else { palette.border };
    frame.render_widget(
        Paragraph::new(vec![
            line,
            Line::from(Span::styled(hint, Style::default().fg(palette.sub))),
        ])
        .block(
            card(palette, "Jauns uzdevums")
                .border_style(Style::default().fg(border))
                .style(Style::default().bg(palette.input_bg).fg(palette.text)),
        ),
        area,
    );
}

fn draw_todos<B: Backend, N: NotificationService>(
    frame: &mut Frame<B>,
    area: Rect,
    app: &mut App<N>,
    palette: &Palette,
) {
    let items: Vec<_> = app
        .store
        .list()
        .iter()
        .map(|todo| {
            let style = if todo.done {
                Style::default()
                    .fg(palette.sub)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(palette.text)
            };
            let check = match todo.done {
                true => Span::styled("[x] ", Style::default().fg(palette.accent)),
                false => Span::styled("[ ] ", Style::default().fg(palette.border)),
            };
            ListItem::new(vec![Line::from(vec![
                check,
                Span::styled(todo.title.clone(), style),
            ])])
        })
        .collect();

    let title = format!("Uzdevumi ({})", app.store.len());
    let list = List::new(items)
        .block(card(palette, &title))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol(">>");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn draw_status<B: Backend, N: NotificationService>(
    frame: &mut Frame<B>,
    area: Rect,
    app: &App<N>,
    palette: &Palette,
) {
    let line = match &app.notice {
        Some(notice) => {
            let color = match notice.kind {
                NoticeKind::Success => palette.accent,
                NoticeKind::Failure => ratatui::style::Color::Red,
                NoticeKind::Reminder => palette.text,
            };
            Line::from(Span::styled(notice.text.clone(), Style::default().fg(color)))
        }
        None => Line::from(Span::styled(
            "(j/k) pārvietoties  (space) atzīmēt  (D) dzēst  (q) iziet",
            Style::default().fg(palette.sub),
        )),
    };
    frame.render_widget(Paragraph::new(vec![line]).wrap(Wrap { trim: true }), area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
