//! Rendering for the timer TUI.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use cycles_rs::prelude::*;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, FormField, Screen};

// ── Public Utilities ──────────────────────────────────────────────────

/// Format a countdown as zero-padded "MM:SS".
pub fn format_clock(remaining: Duration) -> String {
    let total_secs = remaining.as_secs();
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{mins:02}:{secs:02}")
}

/// Map a log level to a ratatui [`Style`].
pub fn log_level_style(level: LogLevel) -> Style {
    match level {
        LogLevel::Trace => Style::default().fg(Color::DarkGray),
        LogLevel::Debug => Style::default().fg(Color::Cyan),
        LogLevel::Info => Style::default().fg(Color::Green),
        LogLevel::Warn => Style::default().fg(Color::Yellow),
        LogLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

// ── Root Render ───────────────────────────────────────────────────────

/// Snapshot of AppState fields needed for rendering.
///
/// We clone everything we need in one shot so the `AppState` lock is held
/// only for the clone duration — never during widget construction or
/// `frame.render_widget()` calls.
struct RenderSnapshot {
    active: Option<Cycle>,
    cycles: Vec<Cycle>,
    logs: Vec<LogLine>,
}

pub(crate) fn render(frame: &mut Frame, state: &Arc<Mutex<AppState>>, app: &App) {
    let area = frame.area();

    // Outer layout: [3] header | [flex] screen | [3] hint bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .split(area);

    // Take a snapshot and release the lock immediately. No rendering
    // happens while the lock is held.
    let snap = {
        let s = state.lock().unwrap();
        RenderSnapshot {
            active: s.store.active_cycle().cloned(),
            cycles: if app.screen == Screen::History {
                s.store.iter().cloned().collect()
            } else {
                Vec::new()
            },
            logs: if app.show_logs {
                s.logs.clone()
            } else {
                Vec::new()
            },
        }
        // lock released here
    };

    render_header(frame, chunks[0], app);
    render_hint(frame, chunks[2], app);

    match app.screen {
        Screen::Home => render_home(frame, chunks[1], &snap, app),
        Screen::History => render_history(frame, chunks[1], &snap, app),
    }
}

// ── Shared Layout ─────────────────────────────────────────────────────

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let tab = |label: &str, selected: bool| {
        if selected {
            Span::styled(
                format!(" {label} "),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {label} "), Style::default().fg(Color::DarkGray))
        }
    };

    let line = Line::from(vec![
        Span::styled(
            " cycles ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        tab("Timer", app.screen == Screen::Home),
        tab("Histórico", app.screen == Screen::History),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_hint(frame: &mut Frame, area: Rect, app: &App) {
    let (text, style) = match app.screen {
        Screen::Home => {
            if let Some(ref err) = app.form_error {
                (err.clone(), Style::default().fg(Color::Red))
            } else {
                let start = if app.submit_disabled() {
                    "[Enter] Começar (informe a tarefa)"
                } else {
                    "[Enter] Começar"
                };
                (
                    format!("{start}  [Tab] campo  [Ctrl+T] histórico  [Ctrl+L] logs  [Ctrl+C] sair"),
                    if app.submit_disabled() {
                        Style::default().fg(Color::DarkGray)
                    } else {
                        Style::default().fg(Color::Green)
                    },
                )
            }
        }
        Screen::History => (
            "[Esc] voltar  [j/k] rolar  [q] sair".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    };

    let block = Block::default().borders(Borders::ALL).border_style(style);
    frame.render_widget(Paragraph::new(text).style(style).block(block), area);
}

// ── Home Screen ───────────────────────────────────────────────────────

fn render_home(frame: &mut Frame, area: Rect, snap: &RenderSnapshot, app: &App) {
    let constraints = if app.show_logs {
        vec![
            Constraint::Length(7),
            Constraint::Min(5),
            Constraint::Length(8),
        ]
    } else {
        vec![Constraint::Length(7), Constraint::Min(5)]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_form(frame, chunks[0], app);
    render_countdown(frame, chunks[1], snap);
    if app.show_logs {
        render_logs(frame, chunks[2], &snap.logs, app);
    }
}

fn field_spans<'a>(value: &'a str, placeholder: &'a str, focused: bool) -> Span<'a> {
    let style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::UNDERLINED)
    };

    let text = if value.is_empty() && !focused {
        placeholder.to_string()
    } else if focused {
        format!("{value}\u{2588}")
    } else {
        value.to_string()
    };
    Span::styled(text, style)
}

fn render_form(frame: &mut Frame, area: Rect, app: &App) {
    let label = Style::default().fg(Color::White);

    let lines = vec![
        Line::from(vec![
            Span::styled("Vou trabalhar em ", label),
            field_spans(
                &app.task_input,
                "nome do projeto",
                app.focus == FormField::Task,
            ),
        ]),
        Line::from(vec![
            Span::styled("durante ", label),
            field_spans(
                &app.minutes_input,
                "00",
                app.focus == FormField::MinutesAmount,
            ),
            Span::styled(" minutos.", label),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Sugestões: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                TASK_SUGGESTIONS.join(" · "),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(Span::styled(
            "[Cima/Baixo] sugestões no campo tarefa, passo de 5 no campo minutos",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(" Novo ciclo ");

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_countdown(frame: &mut Frame, area: Rect, snap: &RenderSnapshot) {
    let now = Instant::now();
    let clock = snap
        .active
        .as_ref()
        .map(|cycle| format_clock(cycle.remaining(now)))
        .unwrap_or_else(|| format_clock(Duration::ZERO));

    let digit_style = Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD);
    let separator_style = Style::default().fg(Color::DarkGray);

    // One span per character, spaced out like the original's four digit
    // boxes around a separator.
    let spans: Vec<Span<'_>> = clock
        .chars()
        .map(|c| {
            let style = if c == ':' { separator_style } else { digit_style };
            Span::styled(format!(" {c} "), style)
        })
        .collect();

    let mut lines = vec![Line::from(""), Line::from(spans).centered()];
    if let Some(ref cycle) = snap.active {
        let status = if cycle.is_finished(now) {
            Span::styled("concluído", Style::default().fg(Color::Green))
        } else {
            Span::styled("em andamento", Style::default().fg(Color::Yellow))
        };
        lines.push(Line::from(""));
        lines.push(
            Line::from(vec![
                Span::styled(cycle.task.clone(), Style::default().fg(Color::White)),
                Span::raw("  "),
                status,
            ])
            .centered(),
        );
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ── History Screen ────────────────────────────────────────────────────

fn render_history(frame: &mut Frame, area: Rect, snap: &RenderSnapshot, app: &App) {
    let now = Instant::now();
    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        format!("{:<30} {:>7}  {}", "Tarefa", "Minutos", "Status"),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))];

    let active_id = snap.active.as_ref().map(|c| c.id);
    for cycle in &snap.cycles {
        let status = if Some(cycle.id) == active_id {
            if cycle.is_finished(now) {
                Span::styled("concluído", Style::default().fg(Color::Green))
            } else {
                Span::styled("em andamento", Style::default().fg(Color::Yellow))
            }
        } else {
            Span::styled("\u{2014}", Style::default().fg(Color::DarkGray))
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<30} {:>7}  ", cycle.task, cycle.minutes_amount),
                Style::default().fg(Color::White),
            ),
            status,
        ]));
    }

    if snap.cycles.is_empty() {
        lines.push(Line::from(Span::styled(
            "Nenhum ciclo criado ainda.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(" Histórico ");

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((app.history_scroll as u16, 0))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

// ── Log Pane ──────────────────────────────────────────────────────────

fn render_logs(frame: &mut Frame, area: Rect, logs: &[LogLine], app: &App) {
    let inner_height = area.height.saturating_sub(2) as usize;

    let mut lines: Vec<Line> = Vec::with_capacity(logs.len());

    for log in logs {
        // Filter out trace/debug-level logs — too noisy for the TUI.
        if matches!(log.level, LogLevel::Trace | LogLevel::Debug) {
            continue;
        }
        let level_span = Span::styled(
            format!("{} ", log.level.label()),
            log_level_style(log.level),
        );
        let time_span = Span::styled(
            format!("{} ", log.time),
            Style::default().fg(Color::DarkGray),
        );
        let msg_span = Span::raw(&log.message);
        lines.push(Line::from(vec![time_span, level_span, msg_span]));
    }

    let total = lines.len();
    let scroll = if app.log_scroll == 0 {
        total.saturating_sub(inner_height)
    } else {
        total
            .saturating_sub(inner_height)
            .saturating_sub(app.log_scroll)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Log ");

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((scroll as u16, 0))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_clock_pads_digits() {
        assert_eq!(format_clock(Duration::ZERO), "00:00");
        assert_eq!(format_clock(Duration::from_secs(9)), "00:09");
        assert_eq!(format_clock(Duration::from_secs(90)), "01:30");
        assert_eq!(format_clock(Duration::from_secs(25 * 60)), "25:00");
        assert_eq!(format_clock(Duration::from_secs(60 * 60)), "60:00");
    }

    #[test]
    fn log_level_style_colors() {
        assert_eq!(log_level_style(LogLevel::Trace).fg, Some(Color::DarkGray));
        assert_eq!(log_level_style(LogLevel::Debug).fg, Some(Color::Cyan));
        assert_eq!(log_level_style(LogLevel::Info).fg, Some(Color::Green));
        assert_eq!(log_level_style(LogLevel::Warn).fg, Some(Color::Yellow));
        assert_eq!(log_level_style(LogLevel::Error).fg, Some(Color::Red));
        assert!(
            log_level_style(LogLevel::Error)
                .add_modifier
                .contains(Modifier::BOLD)
        );
    }
}
