//! Screens feature view.

use onboard_core::navigation::Screen;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::state::ScreenState;
use super::{Element, ElementAction, elements};
use crate::common::text::{mask, truncate_with_ellipsis};
use crate::state::AppState;

/// Spinner frames shown while a collaborator call is in flight.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Width of the value column of a form field.
const FIELD_WIDTH: usize = 32;

/// Renders the current screen's body into `area`.
pub fn render_screen(frame: &mut Frame, area: Rect, app: &AppState) {
    let screen = app.nav.current();
    let ui = &app.screen;

    let mut lines = headline(screen, app);
    lines.push(Line::from(""));

    for (index, element) in elements(screen).iter().enumerate() {
        lines.push(element_line(element, ui, index == ui.focus));
    }

    lines.push(Line::from(""));
    if let Some(line) = status_line(screen, app) {
        lines.push(line);
    }
    if let Some(notice) = &ui.notice {
        lines.push(Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(Color::Yellow),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", screen.title()));
    let para = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .block(block);
    frame.render_widget(para, area);
}

fn headline(screen: Screen, app: &AppState) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    match screen {
        Screen::Splash => vec![
            Line::from(Span::styled("Welcome To", bold)),
            Line::from(Span::styled("Future", bold.fg(Color::Cyan))),
        ],
        Screen::LoginOptions => vec![Line::from(Span::styled("Login for UILover", bold))],
        Screen::SignIn | Screen::SignUp => {
            vec![Line::from(Span::styled(screen.title().to_string(), bold))]
        }
        Screen::Profile => {
            let who = app
                .auth
                .user()
                .map_or_else(|| "Signed in".to_string(), |user| user.to_string());
            vec![
                Line::from(Span::styled(who, bold)),
                Line::from(Span::styled(
                    "Welcome back",
                    Style::default().fg(Color::DarkGray),
                )),
            ]
        }
    }
}

fn element_line(element: &Element, ui: &ScreenState, focused: bool) -> Line<'static> {
    let marker = if focused { "› " } else { "  " };
    let focus_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    match element {
        Element::Field(field) => {
            let raw = ui.form.field(*field);
            let shown = if field.is_secret() && !ui.form.show_password {
                mask(raw)
            } else {
                raw.to_string()
            };
            let value = truncate_with_ellipsis(&shown, FIELD_WIDTH, true);
            let cursor = if focused { "▏" } else { "" };
            Line::from(vec![
                Span::styled(marker, focus_style),
                Span::styled(format!("{:<18}", field.label()), focus_style),
                Span::raw(value),
                Span::styled(cursor, Style::default().fg(Color::Cyan)),
            ])
        }
        Element::Button { label, action } => {
            let style = if *action == ElementAction::Unavailable && !focused {
                Style::default().fg(Color::DarkGray)
            } else {
                focus_style
            };
            Line::from(vec![
                Span::styled(marker, focus_style),
                Span::styled(format!("[ {label} ]"), style),
            ])
        }
        Element::Link { prompt, label, .. } => Line::from(vec![
            Span::styled(marker, focus_style),
            Span::styled(*prompt, Style::default().fg(Color::DarkGray)),
            Span::styled(*label, focus_style.add_modifier(Modifier::UNDERLINED)),
        ]),
    }
}

/// Busy spinner, local validation error, or the last collaborator error.
fn status_line(screen: Screen, app: &AppState) -> Option<Line<'static>> {
    let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
    if screen.is_auth_form() && app.tasks.is_form_busy() {
        return Some(Line::from(Span::styled(
            format!("{spinner} Working..."),
            Style::default().fg(Color::Yellow),
        )));
    }
    if screen == Screen::Profile && app.nav.is_logout_pending() {
        return Some(Line::from(Span::styled(
            format!("{spinner} Signing out..."),
            Style::default().fg(Color::Yellow),
        )));
    }
    if !screen.is_auth_form() {
        return None;
    }
    let error = app
        .screen
        .form
        .local_error
        .clone()
        .or_else(|| {
            app.auth
                .form_error(app.nav.revision())
                .map(ToString::to_string)
        })?;
    Some(Line::from(Span::styled(
        error,
        Style::default().fg(Color::Red),
    )))
}
