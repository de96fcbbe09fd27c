//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui Frame, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::text::truncate_with_ellipsis;
use crate::screens;
use crate::state::AppState;

/// Height of the key hint / history footer.
const FOOTER_HEIGHT: u16 = 2;

/// Horizontal margin around the screen body.
const MARGIN: u16 = 1;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(FOOTER_HEIGHT)])
        .split(area);

    let body = Rect {
        x: chunks[0].x + MARGIN,
        y: chunks[0].y,
        width: chunks[0].width.saturating_sub(MARGIN * 2),
        height: chunks[0].height,
    };
    screens::render_screen(frame, body, app);
    render_footer(app, frame, chunks[1]);
}

fn render_footer(app: &AppState, frame: &mut Frame, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let mut hints = vec!["↑/↓ move", "Enter select", "Esc back", "Ctrl+C quit"];
    if app.nav.current().is_auth_form() {
        hints.insert(2, "Ctrl+S show password");
    }

    let width = usize::from(area.width.saturating_sub(MARGIN * 2));
    let trail = history_trail(app);
    let lines = vec![
        Line::from(Span::styled(
            truncate_with_ellipsis(&hints.join("  "), width, false),
            dim,
        )),
        Line::from(Span::styled(truncate_with_ellipsis(&trail, width, true), dim)),
    ];

    let footer_area = Rect {
        x: area.x + MARGIN,
        width: area.width.saturating_sub(MARGIN * 2),
        ..area
    };
    frame.render_widget(Paragraph::new(lines), footer_area);
}

/// Back stack as a breadcrumb, oldest first.
fn history_trail(app: &AppState) -> String {
    app.nav
        .stack()
        .entries()
        .iter()
        .map(|screen| screen.title())
        .collect::<Vec<_>>()
        .join(" › ")
}

#[cfg(test)]
mod tests {
    use onboard_core::auth::{AuthError, AuthOp, AuthState};
    use onboard_core::navigation::UserAction;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn draw(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).expect("terminal");
        terminal.draw(|frame| render(app, frame)).expect("draw");
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_splash_renders_buttons() {
        let app = AppState::default();
        let screen = draw(&app);
        assert!(screen.contains("Welcome To"));
        assert!(screen.contains("[ Login ]"));
        assert!(screen.contains("[ Sign Up ]"));
    }

    #[test]
    fn test_password_is_masked_until_revealed() {
        let mut app = AppState::default();
        app.nav.on_action(UserAction::TapSignUp);
        app.screen.sync(app.nav.revision());
        app.screen.form.password = "hunter22".into();

        assert!(!draw(&app).contains("hunter22"));

        app.screen.form.show_password = true;
        assert!(draw(&app).contains("hunter22"));
    }

    #[test]
    fn test_auth_error_stays_on_the_form_that_failed() {
        let mut app = AppState::default();
        app.nav.on_action(UserAction::TapLogin);
        app.nav.on_action(UserAction::ContinueWithEmail);
        crate::auth::handle_auth_completed(
            &mut app.auth,
            &mut app.nav,
            AuthOp::SignIn,
            AuthState::failed(AuthError::WrongPassword),
        );
        app.screen.sync(app.nav.revision());
        assert!(draw(&app).contains("Incorrect password."));

        app.nav.on_action(UserAction::SwitchMode);
        app.screen.sync(app.nav.revision());
        assert!(!draw(&app).contains("Incorrect password."));
    }

    #[test]
    fn test_footer_shows_history() {
        let mut app = AppState::default();
        app.nav.on_action(UserAction::TapLogin);
        assert!(draw(&app).contains("Welcome › Login"));
    }
}
