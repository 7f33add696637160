use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::error::Result;
use crate::fmt::money_in;
use crate::i18n::Language;

pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

pub const FOOTER_STYLE: Style = Style::new().fg(Color::DarkGray);

pub const STATUS_STYLE: Style = Style::new().fg(Color::Yellow);

pub const AMOUNT_POS_STYLE: Style = Style::new().fg(Color::Rgb(80, 220, 100));
pub const AMOUNT_NEG_STYLE: Style = Style::new().fg(Color::Red);

pub const SELECTED_STYLE: Style = Style::new()
    .bg(Color::Rgb(40, 40, 60))
    .add_modifier(Modifier::BOLD);

pub const FOCUS_STYLE: Style = Style::new().fg(Color::Cyan);

/// Format an amount as a colored Span (green when positive, red when
/// negative). Shows the absolute value; color conveys the sign.
pub fn money_span(amount: f64, lang: Language) -> Span<'static> {
    let style = if amount < 0.0 {
        AMOUNT_NEG_STYLE
    } else {
        AMOUNT_POS_STYLE
    };
    Span::styled(money_in(amount.abs(), lang), style)
}

/// Wrap text to a given width. Returns (wrapped_string, line_count).
pub fn wrap_text(text: &str, width: usize) -> (String, u16) {
    if width == 0 {
        return (text.to_string(), 1);
    }
    let wrapped = textwrap::fill(text, width);
    let lines = wrapped.lines().count().max(1) as u16;
    (wrapped, lines)
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{truncated}\u{2026}")
    }
}

/// Draw the header line and the thick separator under it. Returns the
/// content area and the one-line hints area at the bottom.
pub fn chrome(frame: &mut Frame, header: &str) -> (Rect, Rect) {
    let area = frame.area();
    let [header_area, sep, content_area, hints_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(format!(" {header}")).style(HEADER_STYLE),
        header_area,
    );
    let sep_line = "\u{2501}".repeat(area.width as usize);
    frame.render_widget(
        Paragraph::new(sep_line).style(Style::default().fg(Color::DarkGray)),
        sep,
    );
    (content_area, hints_area)
}

/// Render a status message if there is one, otherwise the key hints.
pub fn hints(frame: &mut Frame, area: Rect, status: Option<&str>, keys: &str) {
    match status {
        Some(msg) => {
            frame.render_widget(Paragraph::new(format!(" {msg}")).style(STATUS_STYLE), area)
        }
        None => frame.render_widget(Paragraph::new(format!(" {keys}")).style(FOOTER_STYLE), area),
    }
}

// ---------------------------------------------------------------------------
// Page view infrastructure
// ---------------------------------------------------------------------------

pub enum ViewAction {
    Continue,
    Close,
}

pub trait PageView {
    fn draw(&mut self, frame: &mut Frame);
    fn handle_key(&mut self, code: KeyCode) -> ViewAction;
}

/// Run one page as a standalone interactive view. Sets up the terminal,
/// event loop, and panic hook, then restores the terminal on exit.
pub fn run_view(view: &mut dyn PageView) -> Result<()> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        hook(info);
    }));

    let mut terminal = ratatui::init();

    let result: Result<()> = loop {
        if let Err(e) = terminal.draw(|frame| view.draw(frame)) {
            break Err(e.into());
        }

        match event::read() {
            Err(e) => break Err(e.into()),
            Ok(Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
                {
                    break Ok(());
                }
                match view.handle_key(key.code) {
                    ViewAction::Close => break Ok(()),
                    ViewAction::Continue => {}
                }
            }
            _ => {}
        }
    };

    drop(terminal);
    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_marks_cut() {
        assert_eq!(truncate("Marketing Department", 9), "Marketin\u{2026}");
        assert_eq!(truncate("Rent", 9), "Rent");
    }

    #[test]
    fn test_money_span_shows_absolute_value() {
        let span = money_span(-3250.75, Language::En);
        assert_eq!(span.content, "$3,250.75");
        assert_eq!(span.style, AMOUNT_NEG_STYLE);
    }

    #[test]
    fn test_wrap_text_counts_lines() {
        let (wrapped, lines) = wrap_text("Major technology client", 10);
        assert_eq!(lines, 3);
        assert!(wrapped.contains('\n'));
    }
}
