use ratatui::Frame;

use crate::core::session::Session;
use crate::ui::layout::compute_layout;
use crate::ui::theme::Theme;

/// Apply pass: materialize the layout instructions into the frame buffer.
/// Writes outside the current surface are silently dropped; in-bounds
/// writes are truncated to the remaining row width. Drawing never fails.
pub fn ui(f: &mut Frame, session: &Session, theme: &Theme, title: &str) {
    let area = f.area();
    let instructions = compute_layout(area.width, area.height, session, theme, title);
    let buf = f.buffer_mut();
    for instr in instructions {
        if instr.x >= area.width || instr.y >= area.height {
            continue;
        }
        let max_width = (area.width - instr.x) as usize;
        buf.set_stringn(
            area.x + instr.x,
            area.y + instr.y,
            &instr.text,
            max_width,
            instr.style,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(width: u16, height: u16, session: &Session) -> Terminal<TestBackend> {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("terminal");
        let theme = Theme::dark_default();
        terminal
            .draw(|f| ui(f, session, &theme, "causette"))
            .expect("draw");
        terminal
    }

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer.content()[y as usize * width..(y as usize + 1) * width]
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn renders_an_exchange_into_the_body() {
        let mut session = Session::new();
        session.record_user_turn("hello");
        session.record_assistant_turn("hi there");

        let terminal = render(40, 10, &session);
        assert!(row_text(&terminal, 1).starts_with("You: hello"));
        assert!(row_text(&terminal, 2).starts_with("AI: hi there"));
    }

    #[test]
    fn prompt_line_tracks_the_input_buffer() {
        let mut session = Session::new();
        session.input.push_str("typing");
        let terminal = render(40, 10, &session);
        assert!(row_text(&terminal, 9).starts_with("You: typing"));
    }

    #[test]
    fn degenerate_surfaces_never_fault() {
        let mut session = Session::new();
        session.record_user_turn("hello");
        session.record_assistant_turn("hi there");
        session.input.push_str("more than five columns of input");

        for (width, height) in [(5, 1), (1, 5), (1, 1), (2, 2), (3, 4)] {
            let _ = render(width, height, &session);
        }
    }

    #[test]
    fn one_row_surface_shows_a_clipped_prompt() {
        let mut session = Session::new();
        session.input.push_str("hello");
        let terminal = render(5, 1, &session);
        // Header and prompt share row 0; the prompt is written last.
        assert_eq!(row_text(&terminal, 0), "You: ");
    }
}
