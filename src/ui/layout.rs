use ratatui::style::Style;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::constants::CHROME_ROWS;
use crate::core::session::{Mode, Session, TranscriptKind};
use crate::ui::theme::Theme;

/// Transient row shown while a completion call is in flight.
const THINKING_LINE: &str = "AI: thinking...";

/// One positioned terminal write. The layout pass only ever produces
/// instructions whose text fits the remaining row width; the apply pass
/// drops anything a smaller-than-expected surface cannot hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub x: u16,
    pub y: u16,
    pub text: String,
    pub style: Style,
}

/// Pure layout pass: given the terminal dimensions and the session, produce
/// the write instructions for one frame. Layout, top to bottom: a centered
/// header band, the visible transcript window, a status bar, and the prompt
/// line. Never fails, including on 0-row and 0-column surfaces.
pub fn compute_layout(
    width: u16,
    height: u16,
    session: &Session,
    theme: &Theme,
    title: &str,
) -> Vec<Instruction> {
    let mut out = Vec::new();
    if width == 0 || height == 0 {
        return out;
    }
    let cols = width as usize;

    // Header band with a centered title.
    out.push(Instruction {
        x: 0,
        y: 0,
        text: " ".repeat(cols),
        style: theme.header_style,
    });
    let title_text = clip_to_width(title, cols);
    let title_x = cols.saturating_sub(title_text.as_str().width()) / 2;
    out.push(Instruction {
        x: title_x as u16,
        y: 0,
        text: title_text,
        style: theme.header_style,
    });

    // Transcript window. The window is selected in transcript entries;
    // multi-line notices then occupy successive rows and are cut off at the
    // bottom edge of the body.
    let visible_rows = height.saturating_sub(CHROME_ROWS) as usize;
    if visible_rows > 0 {
        let mut display: Vec<(TranscriptKind, &str)> = session
            .transcript()
            .iter()
            .map(|line| (line.kind, line.text.as_str()))
            .collect();
        if session.thinking {
            display.push((TranscriptKind::Assistant, THINKING_LINE));
        }

        let len = display.len();
        let start = len.saturating_sub(visible_rows + session.scroll_offset);
        let window = &display[start..(start + visible_rows).min(len)];

        let body_last = visible_rows as u16;
        let mut y: u16 = 1;
        'entries: for (kind, text) in window {
            let style = style_for(*kind, theme);
            for line in text.split('\n') {
                if y > body_last {
                    break 'entries;
                }
                out.push(Instruction {
                    x: 0,
                    y,
                    text: clip_to_width(line, cols),
                    style,
                });
                y += 1;
            }
        }
    }

    // Status bar: a horizontal rule with the mode and keybinding hint on top.
    if height >= 2 {
        let y = height - 2;
        out.push(Instruction {
            x: 0,
            y,
            text: "─".repeat(cols),
            style: theme.status_style,
        });
        let status = format!(" {} MODE | ↑/↓:Scroll | :h = Help ", session.mode.as_str());
        out.push(Instruction {
            x: 0,
            y,
            text: clip_to_width(&status, cols),
            style: theme.status_style,
        });
    }

    // Prompt line with a mode-specific prefix and the live input buffer.
    let y = height - 1;
    out.push(Instruction {
        x: 0,
        y,
        text: " ".repeat(cols),
        style: theme.prompt_style,
    });
    let prefix = match session.mode {
        Mode::Command => "/>",
        Mode::Insert => "You: ",
    };
    out.push(Instruction {
        x: 0,
        y,
        text: clip_to_width(&format!("{prefix}{}", session.input), cols),
        style: theme.prompt_style,
    });

    out
}

fn style_for(kind: TranscriptKind, theme: &Theme) -> Style {
    match kind {
        TranscriptKind::User => theme.user_style,
        TranscriptKind::Assistant => theme.assistant_style,
        TranscriptKind::Notice => theme.notice_style,
    }
}

/// Cut `text` so its display width fits in `max_cols`. Overflow is never
/// wrapped, only cut.
fn clip_to_width(text: &str, max_cols: usize) -> String {
    let mut used = 0usize;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_cols {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}
