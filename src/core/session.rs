use std::collections::VecDeque;

use crate::core::constants::PAGE_SCROLL_LINES;
use crate::core::message::Message;

/// Input interpretation mode. Exactly one is active at any time; ESC
/// toggles between them and always clears the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Insert,
    Command,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Insert => Mode::Command,
            Mode::Command => Mode::Insert,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Insert => "INSERT",
            Mode::Command => "COMMAND",
        }
    }
}

/// Source category of a transcript line. Used only for styling; notices
/// have no counterpart in the structured conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptKind {
    User,
    Assistant,
    Notice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    pub kind: TranscriptKind,
    pub text: String,
}

impl TranscriptLine {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            kind: TranscriptKind::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            kind: TranscriptKind::Assistant,
            text: text.into(),
        }
    }

    pub fn notice(text: impl Into<String>) -> Self {
        Self {
            kind: TranscriptKind::Notice,
            text: text.into(),
        }
    }
}

/// Aggregate root for one interactive session: the structured conversation
/// sent to the backend, the rendered transcript, the in-progress input
/// line, the active mode and the scrollback offset.
///
/// The conversation and the transcript stay in lockstep: every completed
/// exchange appends exactly one user and one assistant entry to each, while
/// notices exist only in the transcript.
pub struct Session {
    messages: VecDeque<Message>,
    transcript: Vec<TranscriptLine>,
    pub input: String,
    pub mode: Mode,
    pub scroll_offset: usize,
    /// Set for the duration of a blocking completion call; rendered as a
    /// transient trailing notice, never stored in the transcript.
    pub thinking: bool,
}

impl Session {
    pub fn new() -> Self {
        let mut messages = VecDeque::new();
        messages.push_back(Message::seed());
        Self {
            messages,
            transcript: Vec::new(),
            input: String::new(),
            mode: Mode::default(),
            scroll_offset: 0,
            thinking: false,
        }
    }

    pub fn messages(&self) -> &VecDeque<Message> {
        &self.messages
    }

    pub fn transcript(&self) -> &[TranscriptLine] {
        &self.transcript
    }

    /// Reset the conversation to the seed system turn and empty the
    /// transcript. Mode and scroll offset are deliberately left alone.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.messages.push_back(Message::seed());
        self.transcript.clear();
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.input.clear();
    }

    pub fn enter_insert_mode(&mut self) {
        self.mode = Mode::Insert;
        self.input.clear();
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Take the input buffer, leaving it empty.
    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }

    pub fn record_user_turn(&mut self, content: &str) {
        self.messages.push_back(Message::user(content));
        self.transcript
            .push(TranscriptLine::user(format!("You: {content}")));
    }

    pub fn record_assistant_turn(&mut self, content: &str) {
        self.messages.push_back(Message::assistant(content));
        self.transcript
            .push(TranscriptLine::assistant(format!("AI: {content}")));
    }

    pub fn push_notice(&mut self, text: impl Into<String>) {
        self.transcript.push(TranscriptLine::notice(text));
    }

    /// Scroll toward older lines. Capped at the transcript length so the
    /// view cannot move past the oldest line.
    pub fn scroll_back(&mut self, lines: usize) {
        self.scroll_offset = self
            .scroll_offset
            .saturating_add(lines)
            .min(self.transcript.len());
    }

    /// Scroll toward newer lines. Floored at zero, which shows the tail.
    pub fn scroll_forward(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn page_back(&mut self) {
        self.scroll_back(PAGE_SCROLL_LINES);
    }

    pub fn page_forward(&mut self) {
        self.scroll_forward(PAGE_SCROLL_LINES);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn exchange_count(&self) -> usize {
        self.non_system_turns() / 2
    }

    fn non_system_turns(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| !m.role.is_system())
            .count()
    }

    #[cfg(test)]
    fn non_notice_lines(&self) -> usize {
        self.transcript
            .iter()
            .filter(|l| l.kind != TranscriptKind::Notice)
            .count()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
