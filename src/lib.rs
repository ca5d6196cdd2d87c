//! Causette is a modal, full-screen terminal chat console for
//! OpenAI-compatible completion APIs.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the session state machine: the structured conversation,
//!   the rendered transcript, input modes, scrollback, configuration and
//!   the completion boundary.
//! - [`ui`] computes frame layouts, paints them, and runs the interactive
//!   event loop that drives user input and display updates.
//! - [`commands`] implements command-mode alias matching and command
//!   execution used by the chat loop.
//! - [`api`] defines the chat payloads used by the HTTP completion client.
//!
//! The runtime entrypoint lives in the binary crate (`src/main.rs`), which
//! loads configuration, constructs the backend, and dispatches into
//! [`ui::chat_loop`] for the interactive session.

pub mod api;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;
