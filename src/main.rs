use clap::Parser;
use std::error::Error;
use std::process;

use causette::core::completion::HttpCompletion;
use causette::core::config::Config;
use causette::core::session::Session;
use causette::ui::chat_loop::run_chat;
use causette::ui::theme::Theme;
use causette::utils::logging::init_tracing;

#[derive(Parser)]
#[command(name = "causette")]
#[command(version)]
#[command(about = "A modal full-screen terminal chat console")]
#[command(long_about = "Causette is a modal, full-screen terminal chat console that talks to \
OpenAI-compatible completion APIs. It keeps a scrollable transcript and uses \
vim-style insert/command modes.\n\n\
Environment Variables:\n\
  OPENAI_API_KEY    Your API key (required)\n\
  OPENAI_BASE_URL   Custom API base URL (optional, defaults to https://api.openai.com/v1)\n\n\
Controls:\n\
  Type              Enter your message (insert mode)\n\
  Enter             Send the message\n\
  Esc               Toggle insert/command mode\n\
  Up/Down/PgUp/PgDn Scroll through the transcript\n\
  :h                Show command help (command mode)\n\
  :q                Quit (command mode)")]
struct Args {}

fn main() {
    let _args = Args::parse();

    if let Err(e) = run() {
        eprintln!("❌ Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    init_tracing(config.log_file.as_deref())?;

    let theme = Theme::from_name(config.theme.as_deref().unwrap_or("dark"));
    let mut backend = HttpCompletion::from_config(&config);
    let title = format!(
        " causette v{} ({}) ",
        env!("CARGO_PKG_VERSION"),
        backend.model()
    );

    let mut session = Session::new();
    run_chat(&mut session, &mut backend, &theme, &title)
}
