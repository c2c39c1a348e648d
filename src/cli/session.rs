//! Line-oriented front end for [`App`].
//!
//! Each input line is one user action. Background results are printed as
//! they arrive so the output reads like a transcript of the screen.

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::app::{App, AppEvent};
use crate::fetcher::ImageSource;
use crate::model::SavedDog;
use crate::ui::viewer::{ImagePhase, ViewerState};

const HELP: &str = "commands: next | note <text> | fav | show | list | wait | quit";

/// One line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Next,
    Note(String),
    Favourite,
    Show,
    List,
    /// Block until pending fetches and loads are applied.
    Wait,
    Quit,
    Unknown(String),
}

impl SessionCommand {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let command = match word {
            "next" | "n" => Self::Next,
            "note" => Self::Note(rest.to_string()),
            "fav" | "f" => Self::Favourite,
            "show" => Self::Show,
            "list" | "ls" => Self::List,
            "wait" => Self::Wait,
            "quit" | "q" | "exit" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        };
        Some(command)
    }
}

pub fn render_state(state: &ViewerState) -> String {
    let phase = match state.phase() {
        ImagePhase::Empty => "empty",
        ImagePhase::Loading => "loading",
        ImagePhase::Loaded => "loaded",
    };
    let mark = if state.is_favourited() { "*" } else { " " };
    let mut out = format!("[{mark}] {} ({phase})", state.display_url());
    if let Some(image) = state.current_image().filter(|i| !i.is_success()) {
        out.push_str(&format!("\n    {}: {}", image.status, image.message));
    }
    if !state.note.is_empty() {
        out.push_str(&format!("\n    note: {}", state.note));
    }
    out
}

pub fn render_favourites(favourites: &[SavedDog]) -> String {
    if favourites.is_empty() {
        return "no favourites yet".to_string();
    }
    favourites
        .iter()
        .enumerate()
        .map(|(i, dog)| format!("{:>3}. {}  {}", i + 1, dog.image_address, dog.comment))
        .collect::<Vec<_>>()
        .join("\n")
}

enum Input {
    Event(Option<AppEvent>),
    Line(io::Result<Option<String>>),
}

/// Drive `app` from line input until `quit` or end of input.
///
/// Launch happens on entry; leaving the session counts as backgrounding
/// and persists the favourites.
pub async fn run_session<S, R, W>(app: &mut App<S>, input: R, out: &mut W) -> io::Result<()>
where
    S: ImageSource,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    app.on_launch();
    writeln!(out, "{HELP}")?;

    loop {
        let pending = app.has_pending();
        let received = tokio::select! {
            event = app.next_event(), if pending => Input::Event(event),
            line = lines.next_line() => Input::Line(line),
        };

        match received {
            Input::Event(Some(event)) => apply(app, event, out)?,
            Input::Event(None) => {}
            Input::Line(Ok(Some(line))) => {
                let Some(command) = SessionCommand::parse(&line) else {
                    continue;
                };
                if !execute(app, command, out).await? {
                    break;
                }
            }
            Input::Line(Ok(None)) => break,
            Input::Line(Err(e)) => {
                tracing::warn!(error = %e, "failed to read session input");
                break;
            }
        }
    }

    app.on_app_backgrounded().await;
    if app.state().favourites_loaded {
        writeln!(out, "saved {} favourite(s)", app.favourites().len())?;
    } else {
        writeln!(out, "favourites not loaded, nothing saved")?;
    }
    Ok(())
}

fn apply<S: ImageSource, W: Write>(app: &mut App<S>, event: AppEvent, out: &mut W) -> io::Result<()> {
    let is_load = matches!(event, AppEvent::FavouritesLoaded(_));
    app.handle_event(event);
    if is_load {
        writeln!(out, "{} favourite(s) loaded", app.favourites().len())
    } else {
        writeln!(out, "{}", render_state(app.state()))
    }
}

/// Returns `false` when the session should end.
async fn execute<S: ImageSource, W: Write>(
    app: &mut App<S>,
    command: SessionCommand,
    out: &mut W,
) -> io::Result<bool> {
    match command {
        SessionCommand::Next => app.on_next_tapped(),
        SessionCommand::Note(text) => app.set_note(text),
        SessionCommand::Favourite => {
            app.on_favourite_tapped();
            writeln!(out, "{}", render_state(app.state()))?;
        }
        SessionCommand::Show => writeln!(out, "{}", render_state(app.state()))?,
        SessionCommand::List => writeln!(out, "{}", render_favourites(app.favourites()))?,
        SessionCommand::Wait => {
            while let Some(event) = app.next_event().await {
                apply(app, event, out)?;
            }
        }
        SessionCommand::Quit => return Ok(false),
        SessionCommand::Unknown(line) => writeln!(out, "unknown command '{line}'; {HELP}")?,
    }
    Ok(true)
}
