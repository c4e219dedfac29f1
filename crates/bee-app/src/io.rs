use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use bee_io::input::LineReader;
use bee_types::AppEvent;
use kanal::{AsyncSender, Sender};
use tokio_util::sync::CancellationToken;

const CLEAR_QUESTION: &str = "Delete ALL words and saved definitions? 🗑️";

pub const HELP: &str = "\
Commands:
  add <words>     add words (commas, spaces or new lines separate them)
  show <word>     show a word's definition, translation and example
  close           close the word card
  say <word>      hear the word spoken
  remove <word>   remove a word from the list
  upload <path>   find words in a photo (jpg, png, webp) or PDF
  list            show the word list again
  dismiss         hide the current error
  clear           delete ALL words and saved definitions
  quit            leave
Anything else is added as words.";

/// One parsed input line
#[derive(Debug, Clone)]
pub enum Command {
    Event(AppEvent),
    /// Needs confirmation before it becomes [`AppEvent::ClearAll`]
    Clear,
    Help,
    Usage(&'static str),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (head, rest) = line
        .split_once(char::is_whitespace)
        .map(|(head, rest)| (head, rest.trim()))
        .unwrap_or((line, ""));

    let needs_word = |usage: &'static str, event: fn(String) -> AppEvent| {
        if rest.is_empty() {
            Command::Usage(usage)
        } else {
            Command::Event(event(rest.to_string()))
        }
    };

    match head.to_lowercase().as_str() {
        "add" => Command::Event(AppEvent::SubmitWords(rest.to_string())),
        "show" | "select" => needs_word("show <word>", AppEvent::SelectWord),
        "close" => Command::Event(AppEvent::CloseDetail),
        "say" | "play" => needs_word("say <word>", AppEvent::PlayAudio),
        "remove" | "rm" => needs_word("remove <word>", AppEvent::RemoveWord),
        "upload" => needs_word("upload <path>", |path: String| {
            AppEvent::UploadFile(PathBuf::from(path))
        }),
        "list" | "ls" => Command::Event(AppEvent::ShowList),
        "dismiss" => Command::Event(AppEvent::DismissError),
        "clear" => Command::Clear,
        "quit" | "exit" => Command::Event(AppEvent::Quit),
        "help" | "?" => Command::Help,
        _ => Command::Event(AppEvent::SubmitWords(line.to_string())),
    }
}

/// Read commands until EOF, `quit` or cancellation
pub fn input_loop<R, W>(
    lines: &mut LineReader<R>,
    out: &mut W,
    event_tx: &Sender<AppEvent>,
    cancel: &CancellationToken,
    interactive: bool,
) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    while !cancel.is_cancelled() {
        if interactive {
            write!(out, "> ")?;
            out.flush()?;
        }

        let Some(line) = lines.next_line()? else {
            tracing::info!("Input closed");
            event_tx.send(AppEvent::Quit)?;
            break;
        };

        match parse_command(&line) {
            Command::Event(AppEvent::Quit) => {
                event_tx.send(AppEvent::Quit)?;
                break;
            }
            Command::Event(event) => event_tx.send(event)?,
            Command::Clear => {
                if lines.confirm(out, CLEAR_QUESTION) {
                    event_tx.send(AppEvent::ClearAll)?;
                } else {
                    writeln!(out, "Nothing was deleted.")?;
                }
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Usage(usage) => writeln!(out, "Usage: {usage}")?,
        }
    }

    Ok(())
}

pub fn spawn_input_thread(event_tx: AsyncSender<AppEvent>, cancel: CancellationToken) -> JoinHandle<()> {
    thread::spawn(move || {
        let event_tx = event_tx.to_sync();
        let interactive = atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stdout);

        let stdin = io::stdin();
        let mut lines = LineReader::new(stdin.lock());
        let mut out = io::stdout();

        if let Err(e) = input_loop(&mut lines, &mut out, &event_tx, &cancel, interactive) {
            tracing::error!("Input watcher stopped: {}", e);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(line: &str) -> AppEvent {
        match parse_command(line) {
            Command::Event(event) => event,
            other => panic!("expected an event for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn commands_map_to_events() {
        assert!(matches!(event("show Apple"), AppEvent::SelectWord(w) if w == "Apple"));
        assert!(matches!(event("SAY owl"), AppEvent::PlayAudio(w) if w == "owl"));
        assert!(matches!(event("rm cat"), AppEvent::RemoveWord(w) if w == "cat"));
        assert!(matches!(event("close"), AppEvent::CloseDetail));
        assert!(matches!(event("dismiss"), AppEvent::DismissError));
        assert!(matches!(event("list"), AppEvent::ShowList));
        assert!(matches!(event("exit"), AppEvent::Quit));
        assert!(
            matches!(event("upload  ~/scan one.pdf"), AppEvent::UploadFile(p) if p == PathBuf::from("~/scan one.pdf"))
        );
    }

    #[test]
    fn add_and_bare_text_submit_words() {
        assert!(matches!(event("add apple, banana"), AppEvent::SubmitWords(t) if t == "apple, banana"));
        assert!(matches!(event("apple banana"), AppEvent::SubmitWords(t) if t == "apple banana"));
        // empty `add` still reaches the store so it can reject it
        assert!(matches!(event("add"), AppEvent::SubmitWords(t) if t.is_empty()));
    }

    #[test]
    fn word_commands_need_an_argument() {
        assert!(matches!(parse_command("show"), Command::Usage("show <word>")));
        assert!(matches!(parse_command("upload   "), Command::Usage("upload <path>")));
        assert!(matches!(parse_command("clear"), Command::Clear));
        assert!(matches!(parse_command("?"), Command::Help));
    }
}
