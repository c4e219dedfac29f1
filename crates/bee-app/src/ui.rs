use std::fmt::Write as _;
use std::io::Write;

use bee_types::{UiEvent, ViewState};
use kanal::AsyncReceiver;
use tokio::sync::watch;

const EMPTY_LIST: &str = "Your list is empty. Add words or upload a PDF! 🚀";

/// Terminal UI: redraws on store changes and prints app notices
pub async fn ui_loop<W>(
    app_to_ui_rx: AsyncReceiver<UiEvent>,
    mut views: watch::Receiver<ViewState>,
    mut out: W,
) -> anyhow::Result<()>
where
    W: Write + Send + 'static,
{
    let mut last = views.borrow_and_update().clone();
    write!(out, "{}", render_view(&last))?;
    out.flush()?;

    loop {
        tokio::select! {
            event = app_to_ui_rx.recv() => {
                match event? {
                    UiEvent::Render(view) => {
                        write!(out, "{}", render_view(&view))?;
                        last = view;
                    }
                    UiEvent::Processing(true) => writeln!(out, "📖 Reading your file...")?,
                    UiEvent::Processing(false) => {}
                    UiEvent::Notice(text) => writeln!(out, "{text}")?,
                    UiEvent::Close => {
                        tracing::info!("UI closing");
                        writeln!(out, "Bye! 🐝")?;
                        out.flush()?;
                        break;
                    }
                }
            }
            changed = views.changed() => {
                if changed.is_err() {
                    // store dropped, the app is going away
                    break;
                }

                let view = views.borrow_and_update().clone();
                if view != last {
                    write!(out, "{}", render_view(&view))?;
                    last = view;
                }
            }
        }

        out.flush()?;
    }

    Ok(())
}

/// Plain text rendering of one view snapshot
pub fn render_view(view: &ViewState) -> String {
    let mut s = String::new();

    s.push_str("\n── My Words ──\n");
    if view.words.is_empty() {
        let _ = writeln!(s, "{EMPTY_LIST}");
    } else {
        for (i, entry) in view.words.iter().enumerate() {
            let mark = if entry.cached { " ★" } else { "" };
            let _ = writeln!(s, "{:>3}. {}{}", i + 1, entry.word, mark);
        }
    }

    if view.loading {
        s.push_str("🔎 Looking it up...\n");
    }

    if let Some(error) = &view.error {
        let _ = writeln!(s, "⚠️  {error}  (type `dismiss` to hide)");
    }

    if let Some(info) = &view.detail {
        let _ = writeln!(s, "\n┌ {}", info.word);
        let _ = writeln!(s, "│ Meaning: {}", info.definition);
        let _ = writeln!(s, "│ 中文: {}", info.chinese_translation);
        let _ = writeln!(s, "│ Example: {}", info.example_sentence);
        let _ = writeln!(s, "└ `say {}` to hear it, `close` to go back", info.word);
    }

    s
}
