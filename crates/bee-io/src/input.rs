use std::io::{BufRead, Write};

/// Line-oriented reader for typed commands
pub struct LineReader<R> {
    reader: R,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Next non-blank line, trimmed. `None` at EOF.
    pub fn next_line(&mut self) -> std::io::Result<Option<String>> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
        }
    }

    /// Ask a yes/no question on `writer`, only an explicit yes confirms.
    ///
    /// EOF or an unreadable answer counts as no.
    pub fn confirm<W: Write>(&mut self, writer: &mut W, question: &str) -> bool {
        if let Err(e) = write!(writer, "{question} [y/N] ").and_then(|_| writer.flush()) {
            tracing::warn!("Failed to show confirmation prompt: {}", e);
            return false;
        }

        let mut answer = String::new();
        match self.reader.read_line(&mut answer) {
            Ok(0) => false,
            Ok(_) => is_yes(&answer),
            Err(e) => {
                tracing::warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
