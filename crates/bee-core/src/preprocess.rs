use unicode_normalization::UnicodeNormalization;

/// Characters removed from every word before it enters the list
pub const STRIPPED_PUNCTUATION: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`', '~',
    '(', ')',
];

/// Turn a raw token into a list entry: trim, lowercase, strip punctuation.
///
/// Returns `None` when nothing is left. Only [`STRIPPED_PUNCTUATION`] is removed,
/// so apostrophes and quotes survive.
pub fn normalize_word(raw: &str) -> Option<String> {
    let word: String = raw
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect();

    (!word.is_empty()).then_some(word)
}

pub trait Preprocessor {
    // Default submission preprocessor
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFKC) folds fullwidth commas and spaces
        text.nfkc().collect()
    }

    /// Split a free-form submission on commas and whitespace
    fn split_words(&self, text: &str) -> Vec<String> {
        self.process(text)
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
