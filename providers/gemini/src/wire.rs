//! Request bodies and response shapes of the `generateContent` endpoint

use bee_assistant::{AssistantError, Explanation, InlineFile};
use bee_types::WordInfo;
use serde::Deserialize;
use serde_json::{Value, json};

const EXTRACT_INSTRUCTION: &str = "Extract all English spelling words from this document. \
     Return them as a clean JSON array of strings, all in lowercase.";

fn explain_prompt(word: &str) -> String {
    format!(
        "Task: Explain the word \"{word}\" for a young student.\n\
         \n\
         CRITICAL INSTRUCTIONS:\n\
         1. ABSOLUTELY NO AUTOCORRECTION. Explain exactly the word given.\n\
         2. If the input is NOT a meaningful English word, set the field \"notFound\" to true.\n\
         3. Provide:\n\
         \x20  - A simple English definition.\n\
         \x20  - A Traditional Chinese (繁體中文) explanation.\n\
         \x20  - An encouraging example sentence using the word."
    )
}

pub fn explain_request(word: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": explain_prompt(word) }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "word": { "type": "STRING" },
                    "definition": { "type": "STRING" },
                    "chineseTranslation": { "type": "STRING" },
                    "exampleSentence": { "type": "STRING" },
                    "notFound": {
                        "type": "BOOLEAN",
                        "description": "True if the word is nonsense/not real"
                    }
                },
                "required": ["word", "definition", "chineseTranslation", "exampleSentence"]
            }
        }
    })
}

pub fn extract_request(file: &InlineFile) -> Value {
    json!({
        "contents": [{
            "parts": [
                { "inlineData": { "mimeType": file.mime_type, "data": file.data } },
                { "text": EXTRACT_INSTRUCTION }
            ]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        }
    })
}

pub fn speech_request(word: &str, voice: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": format!("Say clearly: {word}") }] }],
        "generationConfig": {
            "responseModalities": ["AUDIO"],
            "speechConfig": {
                "voiceConfig": {
                    "prebuiltVoiceConfig": { "voiceName": voice }
                }
            }
        }
    })
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

#[derive(Debug, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub text: Option<String>,
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: Option<String>,
    pub data: String,
}

impl GenerateContentResponse {
    fn parts(&self) -> impl Iterator<Item = &Part> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .into_iter()
            .flat_map(|content| content.parts.iter())
    }

    /// Concatenated text parts of the first candidate
    pub fn text(&self) -> Option<String> {
        let text: String = self.parts().filter_map(|p| p.text.as_deref()).collect();
        (!text.trim().is_empty()).then_some(text)
    }

    /// First inline binary part of the first candidate
    pub fn inline_data(&self) -> Option<&InlineData> {
        self.parts().find_map(|p| p.inline_data.as_ref())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExplanationPayload {
    definition: Option<String>,
    chinese_translation: Option<String>,
    example_sentence: Option<String>,
    #[serde(default)]
    not_found: bool,
}

/// Turn the JSON text of an explanation into an [`Explanation`] for `word`
pub fn parse_explanation(word: &str, text: &str) -> Result<Explanation, AssistantError> {
    let payload: ExplanationPayload = serde_json::from_str(text)?;

    if payload.not_found {
        return Ok(Explanation::NotFound);
    }

    match (
        payload.definition,
        payload.chinese_translation,
        payload.example_sentence,
    ) {
        (Some(definition), Some(chinese_translation), Some(example_sentence)) => {
            Ok(Explanation::Found(WordInfo {
                word: word.to_string(),
                definition,
                chinese_translation,
                example_sentence,
            }))
        }
        _ => Err(AssistantError::MalformedResponse(
            "explanation is missing required fields".to_string(),
        )),
    }
}

/// Parse an extraction reply, anything but an array of strings is malformed
pub fn parse_word_list(text: &str) -> Result<Vec<String>, AssistantError> {
    let value: Value = serde_json::from_str(text.trim())?;
    let Value::Array(items) = value else {
        return Err(AssistantError::MalformedResponse(
            "expected a JSON array of words".to_string(),
        ));
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(word) => Some(word),
            _ => None,
        })
        .collect())
}

/// Sample rate announced in a MIME type like `audio/L16;codec=pcm;rate=24000`
pub fn sample_rate_from_mime(mime: &str) -> Option<u32> {
    mime.split(';')
        .filter_map(|param| param.trim().strip_prefix("rate="))
        .find_map(|rate| rate.parse().ok())
}
