//! Salvage parsing for model output.
//!
//! The chat models are instructed to return bare JSON, but in practice
//! sometimes wrap it in ```json fences or lead with commentary. Parsing
//! proceeds from strict to permissive and only then gives up.

use serde_json::Value;

use crate::error::{AiError, AiResult};

/// Extract a JSON value from raw model output.
pub fn extract_json(content: &str) -> AiResult<Value> {
    let trimmed = content.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Ok(value);
    }

    // Drop markdown fences and retry
    let unfenced = trimmed.replace("```json", "").replace("```", "");
    if let Ok(value) = serde_json::from_str::<Value>(unfenced.trim()) {
        return Ok(value);
    }

    // Last resort: take the outermost bracketed region
    if let Some(candidate) = outermost_json_region(trimmed) {
        if let Ok(value) = serde_json::from_str::<Value>(candidate) {
            return Ok(value);
        }
    }

    let preview: String = trimmed.chars().take(200).collect();
    Err(AiError::MalformedJson(preview))
}

/// Slice from the first `[`/`{` to the matching last `]`/`}`, if any.
fn outermost_json_region(content: &str) -> Option<&str> {
    let open = content.find(['[', '{'])?;
    let close_char = if content.as_bytes()[open] == b'[' { ']' } else { '}' };
    let close = content.rfind(close_char)?;
    if close <= open {
        return None;
    }
    Some(&content[open..=close])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_json() {
        let value = extract_json(r#"{"a": 1}"#).unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn strips_markdown_fences() {
        let value = extract_json("```json\n{\"a\": [1, 2]}\n```").unwrap();
        assert_eq!(value["a"][1], 2);
    }

    #[test]
    fn recovers_array_from_surrounding_prose() {
        let content = "Here is the roadmap you asked for:\n[{\"day\": 1}]\nLet me know!";
        let value = extract_json(content).unwrap();
        assert_eq!(value[0]["day"], 1);
    }

    #[test]
    fn rejects_output_without_json() {
        let err = extract_json("I could not process the transcript.").unwrap_err();
        assert!(matches!(err, AiError::MalformedJson(_)));
    }
}
