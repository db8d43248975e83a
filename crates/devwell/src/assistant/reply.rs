use serde::de::DeserializeOwned;

/// Model output that could not be read as the expected JSON shape.
#[derive(Debug, thiserror::Error)]
#[error("failed to parse model reply as JSON: {source}")]
pub struct ReplyError {
    #[from]
    source: serde_json::Error,
}

/// Pull the JSON document out of a reply that may be fenced in markdown or wrapped in
/// prose. Falls back to the trimmed reply when no delimiters are found.
pub fn extract_json(reply: &str) -> &str {
    let trimmed = reply.trim();

    if let Some(fenced) = fenced_block(trimmed) {
        return fenced;
    }

    let object = trimmed.find('{').zip(trimmed.rfind('}'));
    let array = trimmed.find('[').zip(trimmed.rfind(']'));
    let span = match (object, array) {
        (Some(object), Some(array)) => Some(if array.0 < object.0 { array } else { object }),
        (object, array) => object.or(array),
    };

    match span {
        Some((start, end)) if end > start => &trimmed[start..=end],
        _ => trimmed,
    }
}

fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")? + 3;
    let after_fence = &text[start..];
    // Skip the info string ("json", "JSON", ...) up to the end of the line.
    let body_start = after_fence.find('\n').map(|index| index + 1).unwrap_or(0);
    let body = &after_fence[body_start..];
    let end = body.find("```")?;
    Some(body[..end].trim())
}

pub fn parse_reply<T: DeserializeOwned>(reply: &str) -> Result<T, ReplyError> {
    Ok(serde_json::from_str(extract_json(reply))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn plain_json_passes_through() {
        assert_eq!(extract_json(" {\"a\": 1} "), "{\"a\": 1}");
    }

    #[test]
    fn fenced_json_is_unwrapped() {
        let reply = "Here you go:\n```json\n{\"immediateActions\": []}\n```\nStay well!";
        assert_eq!(extract_json(reply), "{\"immediateActions\": []}");
    }

    #[test]
    fn prose_around_an_array_is_dropped() {
        let reply = "Recommendations: [\"Stretch\", \"Hydrate\"] - enjoy";
        let parsed: Vec<String> = parse_reply(reply).expect("array parses");
        assert_eq!(parsed, vec!["Stretch", "Hydrate"]);
    }

    #[test]
    fn array_of_objects_keeps_the_outer_array() {
        let parsed: Value = parse_reply("[{\"x\": 1}, {\"x\": 2}]").expect("parses");
        assert_eq!(parsed, json!([{ "x": 1 }, { "x": 2 }]));
    }

    #[test]
    fn free_text_is_a_reply_error() {
        let err = parse_reply::<Value>("I cannot help with that.").expect_err("no json");
        assert!(err.to_string().starts_with("failed to parse model reply"));
    }
}
