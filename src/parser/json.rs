use serde_json::Value;
use crate::errors::GorillaError;

/// Find a JSON document in free text: the whole text, then a ```json fence,
/// then the outermost `{ ... }` span.
pub fn extract_json(text: &str) -> Result<Value, GorillaError> {
    let trimmed = text.trim();
    if let Ok(v) = serde_json::from_str::<Value>(trimmed) {
        return Ok(v);
    }
    if let Some(start) = trimmed.find("```json") {
        let rest = &trimmed[start + 7..];
        if let Some(end) = rest.find("```") {
            let json_str = rest[..end].trim();
            return serde_json::from_str(json_str)
                .map_err(|e| GorillaError::LLMApi(format!("Invalid JSON in code block: {}", e)));
        }
    }
    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            let json_str = &trimmed[start..=end];
            return serde_json::from_str(json_str)
                .map_err(|e| GorillaError::LLMApi(format!("Invalid JSON extraction: {}", e)));
        }
    }
    Err(GorillaError::LLMApi("No valid JSON found in LLM response".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_json() {
        let v = extract_json(r#"{"invariants": []}"#).unwrap();
        assert!(v["invariants"].is_array());
    }

    #[test]
    fn test_fenced_json() {
        let v = extract_json("Here:\n```json\n{\"a\": 1}\n```\n").unwrap();
        assert_eq!(v["a"], 1);
    }

    #[test]
    fn test_embedded_braces() {
        let v = extract_json("The spec is {\"a\": {\"b\": 2}} as requested.").unwrap();
        assert_eq!(v["a"]["b"], 2);
    }

    #[test]
    fn test_no_json() {
        assert!(extract_json("no structure at all").is_err());
        assert!(extract_json("{ broken").is_err());
    }
}
