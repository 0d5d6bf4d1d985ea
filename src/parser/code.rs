const FENCE: &str = "```";

/// Pull a code body out of an oracle response.
///
/// Preference order: a fence tagged with `language`, then any fence, then the
/// whole response trimmed. The result may be syntactically invalid; running it
/// is what validates it.
pub fn extract_code(response: &str, language: &str) -> String {
    let tagged = format!("{}{}", FENCE, language);
    if let Some(body) = tagged_block(response, &tagged) {
        return body;
    }
    if let Some(body) = any_block(response) {
        return body;
    }
    response.trim().to_string()
}

fn tagged_block(response: &str, opener: &str) -> Option<String> {
    for (pos, _) in response.match_indices(opener) {
        let rest = &response[pos + opener.len()..];
        // The tag must end its line: "```solidityx" and "```solidity-0.8" are other tags.
        let (tag_rest, body) = rest.split_once('\n').unwrap_or((rest, ""));
        if !tag_rest.trim().is_empty() {
            continue;
        }
        if let Some(end) = body.find(FENCE) {
            return Some(body[..end].trim().to_string());
        }
    }
    None
}

fn any_block(response: &str) -> Option<String> {
    let start = response.find(FENCE)? + FENCE.len();
    let rest = &response[start..];
    let end = rest.find(FENCE)?;
    let inner = &rest[..end];

    // Drop an info string on the opening line ("```sol", "```js").
    let inner = match inner.split_once('\n') {
        Some((info, body)) if is_info_string(info) => body,
        _ => inner,
    };
    Some(inner.trim().to_string())
}

fn is_info_string(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && !line.contains(char::is_whitespace) && line.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '+' || c == '.')
}
