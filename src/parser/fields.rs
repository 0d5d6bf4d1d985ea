use std::collections::HashMap;

/// Field values keyed by label, every known label always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledFields {
    values: HashMap<&'static str, String>,
}

impl LabeledFields {
    /// Value for `label`. Unknown labels yield an empty string.
    pub fn get(&self, label: &str) -> &str {
        self.values.get(label).map(String::as_str).unwrap_or("")
    }

    /// Remove and return the value for `label`.
    pub fn take(&mut self, label: &str) -> String {
        self.values.remove(label).unwrap_or_default()
    }
}

/// Scan `response` line by line for `label: value` assignments.
///
/// A line counts only when, after trimming, it starts with a known label
/// immediately followed by `:`. A non-empty trimmed remainder replaces the
/// default; an empty one leaves the default in place. Later assignments win.
pub fn parse_labeled_fields(response: &str, defaults: &[(&'static str, &str)]) -> LabeledFields {
    let mut values: HashMap<&'static str, String> = defaults
        .iter()
        .map(|(label, default)| (*label, default.to_string()))
        .collect();

    for line in response.lines() {
        let line = line.trim();
        for (label, _) in defaults {
            let Some(rest) = line.strip_prefix(label).and_then(|r| r.strip_prefix(':')) else {
                continue;
            };
            let content = rest.trim();
            if !content.is_empty() {
                values.insert(*label, content.to_string());
            }
            break;
        }
    }

    LabeledFields { values }
}
