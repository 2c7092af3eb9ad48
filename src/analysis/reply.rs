use serde_json::Value;

/// What came back from the model, before it reaches the HTTP layer.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// The reply was strict JSON once fences were removed.
    Parsed(Value),
    /// The reply could not be parsed; carries the fence-stripped text.
    Unparsed { raw_response: String },
}

impl AnalysisOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisOutcome::Parsed(_) => "parsed",
            AnalysisOutcome::Unparsed { .. } => "unparsed",
        }
    }
}

/// Removes every ```` ``` ```` marker, an optional `json` language tag and the
/// newline right after it, then trims the result.
pub fn strip_code_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(idx) = rest.find("```") {
        out.push_str(&rest[..idx]);
        rest = &rest[idx + 3..];
        rest = rest.strip_prefix("json").unwrap_or(rest);
        rest = rest.strip_prefix('\n').unwrap_or(rest);
    }
    out.push_str(rest);

    out.trim().to_string()
}

pub fn parse_reply(text: &str) -> AnalysisOutcome {
    let cleaned = strip_code_fences(text);
    match serde_json::from_str::<Value>(&cleaned) {
        Ok(value) => AnalysisOutcome::Parsed(value),
        Err(_) => AnalysisOutcome::Unparsed {
            raw_response: cleaned,
        },
    }
}
