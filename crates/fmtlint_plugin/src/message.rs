//! Message templates.

/// Replaces `{{ key }}` placeholders in `template` with values from `data`.
///
/// Whitespace inside the braces is ignored. Placeholders without a matching
/// key are left untouched.
pub fn interpolate(template: &str, data: &[(String, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];

        let Some(close) = after_open.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };

        let key = after_open[..close].trim();
        match data.iter().find(|(k, _)| k == key) {
            Some((_, value)) if !key.is_empty() => out.push_str(value),
            _ => out.push_str(&rest[open..open + 2 + close + 2]),
        }
        rest = &after_open[close + 2..];
    }

    out.push_str(rest);
    out
}

/// Makes whitespace visible so that messages about it stay readable.
///
/// Space becomes `·`, newline `⏎`, tab `↹` and carriage return `␍`.
pub fn show_invisibles(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            ' ' => '·',
            '\n' => '⏎',
            '\t' => '↹',
            '\r' => '␍',
            other => other,
        })
        .collect()
}
