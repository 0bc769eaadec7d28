//! iCalendar text escaping utilities.

/// Escapes free text for TEXT property values.
///
/// Backslashes are doubled, semicolons become commas, carriage returns are
/// dropped and line feeds become spaces. The single pass never revisits
/// output, so a substitution is never escaped twice.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 10);
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            ';' => result.push(','),
            '\r' => {}
            '\n' => result.push(' '),
            _ => result.push(c),
        }
    }
    result
}

/// Escapes a parameter value if needed.
///
/// Returns the value quoted if it contains special characters.
#[must_use]
pub fn escape_param_value(s: &str) -> String {
    if needs_quoting(s) {
        // Use caret encoding for special chars inside quotes (RFC 6868)
        let mut result = String::with_capacity(s.len() + 10);
        result.push('"');
        for c in s.chars() {
            match c {
                '^' => result.push_str("^^"),
                '\n' => result.push_str("^n"),
                '"' => result.push_str("^'"),
                '\r' => {}
                _ => result.push(c),
            }
        }
        result.push('"');
        result
    } else {
        s.to_string()
    }
}

/// Checks if a parameter value needs quoting.
fn needs_quoting(s: &str) -> bool {
    s.chars()
        .any(|c| matches!(c, ':' | ';' | ',' | '"' | '\n' | '\r'))
}
