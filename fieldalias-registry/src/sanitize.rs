//! Normalization rules shared by registry operations.
//!
//! Two flavors: `normalize_key` for field and alias names (restricted charset,
//! an empty result means the input is treated as missing), and `sanitize_text`
//! for stored values (plain text only, no length limit).

/// Normalize a field or alias name to the key charset.
///
/// Lowercases, then strips every character outside `[a-z0-9_]`. Callers treat
/// an empty result as missing input and skip the operation.
pub fn normalize_key(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect()
}

/// Sanitize a raw value to plain text.
///
/// Strips `<...>` tag spans, flattens control characters to spaces, collapses
/// whitespace runs, and trims.
pub fn sanitize_text(input: &str) -> String {
    let mut flat = String::with_capacity(input.len());
    let mut in_tag = false;
    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            c if c.is_control() => flat.push(' '),
            c => flat.push(c),
        }
    }
    flat.split_whitespace().collect::<Vec<_>>().join(" ")
}
