//! String helpers.

/// Capitalize the first character of every whitespace-delimited word.
///
/// The rest of each word is left untouched, so `"NCIS los angeles"` becomes
/// `"NCIS Los Angeles"`. Runs of whitespace collapse to a single space.
pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Final segment of a path-like string, accepting both `/` and `\` separators.
pub fn base_name(input: &str) -> &str {
    input.rsplit(['/', '\\']).next().unwrap_or(input)
}
