/// Turns a raw classifier label into a title: first non-blank
/// comma-separated synonym, lowercased, each word capitalized.
///
/// `display_name("granny smith, apple")` is `"Granny Smith"`.
pub fn display_name(label: &str) -> String {
    let first_synonym = label
        .split(',')
        .find(|synonym| !synonym.trim().is_empty())
        .unwrap_or_default();

    first_synonym
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
