use std::path::Path;

/// One label per line. A leading WordNet synset id (`n01440764 `) is dropped.
pub fn parse_labels(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| strip_synset_id(line).to_string())
        .collect()
}

pub fn load_labels(path: &Path) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read labels {}: {}", path.display(), e))?;
    let labels = parse_labels(&text);
    if labels.is_empty() {
        return Err(format!("labels file {} is empty", path.display()).into());
    }
    Ok(labels)
}

fn strip_synset_id(line: &str) -> &str {
    match line.split_once(' ') {
        Some((id, rest))
            if id.len() == 9
                && id.starts_with('n')
                && id[1..].chars().all(|c| c.is_ascii_digit()) =>
        {
            rest.trim_start()
        }
        _ => line,
    }
}
