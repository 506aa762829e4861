use crate::image_classifier::interface::Classification;
use crate::prediction_filter::display_name::display_name;
use crate::prediction_filter::vocabulary::FruitVocabulary;

#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub display_name: String,
    pub confidence_percent: f64,
    pub matched_term: String,
}

/// A raw prediction shown when nothing in the vocabulary matched.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCandidate {
    pub display_name: String,
    pub confidence_percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Ranking {
    Fruits(Vec<RankedEntry>),
    NoMatch(Vec<RawCandidate>),
}

/// `term` appears in `label` as a whole word: the label is the term, or the
/// term is followed by a space or comma, or preceded by a space.
pub fn is_boundary_match(label: &str, term: &str) -> bool {
    label == term
        || label.contains(&format!("{} ", term))
        || label.contains(&format!(" {}", term))
        || label.contains(&format!("{},", term))
}

/// Longest vocabulary term matching the already lowercased label.
pub fn best_match<'a>(label: &str, vocabulary: &'a FruitVocabulary) -> Option<&'a str> {
    vocabulary
        .iter()
        .filter(|term| is_boundary_match(label, term))
        .fold(None, |best: Option<&str>, term| match best {
            Some(current) if current.len() >= term.len() => Some(current),
            _ => Some(term),
        })
}

/// Shown for a guess whose label has no text.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// `probability × 100`, rounded to one decimal place.
pub fn confidence_percent(probability: f32) -> f64 {
    (f64::from(probability) * 1000.0).round() / 10.0
}

fn is_well_formed(prediction: &Classification) -> bool {
    !prediction.label.trim().is_empty()
        && prediction.probability.is_finite()
        && (0.0..=1.0).contains(&prediction.probability)
}

/// Keeps fruit labels in classifier order, up to `limit`. Without a single
/// fruit, returns the `limit` most probable raw predictions instead.
pub fn rank(predictions: &[Classification], vocabulary: &FruitVocabulary, limit: usize) -> Ranking {
    let fruits: Vec<RankedEntry> = predictions
        .iter()
        .filter(|prediction| is_well_formed(prediction))
        .filter_map(|prediction| {
            let label = prediction.label.to_lowercase();
            best_match(&label, vocabulary).map(|term| RankedEntry {
                display_name: display_name(&prediction.label),
                confidence_percent: confidence_percent(prediction.probability),
                matched_term: term.to_string(),
            })
        })
        .take(limit)
        .collect();

    if !fruits.is_empty() {
        return Ranking::Fruits(fruits);
    }

    // Malformed entries still count as guesses, after every well-formed one.
    let mut candidates: Vec<&Classification> = predictions.iter().collect();
    candidates.sort_by(|a, b| {
        is_well_formed(b)
            .cmp(&is_well_formed(a))
            .then_with(|| shown_probability(b).total_cmp(&shown_probability(a)))
    });

    Ranking::NoMatch(
        candidates
            .into_iter()
            .take(limit)
            .map(|prediction| RawCandidate {
                display_name: raw_display_name(&prediction.label),
                confidence_percent: confidence_percent(shown_probability(prediction)),
            })
            .collect(),
    )
}

/// Probability clamped into [0, 1]; non-finite values show as 0.
fn shown_probability(prediction: &Classification) -> f32 {
    if prediction.probability.is_finite() {
        prediction.probability.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn raw_display_name(label: &str) -> String {
    let name = display_name(label);
    if name.is_empty() {
        UNKNOWN_LABEL.to_string()
    } else {
        name
    }
}
