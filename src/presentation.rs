use crate::classifier_lifecycle::interface::LifecycleStatus;
use crate::prediction_filter::rank::Ranking;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayKind {
    Fruit,
    NoFruit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem {
    pub text: String,
    pub confidence_percent: f64,
    /// 0 to 100, drives the confidence bar.
    pub magnitude: u8,
    /// Vocabulary term a fruit item matched.
    pub fruit: Option<String>,
}

impl DisplayItem {
    fn new(text: &str, confidence_percent: f64) -> Self {
        Self {
            text: text.to_string(),
            confidence_percent,
            magnitude: confidence_percent.round().clamp(0.0, 100.0) as u8,
            fruit: None,
        }
    }

    fn with_fruit(mut self, fruit: &str) -> Self {
        self.fruit = Some(fruit.to_string());
        self
    }

    /// The name, followed by the matched fruit when the name does not
    /// already say it: "Granny Smith (apple)".
    pub fn title(&self) -> String {
        match &self.fruit {
            Some(fruit) if !self.text.to_lowercase().contains(fruit.as_str()) => {
                format!("{} ({})", self.text, fruit)
            }
            _ => self.text.clone(),
        }
    }

    pub fn confidence_text(&self) -> String {
        format!("{:.1}%", self.confidence_percent)
    }

    pub fn line(&self) -> String {
        format!("{} — {}", self.title(), self.confidence_text())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayList {
    pub kind: DisplayKind,
    pub items: Vec<DisplayItem>,
}

impl DisplayList {
    pub fn headline(&self) -> &'static str {
        match self.kind {
            DisplayKind::Fruit => "I think this is a:",
            DisplayKind::NoFruit => "No fruits detected. Try a clearer image. Top guesses:",
        }
    }
}

pub fn format_ranking(ranking: &Ranking) -> DisplayList {
    match ranking {
        Ranking::Fruits(entries) => DisplayList {
            kind: DisplayKind::Fruit,
            items: entries
                .iter()
                .map(|entry| {
                    DisplayItem::new(&entry.display_name, entry.confidence_percent)
                        .with_fruit(&entry.matched_term)
                })
                .collect(),
        },
        Ranking::NoMatch(candidates) => DisplayList {
            kind: DisplayKind::NoFruit,
            items: candidates
                .iter()
                .map(|candidate| {
                    DisplayItem::new(&candidate.display_name, candidate.confidence_percent)
                })
                .collect(),
        },
    }
}

pub fn status_text(status: &LifecycleStatus) -> &'static str {
    match status {
        LifecycleStatus::Uninitialized => "Model not loaded",
        LifecycleStatus::Initializing => "Loading model...",
        LifecycleStatus::Ready => "Model loaded successfully!",
        LifecycleStatus::Degraded => "Model loaded (fallback configuration)",
        LifecycleStatus::Failed(_) => "Error loading model. Please restart the app.",
    }
}
