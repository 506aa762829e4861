/// Closed set of fruit names matched against classifier labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FruitVocabulary {
    terms: Vec<String>,
}

const DEFAULT_FRUITS: [&str; 22] = [
    "apple",
    "banana",
    "orange",
    "strawberry",
    "grape",
    "pineapple",
    "blueberry",
    "raspberry",
    "peach",
    "pear",
    "plum",
    "cherry",
    "kiwi",
    "mango",
    "lemon",
    "lime",
    "watermelon",
    "cantaloupe",
    "honeydew",
    "coconut",
    "avocado",
    "pomegranate",
];

impl FruitVocabulary {
    /// Terms are trimmed and lowercased; blanks and duplicates are dropped.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for term in terms {
            let term = term.as_ref().trim().to_lowercase();
            if !term.is_empty() && !normalized.contains(&term) {
                normalized.push(term);
            }
        }
        Self { terms: normalized }
    }

    #[cfg(test)]
    pub fn contains(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t == term)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Default for FruitVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_FRUITS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary() {
        let vocabulary = FruitVocabulary::default();
        assert_eq!(vocabulary.len(), 22);
        assert!(vocabulary.contains("pomegranate"));
        assert!(!vocabulary.contains("tomato"));
    }

    #[test]
    fn test_terms_are_normalized() {
        let vocabulary = FruitVocabulary::new([" Apple ", "apple", "", "FIG"]);
        assert_eq!(vocabulary.iter().collect::<Vec<_>>(), vec!["apple", "fig"]);
    }
}
