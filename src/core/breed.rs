use regex::Regex;
use std::sync::LazyLock;

/// Characters the registry uses to join breed names ("Lab / Husky", "Shepherd (German)")
static BREED_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[/,&()\-]").expect("valid breed punctuation pattern"));

/// Words that carry no breed information
static BREED_STOPWORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:mix|mixed|dog)\b").expect("valid breed stopword pattern"));

/// Shortest token allowed to take part in a match
pub const MIN_TOKEN_LEN: usize = 3;

/// Normalize free-text breed names for comparison
///
/// Lowercases, turns `/ , & ( ) -` into spaces, drops the words "mix",
/// "mixed" and "dog", then collapses whitespace. Idempotent.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let spaced = BREED_PUNCTUATION.replace_all(&lowered, " ");
    let stripped = BREED_STOPWORDS.replace_all(&spaced, " ");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keyword set for a breed selector
///
/// Tokens under three characters are discarded so short words never
/// produce over-broad matches.
pub fn tokens_for(selector: &str) -> Vec<String> {
    normalize(selector)
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

/// Check a candidate breed string against a set of selected breeds
///
/// Selectors are OR-ed. Callers handle the "no breed filter" case; with an
/// empty selector list nothing matches.
#[inline]
pub fn matches(candidate_breed: &str, selected_breeds: &[String]) -> bool {
    BreedFilter::new(selected_breeds).accepts(candidate_breed)
}

/// Precomputed token sets for a list of selected breeds
#[derive(Debug, Clone, Default)]
pub struct BreedFilter {
    selectors: Vec<Vec<String>>,
}

impl BreedFilter {
    pub fn new<S: AsRef<str>>(selected_breeds: &[S]) -> Self {
        Self {
            selectors: selected_breeds
                .iter()
                .map(|s| tokens_for(s.as_ref()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// True iff the normalized candidate is non-empty and contains a token
    /// from at least one selector
    pub fn accepts(&self, candidate_breed: &str) -> bool {
        let candidate = normalize(candidate_breed);
        if candidate.is_empty() {
            return false;
        }

        self.selectors
            .iter()
            .any(|tokens| tokens.iter().any(|token| candidate.contains(token.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breeds(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_strips_stopwords_and_punctuation() {
        assert_eq!(normalize("German Shepherd Dog"), "german shepherd");
        assert_eq!(normalize("Labrador Retriever Mix"), "labrador retriever");
        assert_eq!(normalize("Lab/Husky (Mixed)"), "lab husky");
        assert_eq!(normalize("Terrier, Pit Bull & Boxer-mix"), "terrier pit bull boxer");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_normalize_keeps_words_containing_stopwords() {
        assert_eq!(normalize("Dogue de Bordeaux"), "dogue de bordeaux");
        assert_eq!(normalize("Mixer"), "mixer");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in [
            "German Shepherd / Husky Mix",
            "  Pit  Bull,Terrier (Mixed) dog ",
            "mix mix dog",
            "Chihuahua-Dachshund",
            "",
        ] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_tokens_drop_short_words() {
        assert_eq!(tokens_for("Dogue de Bordeaux"), vec!["dogue", "bordeaux"]);
        assert_eq!(tokens_for("Shih Tzu"), vec!["shih", "tzu"]);
        assert!(tokens_for("Dog").is_empty());
    }

    #[test]
    fn test_matches_examples() {
        let shepherd = breeds(&["German Shepherd Dog"]);
        assert!(!matches("Labrador Retriever Mix", &shepherd));
        assert!(matches("German Shepherd / Husky Mix", &shepherd));
    }

    #[test]
    fn test_matches_any_selector() {
        let selected = breeds(&["Poodle", "Beagle"]);
        assert!(matches("Beagle Mix", &selected));
        assert!(matches("Standard Poodle", &selected));
        assert!(!matches("Boxer", &selected));
    }

    #[test]
    fn test_blank_candidate_never_matches() {
        let selected = breeds(&["Beagle"]);
        assert!(!matches("", &selected));
        assert!(!matches("  mix ", &selected));
    }

    #[test]
    fn test_empty_selector_list_matches_nothing() {
        assert!(!matches("Beagle", &[]));
        assert!(BreedFilter::new::<String>(&[]).is_empty());
    }
}
