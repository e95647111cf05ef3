use crate::models::{Animal, FavoriteCounts};
use std::cmp::Ordering;

/// Anything that can be ranked by favorite count
pub trait Ranked {
    fn rank_id(&self) -> &str;
}

impl Ranked for Animal {
    fn rank_id(&self) -> &str {
        &self.id
    }
}

impl Ranked for String {
    fn rank_id(&self) -> &str {
        self
    }
}

/// Pick the `limit` least favorited candidates
///
/// Candidates missing from `counts` count as zero, so animals nobody has
/// favorited yet come first. Equal counts are ordered by id ascending so
/// repeated calls on the same inputs return the same list. The input
/// slice is left untouched.
pub fn least_favorited<T: Ranked + Clone>(
    candidates: &[T],
    counts: &FavoriteCounts,
    limit: usize,
) -> Vec<T> {
    let count_of = |candidate: &T| counts.get(candidate.rank_id()).copied().unwrap_or(0);

    let mut ranked: Vec<(u64, &T)> = candidates.iter().map(|c| (count_of(c), c)).collect();
    ranked.sort_by(|(a_count, a), (b_count, b)| compare(*a_count, a.rank_id(), *b_count, b.rank_id()));

    ranked
        .into_iter()
        .take(limit)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}

#[inline]
fn compare(a_count: u64, a_id: &str, b_count: u64, b_id: &str) -> Ordering {
    a_count.cmp(&b_count).then_with(|| a_id.cmp(b_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animals(ids: &[&str]) -> Vec<Animal> {
        ids.iter().map(|id| Animal::with_id(*id)).collect()
    }

    fn counts(pairs: &[(&str, u64)]) -> FavoriteCounts {
        pairs.iter().map(|(id, c)| (id.to_string(), *c)).collect()
    }

    fn ids(animals: &[Animal]) -> Vec<&str> {
        animals.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_absent_counts_as_zero() {
        let candidates = animals(&["a", "b"]);
        let result = least_favorited(&candidates, &counts(&[("a", 5)]), 1);
        assert_eq!(ids(&result), vec!["b"]);
    }

    #[test]
    fn test_sorted_ascending_by_count() {
        let candidates = animals(&["a", "b", "c"]);
        let result = least_favorited(&candidates, &counts(&[("a", 5), ("b", 0), ("c", 2)]), 3);
        assert_eq!(ids(&result), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_ties_broken_by_id() {
        let candidates = animals(&["zeta", "alpha", "mid", "beta"]);
        let result = least_favorited(&candidates, &counts(&[("mid", 1)]), 10);
        assert_eq!(ids(&result), vec!["alpha", "beta", "zeta", "mid"]);
    }

    #[test]
    fn test_length_is_min_of_limit_and_candidates() {
        let candidates = animals(&["a", "b", "c"]);
        assert_eq!(least_favorited(&candidates, &FavoriteCounts::new(), 2).len(), 2);
        assert_eq!(least_favorited(&candidates, &FavoriteCounts::new(), 10).len(), 3);
        assert!(least_favorited(&candidates, &FavoriteCounts::new(), 0).is_empty());
        assert!(least_favorited::<Animal>(&[], &FavoriteCounts::new(), 3).is_empty());
    }

    #[test]
    fn test_input_not_mutated() {
        let candidates = animals(&["c", "b", "a"]);
        let before = candidates.clone();
        let _ = least_favorited(&candidates, &counts(&[("c", 0)]), 3);
        assert_eq!(candidates, before);
    }

    #[test]
    fn test_ranks_bare_ids() {
        let candidates: Vec<String> = vec!["x".into(), "y".into(), "w".into()];
        let result = least_favorited(&candidates, &counts(&[("x", 3), ("y", 1), ("w", 1)]), 2);
        assert_eq!(result, vec!["w".to_string(), "y".to_string()]);
    }
}
