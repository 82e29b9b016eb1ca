use strsim::levenshtein;

/// Candidate indices ordered by ascending Levenshtein distance to `target`.
/// Equal distances keep their original relative order. Case and whitespace
/// count toward the distance.
pub fn rank<S: AsRef<str>>(candidates: &[S], target: &str) -> Vec<usize> {
    let mut scored: Vec<(usize, usize)> = candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| (levenshtein(candidate.as_ref(), target), index))
        .collect();
    scored.sort_by_key(|&(distance, _)| distance);
    scored.into_iter().map(|(_, index)| index).collect()
}

/// Index of the closest candidate, `None` for an empty list.
pub fn best_match<S: AsRef<str>>(candidates: &[S], target: &str) -> Option<usize> {
    rank(candidates, target).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn exact_match_wins() {
        let candidates = ["Who Made Who (Live)", "Who Made Who", "Back in Black"];
        assert_eq!(best_match(&candidates, "Who Made Who"), Some(1));
    }

    #[test]
    fn ties_keep_response_order() {
        let candidates = ["abx", "aby", "abc", "abz"];
        assert_eq!(rank(&candidates, "abc"), vec![2, 0, 1, 3]);
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let candidates = ["IN RAINBOWS", "In Rainbowz"];
        assert_eq!(best_match(&candidates, "In Rainbows"), Some(1));
    }

    #[test]
    fn empty_candidates_have_no_match() {
        let candidates: [&str; 0] = [];
        assert_eq!(best_match(&candidates, "anything"), None);
        assert!(rank(&candidates, "anything").is_empty());
    }

    proptest! {
        #[test]
        fn best_is_never_farther_than_any_other(
            candidates in prop::collection::vec("[a-c ]{0,6}", 1..8),
            target in "[a-c ]{0,6}",
        ) {
            let best = best_match(&candidates, &target).unwrap();
            let best_distance = levenshtein(&candidates[best], &target);
            for candidate in &candidates {
                prop_assert!(best_distance <= levenshtein(candidate, &target));
            }
        }

        #[test]
        fn rank_is_a_stable_permutation(
            candidates in prop::collection::vec("[ab]{0,4}", 0..10),
            target in "[ab]{0,4}",
        ) {
            let order = rank(&candidates, &target);
            prop_assert_eq!(order.len(), candidates.len());
            for pair in order.windows(2) {
                let left = levenshtein(&candidates[pair[0]], &target);
                let right = levenshtein(&candidates[pair[1]], &target);
                prop_assert!(left <= right);
                if left == right {
                    prop_assert!(pair[0] < pair[1]);
                }
            }
        }
    }
}
