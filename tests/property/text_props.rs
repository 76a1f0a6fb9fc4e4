//! Properties of the text-processing primitives.

use agora_search::{edit_distance_within, join_tokens, normalize, tokenize};
use proptest::prelude::*;

proptest! {
    #[test]
    fn normalize_is_idempotent(input in "\\PC{0,80}") {
        let once = normalize(&input);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_output_is_lowercase(input in "\\PC{0,80}") {
        let normalized = normalize(&input);
        prop_assert_eq!(normalized.to_lowercase(), normalized);
    }

    #[test]
    fn tokenize_never_panics_and_spans_are_ordered(input in "\\PC{0,120}") {
        let tokens = tokenize(&input);
        for pair in tokens.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
        for token in &tokens {
            prop_assert!(token.start < token.end);
            prop_assert!(token.end <= input.len());
            prop_assert!(!token.text.is_empty());
        }
    }

    #[test]
    fn tokenize_is_deterministic(input in "\\PC{0,120}") {
        prop_assert_eq!(tokenize(&input), tokenize(&input));
    }

    #[test]
    fn joined_tokens_retokenize_to_same_terms(input in "[a-zA-Z ]{0,80}") {
        let tokens = tokenize(&input);
        let joined = join_tokens(&tokens);
        let texts: Vec<String> = tokenize(&joined).into_iter().map(|t| t.text).collect();
        let original: Vec<String> = tokens.into_iter().map(|t| t.text).collect();
        prop_assert_eq!(texts, original);
    }

    #[test]
    fn edit_distance_is_symmetric(a in "[a-z]{0,10}", b in "[a-z]{0,10}", max in 0usize..5) {
        prop_assert_eq!(
            edit_distance_within(&a, &b, max),
            edit_distance_within(&b, &a, max)
        );
    }

    #[test]
    fn edit_distance_zero_iff_equal(a in "[a-z]{0,10}", b in "[a-z]{0,10}") {
        let distance = edit_distance_within(&a, &b, 10);
        prop_assert_eq!(distance == Some(0), a == b);
    }

    #[test]
    fn edit_distance_bounded_by_max(a in "[a-z]{0,10}", b in "[a-z]{0,10}", max in 0usize..4) {
        if let Some(d) = edit_distance_within(&a, &b, max) {
            prop_assert!(d <= max);
        }
    }
}
