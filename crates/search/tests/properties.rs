//! Property tests for the matching engine.

use pharmafinder_search::{
    filter_and_sort_by_relevance, fuzzy_search, levenshtein_distance, match_score, normalize,
    rank_by_relevance, similarity, suggest, SpellingSuggester,
};
use proptest::prelude::*;

/// Latin text with accents, digits, punctuation and spaces.
fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 àâäéèêëîïôöùûüçÀÉÈÇ.,;:!?'-]{0,24}"
}

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,10}"
}

fn by_self(s: &String) -> Vec<String> {
    vec![s.clone()]
}

proptest! {
    #[test]
    fn distance_to_self_is_zero(s in text()) {
        prop_assert_eq!(levenshtein_distance(&s, &s), 0);
    }

    #[test]
    fn distance_is_symmetric(a in text(), b in text()) {
        prop_assert_eq!(levenshtein_distance(&a, &b), levenshtein_distance(&b, &a));
    }

    #[test]
    fn distance_satisfies_triangle_inequality(a in word(), b in word(), c in word()) {
        let ab = levenshtein_distance(&a, &b);
        let bc = levenshtein_distance(&b, &c);
        let ac = levenshtein_distance(&a, &c);
        prop_assert!(ac <= ab + bc);
    }

    #[test]
    fn distance_bounded_by_longer_length(a in text(), b in text()) {
        let longest = a.chars().count().max(b.chars().count());
        prop_assert!(levenshtein_distance(&a, &b) <= longest);
    }

    #[test]
    fn similarity_in_unit_range(a in text(), b in text()) {
        let score = similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score));
        prop_assert_eq!(similarity(&a, &a), 1.0);
    }

    #[test]
    fn normalize_is_idempotent(s in text()) {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn contained_query_scores_one(prefix in text(), query in word(), suffix in text()) {
        let field = format!("{prefix}{query}{suffix}");
        let items = vec![field];
        let hits = fuzzy_search(&items, &query, by_self, 0.6);
        prop_assume!(normalize(&items[0]).contains(&normalize(&query)));
        prop_assert_eq!(hits.len(), 1);
        prop_assert_eq!(hits[0].score, 1.0);
    }

    #[test]
    fn empty_query_returns_all_in_order(items in prop::collection::vec(text(), 0..10)) {
        let hits = fuzzy_search(&items, "", by_self, 0.6);
        prop_assert_eq!(hits.len(), items.len());
        for (hit, item) in hits.iter().zip(items.iter()) {
            prop_assert_eq!(hit.item, item);
            prop_assert_eq!(hit.score, 1.0);
        }
    }

    #[test]
    fn threshold_is_exact(
        items in prop::collection::vec(text(), 0..12),
        query in word(),
        threshold in 0.0f64..=1.0,
    ) {
        let all = fuzzy_search(&items, &query, by_self, 0.0);
        let kept = fuzzy_search(&items, &query, by_self, threshold);

        let expected = all.iter().filter(|h| h.score >= threshold).count();
        prop_assert_eq!(kept.len(), expected);
        prop_assert!(kept.iter().all(|h| h.score >= threshold));
    }

    #[test]
    fn fuzzy_sort_is_descending_and_stable(
        items in prop::collection::vec(text(), 0..12),
        query in word(),
    ) {
        let hits = fuzzy_search(&items, &query, by_self, 0.0);
        for pair in hits.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                let first = items.iter().position(|i| std::ptr::eq(i, pair[0].item));
                let second = items.iter().position(|i| std::ptr::eq(i, pair[1].item));
                prop_assert!(first < second);
            }
        }
    }

    #[test]
    fn exact_text_scores_hundred(s in "[a-zA-Z][a-zA-Z ]{0,20}") {
        prop_assert_eq!(match_score(&s, &s), 100);
        prop_assert_eq!(match_score(&s, &s.to_uppercase()), 100);
    }

    #[test]
    fn relevance_never_returns_zero_scores(
        items in prop::collection::vec(text(), 0..12),
        query in word(),
    ) {
        let hits = rank_by_relevance(&items, &query, by_self);
        prop_assert!(hits.iter().all(|h| h.score > 0));

        let filtered = filter_and_sort_by_relevance(&items, &query, by_self);
        prop_assert_eq!(filtered.len(), hits.len());
    }

    #[test]
    fn suggester_matches_free_function(
        dictionary in prop::collection::vec(word(), 0..12),
        query in word(),
    ) {
        let suggester = SpellingSuggester::new(dictionary.iter().cloned());
        prop_assert_eq!(suggester.suggest(&query, 3), suggest(&query, &dictionary, 3));
    }
}

#[test]
fn storefront_examples() {
    assert_eq!(match_score("Paracetamol", "para"), 90);
    assert_eq!(match_score("Sirop contre la toux", "toux"), 70);
    assert_eq!(
        suggest("doliprane", &["doliprane", "dolipranne", "paracetamol"], 3),
        vec!["doliprane", "dolipranne"]
    );
}
