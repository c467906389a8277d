//! Property-based tests using proptest.
//!
//! Randomly generated collections built from a small mixed Hangul/Latin
//! vocabulary, so that queries and documents overlap often.

use patent_rank::{Document, RelevanceScorer, Ranker, Tokenizer};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

fn word_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "전기", "자동차", "전기자동차", "배터리", "냉각", "모듈", "battery", "Cells", "cooling",
        "LiFePO4", "18650", "motor", "a", "1", "-", "x2",
    ])
    .prop_map(str::to_string)
}

fn text_strategy(max_words: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(word_strategy(), 0..max_words).prop_map(|words| words.join(" "))
}

fn document_strategy() -> impl Strategy<Value = Document> {
    (text_strategy(6), text_strategy(12), text_strategy(80)).prop_map(|(title, abs, text)| {
        Document::new(String::new(), title, abs).with_full_text(text)
    })
}

fn corpus_strategy() -> impl Strategy<Value = Vec<Document>> {
    prop::collection::vec(document_strategy(), 0..12).prop_map(|mut docs| {
        for (i, doc) in docs.iter_mut().enumerate() {
            doc.app_no = i.to_string();
        }
        docs
    })
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every token has at least two chars and is already lower-cased.
    #[test]
    fn prop_tokens_well_formed(text in text_strategy(20)) {
        for token in Tokenizer::new().tokenize(&text) {
            prop_assert!(token.chars().count() >= 2);
            prop_assert_eq!(token.to_lowercase(), token);
        }
    }

    /// Similarity stays in 0..=100 with one decimal.
    #[test]
    fn prop_similarity_range(query in text_strategy(5), doc in document_strategy()) {
        let s = RelevanceScorer::new().score(&query, &doc);
        prop_assert!((0.0..=100.0).contains(&s));
        prop_assert!(((s * 10.0).round() - s * 10.0).abs() < 1e-6);
    }

    /// Repeated rankings of the same input are identical.
    #[test]
    fn prop_rank_deterministic(query in text_strategy(4), docs in corpus_strategy(), t in 0.0f64..40.0) {
        let ranker = Ranker::new();
        let first = ranker.rank(&query, &docs, t);
        let second = ranker.rank(&query, &docs, t);
        prop_assert_eq!(first.documents, second.documents);
        prop_assert_eq!(first.stats, second.stats);
    }

    /// Output is sorted, ties keep input order, and the threshold keeps
    /// exactly the documents whose own score reaches it.
    #[test]
    fn prop_sorted_stable_filtered(query in text_strategy(4), docs in corpus_strategy(), t in 0.0f64..40.0) {
        let ranking = Ranker::new().rank(&query, &docs, t);
        let scorer = RelevanceScorer::new();

        for pair in ranking.documents.windows(2) {
            prop_assert!(pair[0].similarity >= pair[1].similarity);
            if pair[0].similarity == pair[1].similarity {
                let a: usize = pair[0].document.app_no.parse().unwrap();
                let b: usize = pair[1].document.app_no.parse().unwrap();
                prop_assert!(a < b);
            }
        }

        let expected = docs.iter().filter(|d| scorer.score(&query, d) >= t).count();
        prop_assert_eq!(ranking.documents.len(), expected);
        prop_assert!(ranking.documents.iter().all(|d| d.similarity >= t));
        prop_assert_eq!(ranking.stats.total_scored, docs.len());
        prop_assert!(ranking.stats.passing <= ranking.stats.total_scored);
    }
}
