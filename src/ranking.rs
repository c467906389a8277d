use crate::document::{Document, ScoredDocument};
use crate::scorer::RelevanceScorer;
use crate::tokenizer::TokenSet;
use serde::Serialize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Threshold applied when the caller gives none
pub const DEFAULT_MIN_SIMILARITY: f64 = 5.0;

/// Threshold for strict filtering
pub const STRICT_MIN_SIMILARITY: f64 = 20.0;

/// How many top results are written to the debug log
const LOGGED_TOP_RESULTS: usize = 10;

/// Counters observed during one ranking call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RankStats {
    pub total_scored: usize,
    pub nonzero: usize,
    pub passing: usize,
}

/// Filtered, sorted output of one ranking call
#[derive(Debug, Clone, Default)]
pub struct Ranking<'a> {
    pub documents: Vec<ScoredDocument<'a>>,
    pub stats: RankStats,
}

#[derive(Debug, Clone, Default)]
pub struct Ranker {
    scorer: RelevanceScorer,
}

impl Ranker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scorer(&self) -> &RelevanceScorer {
        &self.scorer
    }

    /// Score every document, keeping input order
    fn score_all<'a>(&self, tokens: &TokenSet, documents: &'a [Document]) -> Vec<ScoredDocument<'a>> {
        #[cfg(feature = "parallel")]
        let iter = documents.par_iter();
        #[cfg(not(feature = "parallel"))]
        let iter = documents.iter();

        iter.map(|doc| ScoredDocument::new(doc, self.scorer.score_tokens(tokens, doc)))
            .collect()
    }

    /// Rank `documents` against `query`, dropping those below `min_similarity`
    pub fn rank<'a>(&self, query: &str, documents: &'a [Document], min_similarity: f64) -> Ranking<'a> {
        let min_similarity = if min_similarity.is_nan() {
            0.0
        } else {
            min_similarity.max(0.0)
        };

        let tokens = self.scorer.tokenizer().tokenize(query);
        tracing::debug!(query = %query, tokens = tokens.len(), min_similarity, "ranking documents");

        let mut scored = self.score_all(&tokens, documents);

        // Stable: equal similarities keep collection order
        scored.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));

        let nonzero = scored.iter().filter(|d| d.similarity > 0.0).count();
        let total_scored = scored.len();
        scored.retain(|d| d.similarity >= min_similarity);

        let stats = RankStats {
            total_scored,
            nonzero,
            passing: scored.len(),
        };

        tracing::info!(
            total = stats.total_scored,
            nonzero = stats.nonzero,
            passing = stats.passing,
            min_similarity,
            "ranking complete"
        );
        for hit in scored.iter().take(LOGGED_TOP_RESULTS) {
            let title: String = hit.document.title.chars().take(30).collect();
            tracing::debug!(score = %format!("{:.1}", hit.similarity), title = %title, "top result");
        }

        Ranking {
            documents: scored,
            stats,
        }
    }
}

/// Rank documents with a default [`Ranker`]
pub fn rank_documents<'a>(query: &str, documents: &'a [Document], min_similarity: f64) -> Ranking<'a> {
    Ranker::new().rank(query, documents, min_similarity)
}
