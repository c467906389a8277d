//! Heuristic relevance scoring for one (query, document) pair.
//!
//! Per-token field scores are boosted for long tokens, then the total is
//! scaled by query coverage, normalized to a 0..100 range, corrected for
//! single-token queries and document length, and finally bumped by a
//! proximity bonus. The order of these steps is part of the score.

use crate::document::Document;
use crate::matcher::{field_score, LoweredFields};
use crate::proximity::proximity_bonus;
use crate::tokenizer::{TokenSet, Tokenizer};

/// Best attainable points per query token, used for normalization
const MAX_POINTS_PER_TOKEN: f64 = 50.0;

const LONG_TOKEN_LEN: usize = 4;
const LONG_TOKEN_BOOST: f64 = 1.1;
const VERY_LONG_TOKEN_LEN: usize = 6;
const VERY_LONG_TOKEN_BOOST: f64 = 1.15;

const SINGLE_TOKEN_PENALTY: f64 = 0.65;

const SHORT_DOC_CHARS: usize = 200;
const SHORT_DOC_FACTOR: f64 = 0.9;
const LONG_DOC_CHARS: usize = 5000;
const LONG_DOC_FACTOR: f64 = 0.95;

/// Intermediate values of one scoring pass
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub query_tokens: usize,
    pub matched_tokens: usize,
    /// Sum of boosted token scores before the coverage multiplier
    pub raw_total: f64,
    pub coverage_ratio: f64,
    pub coverage_multiplier: f64,
    /// Score after normalization and the single-token and length corrections
    pub normalized: f64,
    pub length_factor: f64,
    pub proximity_bonus: u32,
    pub similarity: f64,
}

/// Multiplier applied to the accumulated score for a given coverage
pub fn coverage_multiplier(matched: usize, total: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    if matched == total {
        return 1.3;
    }
    let ratio = matched as f64 / total as f64;
    if ratio >= 0.8 {
        1.15
    } else if ratio >= 0.6 {
        1.05
    } else if ratio < 0.4 {
        0.7
    } else {
        1.0
    }
}

/// Correction for very short or very long full texts, by char count
pub fn length_factor(full_text_chars: usize) -> f64 {
    if full_text_chars < SHORT_DOC_CHARS {
        SHORT_DOC_FACTOR
    } else if full_text_chars > LONG_DOC_CHARS {
        LONG_DOC_FACTOR
    } else {
        1.0
    }
}

/// Round to one decimal place and clamp to 0..=100
pub fn finalize(score: f64) -> f64 {
    ((score * 10.0).round() / 10.0).clamp(0.0, 100.0)
}

#[derive(Debug, Clone, Default)]
pub struct RelevanceScorer {
    tokenizer: Tokenizer,
}

impl RelevanceScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Similarity of `doc` to `query`, in 0..=100 with one decimal
    pub fn score(&self, query: &str, doc: &Document) -> f64 {
        let tokens = self.tokenizer.tokenize(query);
        self.score_tokens(&tokens, doc)
    }

    /// Same as [`score`](Self::score) for an already tokenized query
    pub fn score_tokens(&self, query_tokens: &TokenSet, doc: &Document) -> f64 {
        self.explain(query_tokens, doc).similarity
    }

    /// Full scoring pass, keeping every intermediate value
    pub fn explain(&self, query_tokens: &TokenSet, doc: &Document) -> ScoreBreakdown {
        if query_tokens.is_empty() {
            return ScoreBreakdown::default();
        }

        let fields = LoweredFields::from_document(doc);
        let mut total = 0.0;
        let mut matched_tokens = 0;

        for token in query_tokens {
            let field_match = field_score(token, &fields);
            let mut token_score = field_match.score;

            if field_match.matched {
                let len = token.chars().count();
                if len >= LONG_TOKEN_LEN {
                    token_score *= LONG_TOKEN_BOOST;
                }
                if len >= VERY_LONG_TOKEN_LEN {
                    token_score *= VERY_LONG_TOKEN_BOOST;
                }
                matched_tokens += 1;
            }

            total += token_score;
        }

        let query_len = query_tokens.len();
        let raw_total = total;
        let multiplier = coverage_multiplier(matched_tokens, query_len);
        total *= multiplier;

        let max_possible = query_len as f64 * MAX_POINTS_PER_TOKEN;
        let mut normalized = (total / max_possible) * 100.0;

        if query_len == 1 {
            normalized *= SINGLE_TOKEN_PENALTY;
        }

        let doc_factor = length_factor(fields.full_text.chars().count());
        if doc_factor != 1.0 {
            normalized *= doc_factor;
        }

        let mut bonus = 0;
        let mut similarity = normalized;
        if query_len >= 2 && matched_tokens >= 2 {
            bonus = proximity_bonus(query_tokens, &fields.full_text);
            similarity += f64::from(bonus);
        }

        ScoreBreakdown {
            query_tokens: query_len,
            matched_tokens,
            raw_total,
            coverage_ratio: matched_tokens as f64 / query_len as f64,
            coverage_multiplier: multiplier,
            normalized,
            length_factor: doc_factor,
            proximity_bonus: bonus,
            similarity: finalize(similarity),
        }
    }
}
