// Re-export main components
pub mod api;
pub mod collection;
pub mod document;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod proximity;
pub mod ranking;
pub mod scorer;
pub mod tokenizer;

// Re-export commonly used types
pub use collection::{load_documents, CollectionCache};
pub use document::{Document, ScoredDocument};
pub use engine::{SearchEngine, SearchOptions, SearchResult};
pub use error::CollectionError;
pub use ranking::{rank_documents, RankStats, Ranker, Ranking, DEFAULT_MIN_SIMILARITY, STRICT_MIN_SIMILARITY};
pub use scorer::{RelevanceScorer, ScoreBreakdown};
pub use tokenizer::{TokenSet, Tokenizer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
