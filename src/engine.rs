use crate::collection::CollectionCache;
use crate::document::Document;
use crate::error::Result;
use crate::ranking::{RankStats, Ranker, DEFAULT_MIN_SIMILARITY};
use std::path::PathBuf;

/// How many results a caller displays at most by default
pub const DEFAULT_RESULT_LIMIT: usize = 100;

/// Search options
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub min_similarity: f64,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_similarity: DEFAULT_MIN_SIMILARITY,
            limit: Some(DEFAULT_RESULT_LIMIT),
            offset: 0,
        }
    }
}

/// Search result
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub documents: Vec<Document>,
    pub scores: Vec<f64>,
    /// Documents that passed the threshold, before limit and offset
    pub total: usize,
    pub stats: RankStats,
}

/// Collection statistics
#[derive(Debug, Clone, Copy)]
pub struct CollectionStats {
    pub total_documents: usize,
    pub with_full_text: usize,
    pub avg_full_text_chars: f64,
}

/// Ranks a cached document collection against free-text queries
pub struct SearchEngine {
    collection: CollectionCache,
    ranker: Ranker,
}

impl SearchEngine {
    /// Create a search engine over a JSON (or `.json.gz`) collection file
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self::with_cache(CollectionCache::from_path(path))
    }

    /// Create an in-memory search engine
    pub fn in_memory(documents: Vec<Document>) -> Self {
        Self::with_cache(CollectionCache::in_memory(documents))
    }

    pub fn with_cache(collection: CollectionCache) -> Self {
        Self {
            collection,
            ranker: Ranker::new(),
        }
    }

    pub fn collection(&self) -> &CollectionCache {
        &self.collection
    }

    /// Search for documents
    pub fn search(&self, query: &str, options: &SearchOptions) -> Result<SearchResult> {
        let documents = self.collection.get()?;
        let ranking = self.ranker.rank(query, &documents, options.min_similarity);
        let total = ranking.documents.len();

        // Apply pagination
        let start = options.offset.min(total);
        let end = match options.limit {
            Some(limit) => start.saturating_add(limit).min(total),
            None => total,
        };

        let page = &ranking.documents[start..end];
        Ok(SearchResult {
            documents: page.iter().map(|hit| hit.document.clone()).collect(),
            scores: page.iter().map(|hit| hit.similarity).collect(),
            total,
            stats: ranking.stats,
        })
    }

    /// Get a document by application number
    pub fn get_document(&self, app_no: &str) -> Result<Option<Document>> {
        let documents = self.collection.get()?;
        Ok(documents.iter().find(|doc| doc.app_no == app_no).cloned())
    }

    /// Get collection statistics
    pub fn stats(&self) -> Result<CollectionStats> {
        let documents = self.collection.get()?;
        let with_full_text = documents.iter().filter(|d| !d.full_text.is_empty()).count();
        let total_chars: usize = documents.iter().map(|d| d.full_text.chars().count()).sum();

        Ok(CollectionStats {
            total_documents: documents.len(),
            with_full_text,
            avg_full_text_chars: if documents.is_empty() {
                0.0
            } else {
                total_chars as f64 / documents.len() as f64
            },
        })
    }

    /// Get total document count
    pub fn document_count(&self) -> Result<usize> {
        Ok(self.collection.get()?.len())
    }

    /// Drop the cached collection so the next call reloads it
    pub fn reload(&self) {
        self.collection.invalidate();
    }
}
