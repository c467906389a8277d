use crate::document::Document;
use crate::error::{CollectionError, Result};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Instant, SystemTime};

/// Load documents from a JSON array file; `.gz` files are decompressed first
pub fn load_documents<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
    let path = path.as_ref();
    let start = Instant::now();

    let file = File::open(path).map_err(|e| CollectionError::io(path, e))?;
    let reader: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };

    let docs: Vec<Document> = serde_json::from_reader(BufReader::new(reader))
        .map_err(|e| CollectionError::parse(path, e))?;

    tracing::info!(
        path = %path.display(),
        documents = docs.len(),
        elapsed = ?start.elapsed(),
        "loaded document collection"
    );
    Ok(docs)
}

#[derive(Debug)]
enum Source {
    Memory,
    File(PathBuf),
}

#[derive(Debug, Clone)]
struct Snapshot {
    documents: Arc<[Document]>,
    modified: Option<SystemTime>,
}

/// Explicit cache for a document collection.
///
/// A file-backed cache loads lazily and reloads when the file's modification
/// time changes or after [`invalidate`](Self::invalidate). Every call to
/// [`get`](Self::get) hands out an immutable snapshot.
#[derive(Debug)]
pub struct CollectionCache {
    source: Source,
    snapshot: RwLock<Option<Snapshot>>,
}

impl CollectionCache {
    /// Cache over a fixed in-memory collection
    pub fn in_memory(documents: Vec<Document>) -> Self {
        Self {
            source: Source::Memory,
            snapshot: RwLock::new(Some(Snapshot {
                documents: documents.into(),
                modified: None,
            })),
        }
    }

    /// Cache over a JSON (or `.json.gz`) file, loaded on first use
    pub fn from_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            source: Source::File(path.into()),
            snapshot: RwLock::new(None),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            Source::Memory => None,
            Source::File(path) => Some(path),
        }
    }

    /// Current collection, reloading from disk if stale.
    /// A loaded snapshot is still returned if the file later disappears.
    pub fn get(&self) -> Result<Arc<[Document]>> {
        let path = match &self.source {
            Source::Memory => {
                let documents = self.cached().map(|s| s.documents);
                return Ok(documents.unwrap_or_else(|| Arc::from(Vec::new())));
            }
            Source::File(path) => path,
        };

        let cached = self.cached();
        let modified = match fs::metadata(path) {
            Ok(metadata) => metadata.modified().ok(),
            Err(e) => match cached {
                // Keep serving the last good snapshot
                Some(snapshot) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "collection file unavailable, serving cached snapshot"
                    );
                    return Ok(snapshot.documents);
                }
                None => return Err(CollectionError::io(path, e)),
            },
        };

        if let Some(snapshot) = cached {
            if snapshot.modified == modified {
                return Ok(snapshot.documents);
            }
            tracing::info!(path = %path.display(), "collection changed on disk, reloading");
        }

        let documents: Arc<[Document]> = load_documents(path)?.into();
        let mut slot = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Snapshot {
            documents: Arc::clone(&documents),
            modified,
        });
        Ok(documents)
    }

    /// Drop the cached snapshot so the next `get` reloads. No-op in memory.
    pub fn invalidate(&self) {
        if let Source::File(path) = &self.source {
            tracing::debug!(path = %path.display(), "collection cache invalidated");
            *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = None;
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cached().is_some()
    }

    fn cached(&self) -> Option<Snapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    const SAMPLE: &str = r#"[
        {"app_no": "10-2021-0001", "title": "전기자동차 배터리", "abstract": "냉각 장치", "text": "배터리 냉각"},
        {"app_no": "10-2021-0002", "title": "Gearbox", "abstract": null}
    ]"#;

    #[test]
    fn test_load_json() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("patents.json");
        fs::write(&path, SAMPLE)?;

        let docs = load_documents(&path)?;
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].abstract_text, "");
        assert_eq!(docs[1].full_text, "");
        Ok(())
    }

    #[test]
    fn test_load_gzip() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("patents.json.gz");
        let mut encoder = GzEncoder::new(File::create(&path)?, Compression::default());
        encoder.write_all(SAMPLE.as_bytes())?;
        encoder.finish()?;

        let docs = load_documents(&path)?;
        assert_eq!(docs[0].app_no, "10-2021-0001");
        Ok(())
    }

    #[test]
    fn test_load_errors() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let missing = load_documents(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(CollectionError::Io { .. })));

        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json")?;
        assert!(matches!(load_documents(&path), Err(CollectionError::Parse { .. })));
        Ok(())
    }

    #[test]
    fn test_cache_lazy_and_invalidate() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("patents.json");
        fs::write(&path, SAMPLE)?;

        let cache = CollectionCache::from_path(&path);
        assert!(!cache.is_loaded());
        let first = cache.get()?;
        assert!(cache.is_loaded());
        assert!(Arc::ptr_eq(&first, &cache.get()?));

        cache.invalidate();
        assert!(!cache.is_loaded());
        let reloaded = cache.get()?;
        assert_eq!(reloaded.len(), 2);
        assert!(!Arc::ptr_eq(&first, &reloaded));
        Ok(())
    }

    #[test]
    fn test_cache_reloads_on_mtime_change() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("patents.json");
        fs::write(&path, r#"[{"app_no": "1"}]"#)?;

        let cache = CollectionCache::from_path(&path);
        let first = cache.get()?;
        assert_eq!(first.len(), 1);

        fs::write(&path, r#"[{"app_no": "1"}, {"app_no": "2"}]"#)?;
        let later = SystemTime::now() + std::time::Duration::from_secs(10);
        File::options().write(true).open(&path)?.set_modified(later)?;

        let reloaded = cache.get()?;
        assert_eq!(reloaded.len(), 2);
        assert!(!Arc::ptr_eq(&first, &reloaded));
        Ok(())
    }

    #[test]
    fn test_cache_survives_missing_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("patents.json");
        fs::write(&path, SAMPLE)?;

        let cache = CollectionCache::from_path(&path);
        let first = cache.get()?;
        fs::remove_file(&path)?;

        let after = cache.get()?;
        assert!(Arc::ptr_eq(&first, &after));

        // Nothing cached to fall back on
        cache.invalidate();
        assert!(matches!(cache.get(), Err(CollectionError::Io { .. })));
        Ok(())
    }

    #[test]
    fn test_in_memory_cache() -> anyhow::Result<()> {
        let cache = CollectionCache::in_memory(vec![Document::default()]);
        cache.invalidate();
        assert_eq!(cache.get()?.len(), 1);
        assert!(cache.path().is_none());
        Ok(())
    }
}
