use super::{CacheError, CacheLookup, DiscoverMoviesCache};
use crate::domain::{DiscoverMoviesRequest, Movie};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;

/// Distinguishes temporary files of concurrent writes within this process
static WRITE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Stores each list page as a JSON file.
///
/// Files are named after the list and page, e.g. `popular_page_1.json`, so
/// every key maps to exactly one file. Writes go to a temporary file in the
/// same directory which is then renamed over the entry, so readers see either
/// the old page or the new one.
#[derive(Debug, Clone)]
pub struct FileDiscoverCache {
    /// The directory where cached pages are stored
    cache_dir: PathBuf,
}

impl FileDiscoverCache {
    /// Opens or creates a cache with the given name
    ///
    /// The cache will be stored in the system's standard cache directory
    /// under a subdirectory named after the application and the provided name.
    /// The name will be sanitized (lowercased, non-alphanumeric characters
    /// replaced with underscores).
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let cache = FileDiscoverCache::open("discover")?;
    /// ```
    pub fn open(name: &str) -> Result<Self, CacheError> {
        let proj_dirs = directories::ProjectDirs::from("org", "movie-catalog", "movie-catalog")
            .ok_or(CacheError::CacheDirectoryNotFound)?;

        Self::at(proj_dirs.cache_dir().join(sanitize_name(name)))
    }

    /// Opens or creates a cache in an explicit directory
    pub fn at(cache_dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let cache_dir = cache_dir.into();

        std::fs::create_dir_all(&cache_dir).map_err(|e| CacheError::DirectoryCreationFailed {
            path: cache_dir.clone(),
            source: e,
        })?;

        Ok(Self { cache_dir })
    }

    /// Returns the path to the cache directory
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn entry_path(&self, request: DiscoverMoviesRequest, page: u32) -> PathBuf {
        let identifier = sanitize_name(&format!("{}_page_{}", request, page));
        self.cache_dir.join(format!("{}.json", identifier))
    }

    /// Unique hidden sibling of an entry, used while the entry is written
    fn temp_path(&self, file_path: &Path) -> PathBuf {
        let file_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let sequence = WRITE_COUNTER.fetch_add(1, Ordering::Relaxed);

        self.cache_dir.join(format!(
            ".{}.{}.{}.tmp",
            file_name,
            std::process::id(),
            sequence
        ))
    }
}

#[async_trait]
impl DiscoverMoviesCache for FileDiscoverCache {
    async fn read(
        &self,
        request: DiscoverMoviesRequest,
        page: u32,
    ) -> Result<CacheLookup, CacheError> {
        let file_path = self.entry_path(request, page);

        let content = match fs::read_to_string(&file_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(CacheLookup::Miss),
            Err(e) => {
                return Err(CacheError::ReadFailed {
                    path: file_path,
                    source: e,
                });
            }
        };

        let movies =
            serde_json::from_str(&content).map_err(|e| CacheError::DeserializationFailed {
                path: file_path,
                source: e,
            })?;

        Ok(CacheLookup::Hit(movies))
    }

    async fn write(
        &self,
        request: DiscoverMoviesRequest,
        page: u32,
        movies: &[Movie],
    ) -> Result<(), CacheError> {
        let file_path = self.entry_path(request, page);
        let content = serde_json::to_string_pretty(movies)?;

        // 1. Write the full page next to the entry
        let temp_path = self.temp_path(&file_path);
        if let Err(e) = fs::write(&temp_path, content).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(CacheError::WriteFailed {
                path: temp_path,
                source: e,
            });
        }

        // 2. Swap it in
        if let Err(e) = fs::rename(&temp_path, &file_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(CacheError::WriteFailed {
                path: file_path,
                source: e,
            });
        }

        Ok(())
    }
}

/// Sanitizes a name for use in file paths
///
/// Converts to lowercase and replaces all characters that are not
/// a-z, 0-9, or hyphen with underscores.
fn sanitize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
