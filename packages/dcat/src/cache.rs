//! On-disk cache of generated catalogs.
//!
//! A catalog is written to `cache-<timestamp>.temp` and renamed to `.dcat`
//! on commit. After each commit only the most recently modified `.dcat`
//! file is kept.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::Local;

use crate::catalog::CatalogEnvelope;
use crate::config::{DcatConfig, CACHE_NAME_PATTERN, CACHE_TIMESTAMP_FORMAT};
use crate::error::{DcatError, Result};
use crate::writer::write_json;

/// DCAT cache rooted at one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DcatCache {
    root: PathBuf,
}

impl DcatCache {
    /// Create a cache rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a cache at the configured directory, or `$HOME/dcat/cache`.
    #[must_use]
    pub fn from_config(config: &DcatConfig) -> Self {
        Self::new(config.resolved_cache_dir())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the cache directory.
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// Path of the most recently modified cache file, if any.
    pub fn latest(&self) -> Result<Option<PathBuf>> {
        let files = self.list_cache_files()?;
        Ok(find_latest(&files).map(|(path, _)| path.clone()))
    }

    /// Open the most recently modified cache file.
    pub fn open_latest(&self) -> Result<File> {
        let latest = self
            .latest()?
            .ok_or_else(|| DcatError::CacheNotFound(self.root.clone()))?;
        Ok(File::open(latest)?)
    }

    /// Read the most recently cached catalog as text.
    pub fn read_latest(&self) -> Result<String> {
        let mut content = String::new();
        io::Read::read_to_string(&mut self.open_latest()?, &mut content)?;
        Ok(content)
    }

    /// Start a new cache entry.
    pub fn create_writer(&self) -> Result<CacheWriter> {
        self.init()?;
        let stamp = Local::now().format(CACHE_TIMESTAMP_FORMAT);
        let path = self.root.join(format!("cache-{stamp}.temp"));
        let file = File::create(&path)?;
        Ok(CacheWriter {
            cache: self.clone(),
            path,
            out: BufWriter::new(file),
        })
    }

    /// Write a catalog into a new cache entry and commit it.
    ///
    /// A failed write removes the unfinished `.temp` file.
    pub fn store(&self, catalog: &CatalogEnvelope, pretty: bool) -> Result<PathBuf> {
        self.store_with(|writer| write_json(catalog, writer, pretty))
    }

    fn store_with<F>(&self, write: F) -> Result<PathBuf>
    where
        F: FnOnce(&mut CacheWriter) -> Result<()>,
    {
        let mut writer = self.create_writer()?;
        if let Err(e) = write(&mut writer) {
            writer.discard();
            return Err(e);
        }
        writer.commit()
    }

    /// Committed cache files with their modification times.
    ///
    /// A missing root directory holds no files.
    fn list_cache_files(&self) -> Result<Vec<(PathBuf, SystemTime)>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            if !CACHE_NAME_PATTERN.is_match(&name.to_string_lossy()) {
                continue;
            }
            let metadata = entry.metadata()?;
            if metadata.is_file() {
                files.push((entry.path(), metadata.modified()?));
            }
        }
        Ok(files)
    }

    /// Delete every cache file except the most recent one.
    fn purge_outdated(&self) -> Result<()> {
        let files = self.list_cache_files()?;
        let Some((latest, _)) = find_latest(&files) else {
            return Ok(());
        };

        for (path, _) in files.iter().filter(|(path, _)| path != latest) {
            match fs::remove_file(path) {
                Ok(()) => tracing::info!(path = %path.display(), "Purged outdated DCAT cache"),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to purge DCAT cache")
                }
            }
        }
        Ok(())
    }
}

/// First file with the newest modification time.
fn find_latest(files: &[(PathBuf, SystemTime)]) -> Option<&(PathBuf, SystemTime)> {
    files.iter().fold(None, |latest, candidate| match latest {
        Some(current) if candidate.1 <= current.1 => Some(current),
        _ => Some(candidate),
    })
}

/// An uncommitted cache entry.
///
/// Dropping the writer without calling [`CacheWriter::commit`] or
/// [`CacheWriter::discard`] leaves a `.temp` file behind that is never read.
#[derive(Debug)]
pub struct CacheWriter {
    cache: DcatCache,
    path: PathBuf,
    out: BufWriter<File>,
}

impl CacheWriter {
    /// Path of the temporary file being written.
    pub fn temp_path(&self) -> &Path {
        &self.path
    }

    /// Abandon the entry and remove its `.temp` file.
    pub fn discard(self) {
        drop(self.out);
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove unfinished cache entry"
            );
        }
    }

    /// Flush, publish the entry as `.dcat` and purge older entries.
    pub fn commit(self) -> Result<PathBuf> {
        let file = self.out.into_inner().map_err(|e| DcatError::Io(e.into_error()))?;
        file.sync_all()?;
        drop(file);

        let committed = self.path.with_extension("dcat");

        #[cfg(target_os = "windows")]
        if committed.exists() {
            fs::remove_file(&committed)?;
        }

        fs::rename(&self.path, &committed)?;
        tracing::info!(path = %committed.display(), "Committed DCAT cache");

        self.cache.purge_outdated()?;
        Ok(committed)
    }
}

impl Write for CacheWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
