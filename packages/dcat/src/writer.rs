//! JSON output for catalog documents.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::catalog::CatalogEnvelope;
use crate::error::Result;

/// Serialize a catalog to JSON text, with a trailing newline.
pub fn generate_json(catalog: &CatalogEnvelope, pretty: bool) -> Result<String> {
    let mut json = if pretty {
        serde_json::to_string_pretty(catalog)?
    } else {
        serde_json::to_string(catalog)?
    };
    json.push('\n');
    Ok(json)
}

/// Serialize a catalog into any writer.
pub fn write_json<W: Write>(catalog: &CatalogEnvelope, mut out: W, pretty: bool) -> Result<()> {
    out.write_all(generate_json(catalog, pretty)?.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Save a catalog as a JSON file.
///
/// Uses atomic write pattern: writes to temp file, syncs to disk, then renames.
/// Parent directories are created as needed.
pub fn save_catalog(catalog: &CatalogEnvelope, path: &Path, pretty: bool) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "catalog.json".to_string());
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    let content = generate_json(catalog, pretty)?;

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;

    Ok(path.to_path_buf())
}
