//! JSON document files backing the file stores.

use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};

/// Reads a JSON array from `path`. A missing file is an empty collection.
pub async fn load<T: DeserializeOwned>(path: &Path) -> crate::Result<Vec<T>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(vec![]),
        Err(e) => return Err(e.into()),
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(vec![]);
    }

    Ok(serde_json::from_slice(&bytes)?)
}

/// Writes `items` as a JSON array, replacing the file in one rename so readers
/// never observe a half-written document.
pub async fn persist<T: Serialize>(path: &Path, items: &[T]) -> crate::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let tmp = tmp_path(path);
    let bytes = serde_json::to_vec_pretty(items)?;
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;

    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
