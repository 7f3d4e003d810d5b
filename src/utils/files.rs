use std::path::{Path, PathBuf};

use crate::error::Result;

/// Keeps a server-supplied file name safe to write into a local directory.
pub fn sanitize_filename(raw: &str) -> String {
    let base = raw.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(raw);
    let cleaned: String = base
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '-' | '_' => c,
            _ => '_',
        })
        .collect();
    let cleaned = cleaned.trim_matches('.').to_string();
    if cleaned.is_empty() {
        "download".to_string()
    } else {
        cleaned
    }
}

/// Writes `bytes` as `dir/name`, creating `dir` first.
pub async fn save_to_dir(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(sanitize_filename(name));
    tokio::fs::write(&path, bytes).await?;
    tracing::info!("Saved {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}
