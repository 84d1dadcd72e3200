//! Directory fingerprinting for the content-hash token strategy.
//!
//! This module computes a SHA-256 digest over an asset tree, producing a
//! short hexadecimal token that is deterministic for identical trees and
//! changes whenever any file's content changes.

use anyhow::{Context, Result};
use glob::Pattern;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::constants::TOKEN_HEX_LEN;
use crate::core::CacheBreakError;

/// Compute the content-hash token for an asset directory.
///
/// The walk is deterministic: files are hashed individually, sorted by their
/// relative path, and the sorted list of `path:digest` lines is hashed again.
/// The final digest is truncated to [`TOKEN_HEX_LEN`] lowercase hex characters.
///
/// Relative paths always use forward slashes so the same tree produces the
/// same token on every platform.
///
/// # Arguments
///
/// * `root` - The asset directory to fingerprint
/// * `exclude` - Glob patterns for files to leave out of the digest. A pattern
///   matches when it matches the file's path relative to `root` or its bare
///   file name, so `*.map` and `.DS_Store` both work without `**/` prefixes.
///
/// # Errors
///
/// Returns [`CacheBreakError::AssetDirNotFound`] when `root` is not a
/// directory and [`CacheBreakError::AssetDirEmpty`] when the walk finds no
/// files to hash after exclusions. An empty tree would hash to a constant,
/// handing every deployment the same token, so it is rejected outright.
pub fn hash_tree(root: &Path, exclude: &[String]) -> Result<String> {
    if !root.is_dir() {
        return Err(CacheBreakError::AssetDirNotFound {
            path: root.display().to_string(),
        }
        .into());
    }

    let patterns = compile_patterns(exclude)?;

    debug!("Fingerprinting asset tree at {}", root.display());

    let mut file_hashes: Vec<(String, String)> = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry
            .with_context(|| format!("Failed to read directory entry in: {}", root.display()))?;

        if !entry.file_type().is_file() {
            continue;
        }

        let file_path = entry.path();
        let relative = normalize_relative_path(file_path.strip_prefix(root).unwrap_or(file_path));

        if is_excluded(&relative, &patterns) {
            trace!("Excluded from fingerprint: {relative}");
            continue;
        }

        let file_digest = hash_file(file_path)?;
        file_hashes.push((relative, file_digest));
    }

    if file_hashes.is_empty() {
        return Err(CacheBreakError::AssetDirEmpty {
            path: root.display().to_string(),
        }
        .into());
    }

    // Sort by relative path for deterministic ordering
    file_hashes.sort_by(|a, b| a.0.cmp(&b.0));

    let mut hasher = Sha256::new();
    for (path, digest) in &file_hashes {
        hasher.update(format!("{path}:{digest}\n").as_bytes());
    }

    let result = hasher.finalize();
    let token = hex::encode(result)[..TOKEN_HEX_LEN].to_string();

    debug!("Fingerprinted {} files, token {token}", file_hashes.len());
    Ok(token)
}

/// SHA-256 of a single file's bytes as lowercase hex.
fn hash_file(path: &Path) -> Result<String> {
    let content = fs::read(path).with_context(|| {
        format!("Cannot read file for token calculation: {}", path.display())
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&content);
    Ok(hex::encode(hasher.finalize()))
}

fn compile_patterns(exclude: &[String]) -> Result<Vec<Pattern>> {
    exclude
        .iter()
        .map(|p| Pattern::new(p).with_context(|| format!("Invalid exclude pattern: {p}")))
        .collect()
}

fn is_excluded(relative: &str, patterns: &[Pattern]) -> bool {
    let file_name = relative.rsplit('/').next().unwrap_or(relative);
    patterns.iter().any(|p| p.matches(relative) || p.matches(file_name))
}

/// Convert a relative path to a forward-slash string for hashing.
///
/// Backslashes only appear in Windows paths, so replacing them keeps the
/// digest input identical across platforms.
fn normalize_relative_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
