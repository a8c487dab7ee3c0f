//! Content fingerprinting for module checkouts
//!
//! A module's digest is SHA256 over the raw bytes of every regular file in
//! its tree, fed in sorted path order. File names, permissions and timestamps
//! do not contribute, so a rename without a content change keeps the digest.

use crate::error::{ModguardError, ModguardResult};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tracing::debug;

const STREAM_BUF_SIZE: usize = 65536;

/// Digest of one module checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDigest {
    /// Last path segment of the checkout directory
    pub module_name: String,
    /// Lowercase hex SHA256
    pub digest: String,
}

impl ModuleDigest {
    /// Fingerprint the checkout at `module_dir`
    pub fn compute(module_dir: &Path) -> ModguardResult<Self> {
        let digest = fingerprint_dir(module_dir)?;
        Ok(Self {
            module_name: Self::name_for(module_dir),
            digest,
        })
    }

    /// Lock store key for a checkout directory
    pub fn name_for(module_dir: &Path) -> String {
        module_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| module_dir.display().to_string())
    }
}

/// Hidden entries (leading dot) are skipped with their whole subtree
fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.')
}

fn unreadable(path: &Path, source: std::io::Error) -> ModguardError {
    ModguardError::UnreadableModule {
        path: path.to_path_buf(),
        source,
    }
}

/// Stream a file's bytes into the hasher
fn hash_file_into(path: &Path, hasher: &mut Sha256) -> ModguardResult<()> {
    let mut file = File::open(path).map_err(|e| unreadable(path, e))?;
    let mut buf = vec![0u8; STREAM_BUF_SIZE];
    loop {
        let n = file.read(&mut buf).map_err(|e| unreadable(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(())
}

fn walk(dir: &Path, hasher: &mut Sha256) -> ModguardResult<()> {
    let mut children = fs::read_dir(dir)
        .map_err(|e| unreadable(dir, e))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| unreadable(dir, e))?;
    children.sort_by_key(|e| e.file_name());

    for entry in children {
        if is_hidden(&entry.file_name()) {
            continue;
        }

        let path = entry.path();
        let ft = entry.file_type().map_err(|e| unreadable(&path, e))?;

        if ft.is_dir() {
            walk(&path, hasher)?;
        } else if ft.is_file() {
            debug!("Hashing {}", path.display());
            hash_file_into(&path, hasher)?;
        } else if ft.is_symlink() {
            // Follow links to files; links to directories are not descended
            let target = fs::metadata(&path).map_err(|e| unreadable(&path, e))?;
            if target.is_file() {
                debug!("Hashing {} (symlink)", path.display());
                hash_file_into(&path, hasher)?;
            }
        }
    }

    Ok(())
}

/// Compute the content digest of a directory tree
///
/// Fails with `UnreadableModule` if the root is missing or any entry cannot
/// be read.
pub fn fingerprint_dir(root: &Path) -> ModguardResult<String> {
    let meta = fs::metadata(root).map_err(|e| unreadable(root, e))?;
    if !meta.is_dir() {
        return Err(unreadable(root, std::io::Error::other("not a directory")));
    }

    let mut hasher = Sha256::new();
    walk(root, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}
