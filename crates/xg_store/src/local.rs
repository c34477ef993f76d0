//! A filesystem-backed resource manager. Grounded on `vm_io::canonical_json`'s
//! write path: write to a unique temp file in the destination directory,
//! fsync it, then rename into place (with a same-directory fallback if
//! rename fails, e.g. across devices).

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use walkdir::WalkDir;

use crate::content::{parse_csv, Content};
use crate::errors::{StoreError, StoreResult};
use crate::key::ArtifactKey;
use crate::manager::ResourceManager;

/// Marker byte prefixing every stored file, recording which [`Content`]
/// variant it was written as, so `get` knows how to parse it back without
/// having to trust the caller-supplied `data_type` string.
const TABULAR_MARKER: u8 = b'T';
const BYTES_MARKER: u8 = b'B';

pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn file_path(&self, key: &ArtifactKey) -> PathBuf {
        self.root.join(&key.path).join(format!("{}.{}", key.name, key.data_type))
    }

    fn decompose(&self, file: &Path) -> Option<ArtifactKey> {
        let rel = file.strip_prefix(&self.root).ok()?;
        let parent = rel.parent().unwrap_or_else(|| Path::new(""));
        let path = parent.to_string_lossy().replace('\\', "/");
        let name = rel.file_stem()?.to_str()?.to_string();
        let data_type = rel.extension()?.to_str()?.to_string();
        Some(ArtifactKey::new(path, name, data_type))
    }

    fn io_err(path: &Path, source: io::Error) -> StoreError {
        StoreError::Io { path: path.display().to_string(), source }
    }

    fn write_atomic(&self, path: &Path, bytes: &[u8]) -> StoreResult<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).map_err(|e| Self::io_err(parent, e))?;

        let tmp = make_unique_tmp_path(path);
        let mut tf = OpenOptions::new().write(true).create_new(true).open(&tmp).map_err(|e| Self::io_err(&tmp, e))?;
        tf.write_all(bytes).map_err(|e| Self::io_err(&tmp, e))?;
        tf.sync_all().map_err(|e| Self::io_err(&tmp, e))?;
        drop(tf);

        if fs::rename(&tmp, path).is_err() {
            let result: io::Result<()> = (|| {
                let mut f = OpenOptions::new().write(true).create(true).truncate(true).open(path)?;
                f.write_all(bytes)?;
                f.sync_all()
            })();
            let _ = fs::remove_file(&tmp);
            result.map_err(|e| Self::io_err(path, e))?;
        }
        fsync_dir(parent);
        Ok(())
    }
}

impl ResourceManager for LocalStore {
    fn save_at(&mut self, key: &ArtifactKey, content: Content) -> StoreResult<()> {
        let path = self.file_path(key);
        let mut bytes = Vec::new();
        match &content {
            Content::Bytes(b) => {
                bytes.push(BYTES_MARKER);
                bytes.extend_from_slice(b);
            }
            Content::Tabular(_) => {
                bytes.push(TABULAR_MARKER);
                bytes.extend_from_slice(&content.as_bytes());
            }
        }
        self.write_atomic(&path, &bytes)
    }

    fn get(&self, key: &ArtifactKey) -> StoreResult<Content> {
        let path = self.file_path(key);
        let mut file = File::open(&path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                StoreError::NotFound(key.to_string())
            } else {
                Self::io_err(&path, e)
            }
        })?;
        let mut raw = Vec::new();
        file.read_to_end(&mut raw).map_err(|e| Self::io_err(&path, e))?;
        let Some((&marker, payload)) = raw.split_first() else {
            return Ok(Content::Bytes(Vec::new()));
        };
        match marker {
            TABULAR_MARKER => Ok(Content::Tabular(parse_csv(payload))),
            _ => Ok(Content::Bytes(payload.to_vec())),
        }
    }

    fn contains(&self, key: &ArtifactKey) -> bool {
        self.file_path(key).is_file()
    }

    fn remove(&mut self, key: &ArtifactKey) -> StoreResult<()> {
        let path = self.file_path(key);
        fs::remove_file(&path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                StoreError::NotFound(key.to_string())
            } else {
                Self::io_err(&path, e)
            }
        })
    }

    fn get_all(&self, path: Option<&str>, data_type: Option<&str>) -> StoreResult<Vec<ArtifactKey>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }
        let mut keys = Vec::new();
        for entry in WalkDir::new(&self.root).into_iter().filter_map(Result::ok) {
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(key) = self.decompose(entry.path()) else { continue };
            if path.is_some_and(|p| key.path != p) {
                continue;
            }
            if data_type.is_some_and(|t| key.data_type != t) {
                continue;
            }
            keys.push(key);
        }
        Ok(keys)
    }
}

fn make_unique_tmp_path(target: &Path) -> PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let pid = std::process::id();
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let fname = target.file_name().and_then(|s| s.to_str()).unwrap_or("file");
    let mut tmp_name = OsString::from(format!(".{fname}.{pid}.{n}.tmp"));
    tmp_name.push("");
    target.with_file_name(tmp_name)
}

#[cfg(unix)]
fn fsync_dir(dir: &Path) {
    if let Ok(df) = OpenOptions::new().read(true).open(dir) {
        let _ = df.sync_all();
    }
}

#[cfg(not(unix))]
fn fsync_dir(_dir: &Path) {}
