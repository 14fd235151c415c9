// ── File-backed snapshot store ──
//
// One `<key>.json` file per collection under a cache directory. Writes go
// to a sibling temp file first and are renamed into place, so a crash
// mid-write leaves the previous snapshot intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{CacheError, SnapshotStore};

#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    /// Open (creating if needed) a snapshot directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| CacheError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, CacheError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(CacheError::InvalidKey { key: key.to_owned() });
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_error(key: &str) -> impl FnOnce(std::io::Error) -> CacheError + '_ {
    move |source| CacheError::Io {
        key: key.to_owned(),
        source,
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key)(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        let tmp = self
            .dir
            .join(format!(".{key}.{}.tmp", uuid::Uuid::new_v4().simple()));

        fs::write(&tmp, value).map_err(io_error(key))?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(io_error(key)(e));
        }
        debug!(path = %path.display(), bytes = value.len(), "snapshot written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key)(e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn snapshots_survive_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::open(tmp.path().join("cache")).unwrap();
        store.set("cached_products", r#"[{"id":"p1"}]"#).unwrap();

        let reopened = FileSnapshotStore::open(tmp.path().join("cache")).unwrap();
        assert_eq!(
            reopened.get("cached_products").unwrap().as_deref(),
            Some(r#"[{"id":"p1"}]"#)
        );
        assert!(tmp.path().join("cache/cached_products.json").exists());
    }

    #[test]
    fn missing_snapshot_reads_as_none_and_removes_cleanly() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::open(tmp.path()).unwrap();
        assert_eq!(store.get("cached_admins").unwrap(), None);
        store.remove("cached_admins").unwrap();
    }

    #[test]
    fn overwrite_leaves_no_temp_files() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::open(tmp.path()).unwrap();
        store.set("cached_stats", "{}").unwrap();
        store.set("cached_stats", r#"{"totalCustomers":3}"#).unwrap();

        let names: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["cached_stats.json".to_string()]);
    }

    #[test]
    fn rejects_path_like_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::open(tmp.path()).unwrap();
        assert!(matches!(
            store.set("../escape", "x"),
            Err(CacheError::InvalidKey { .. })
        ));
        assert!(matches!(store.get(""), Err(CacheError::InvalidKey { .. })));
    }
}
