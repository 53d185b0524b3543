use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{debug, info};

use super::{check_unique, PolygonStore, StoreError, StoreResult, StoredPolygon};
use crate::geom::{rings_intersect, Point, Polygon};

/// Store backed by a single JSON array of [`StoredPolygon`] records.
///
/// The file is read once at [`open`](Self::open) and rewritten on every insert via a
/// temp file and rename, so a crash leaves either the old or the new document.
/// Meant for a single writing process.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    rows: RwLock<Vec<StoredPolygon>>,
}

impl JsonFileStore {
    /// Open the store at `path`, creating an empty document (and parent dirs) if missing.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let rows = if path.exists() {
            let bytes = fs::read(&path)?;
            if bytes.iter().all(u8::is_ascii_whitespace) {
                Vec::new()
            } else {
                serde_json::from_slice::<Vec<StoredPolygon>>(&bytes)?
            }
        } else {
            write_atomic(&path, &[])?;
            info!(path = %path.display(), "created polygon store");
            Vec::new()
        };
        validate_rows(&rows)?;
        debug!(path = %path.display(), rows = rows.len(), "opened polygon store");
        Ok(Self {
            path,
            rows: RwLock::new(rows),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PolygonStore for JsonFileStore {
    fn exists(&self, name: &str) -> StoreResult<bool> {
        Ok(self.rows.read().iter().any(|r| r.name == name))
    }

    fn intersects(&self, ring: &[Point]) -> StoreResult<bool> {
        Ok(self
            .rows
            .read()
            .iter()
            .any(|r| rings_intersect(&r.points, ring)))
    }

    fn insert(&self, polygon: &Polygon) -> StoreResult<()> {
        self.insert_batch(std::slice::from_ref(polygon))
    }

    fn insert_batch(&self, polygons: &[Polygon]) -> StoreResult<()> {
        let mut rows = self.rows.write();
        check_unique(|name| rows.iter().any(|r| r.name == name), polygons)?;
        let mut next = rows.clone();
        next.extend(polygons.iter().map(StoredPolygon::from));
        write_atomic(&self.path, &next)?;
        *rows = next;
        Ok(())
    }

    fn list_all(&self) -> StoreResult<Vec<Polygon>> {
        Ok(self.rows.read().iter().cloned().map(Polygon::from).collect())
    }
}

fn write_atomic(path: &Path, rows: &[StoredPolygon]) -> StoreResult<()> {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    let bytes = serde_json::to_vec_pretty(rows)?;
    let written = fs::write(&tmp, bytes).and_then(|()| fs::rename(&tmp, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

fn validate_rows(rows: &[StoredPolygon]) -> StoreResult<()> {
    let mut seen = std::collections::HashSet::new();
    for r in rows {
        if !seen.insert(r.name.as_str()) {
            return Err(StoreError::Corrupt {
                reason: format!("duplicate name {:?}", r.name),
            });
        }
    }
    Ok(())
}
