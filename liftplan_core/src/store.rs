//! Saved-plan library.
//!
//! Plans are kept by id behind the `ProgramStore` trait. `JsonFileStore`
//! persists the whole library as one JSON file with file locking and atomic
//! replacement; `MemoryStore` backs tests and embedding callers.

use crate::{Error, Result, WorkoutPlan};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

/// A plan with its library timestamps
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StoredPlan {
    pub saved_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub plan: WorkoutPlan,
}

impl StoredPlan {
    fn new(plan: WorkoutPlan) -> Self {
        let now = Utc::now();
        Self {
            saved_at: now,
            updated_at: now,
            plan,
        }
    }
}

/// Persistence boundary for generated plans
pub trait ProgramStore {
    /// Store a plan under its id, replacing any plan with the same id
    fn save(&mut self, plan: &WorkoutPlan) -> Result<Uuid>;

    /// All stored plans, oldest first
    fn list(&self) -> Result<Vec<StoredPlan>>;

    fn get(&self, id: Uuid) -> Result<StoredPlan>;

    /// Replace a stored plan, keeping its original save time
    fn update(&mut self, id: Uuid, plan: &WorkoutPlan) -> Result<()>;

    fn delete(&mut self, id: Uuid) -> Result<()>;
}

fn sorted(plans: impl IntoIterator<Item = StoredPlan>) -> Vec<StoredPlan> {
    let mut plans: Vec<_> = plans.into_iter().collect();
    plans.sort_by_key(|p| (p.saved_at, p.plan.id));
    plans
}

/// In-process store
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    plans: BTreeMap<Uuid, StoredPlan>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgramStore for MemoryStore {
    fn save(&mut self, plan: &WorkoutPlan) -> Result<Uuid> {
        self.plans.insert(plan.id, StoredPlan::new(plan.clone()));
        Ok(plan.id)
    }

    fn list(&self) -> Result<Vec<StoredPlan>> {
        Ok(sorted(self.plans.values().cloned()))
    }

    fn get(&self, id: Uuid) -> Result<StoredPlan> {
        self.plans.get(&id).cloned().ok_or(Error::PlanNotFound(id))
    }

    fn update(&mut self, id: Uuid, plan: &WorkoutPlan) -> Result<()> {
        let stored = self.plans.get_mut(&id).ok_or(Error::PlanNotFound(id))?;
        stored.plan = WorkoutPlan {
            id,
            ..plan.clone()
        };
        stored.updated_at = Utc::now();
        Ok(())
    }

    fn delete(&mut self, id: Uuid) -> Result<()> {
        self.plans
            .remove(&id)
            .map(|_| ())
            .ok_or(Error::PlanNotFound(id))
    }
}

/// On-disk library format
#[derive(Debug, Default, Serialize, Deserialize)]
struct Library {
    #[serde(default)]
    plans: BTreeMap<Uuid, StoredPlan>,
}

/// Plan library stored as a single JSON file
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the library under a shared lock; a missing file is empty
    fn try_read_library(&self) -> Result<Library> {
        let path = &self.path;
        if !path.exists() {
            tracing::debug!("No plan library at {:?}, starting empty", path);
            return Ok(Library::default());
        }

        let file = File::open(path)?;
        file.lock_shared()?;
        let mut contents = Vec::new();
        let read = std::io::BufReader::new(&file).read_to_end(&mut contents);
        let _ = file.unlock();
        read?;

        let library: Library = serde_json::from_slice(&contents)?;
        tracing::debug!("Loaded {} plan(s) from {:?}", library.plans.len(), path);
        Ok(library)
    }

    /// Library for lookups; an unreadable or corrupted file reads as empty
    fn read_library(&self) -> Library {
        self.try_read_library().unwrap_or_else(|e| {
            tracing::warn!("Failed to read plan library {:?}: {}. Reading as empty.", self.path, e);
            Library::default()
        })
    }

    /// Library for a read-modify-write
    ///
    /// I/O failures are returned. A file that does not parse is moved aside
    /// so its bytes survive the rewrite.
    fn read_library_for_write(&self) -> Result<Library> {
        match self.try_read_library() {
            Err(Error::Json(e)) => {
                let backup = self.backup_path();
                std::fs::rename(&self.path, &backup)?;
                tracing::warn!(
                    "Plan library {:?} is corrupted ({}). Moved it to {:?}, starting empty.",
                    self.path,
                    e,
                    backup
                );
                Ok(Library::default())
            }
            other => other,
        }
    }

    fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".corrupt-{}", Utc::now().format("%Y%m%dT%H%M%S%.3f")));
        PathBuf::from(name)
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    /// Read, change and write the library while holding the library lock
    ///
    /// The lock lives in a sidecar file since the library itself is replaced
    /// on every write. Nothing is written when `change` fails.
    fn modify<T>(&self, change: impl FnOnce(&mut Library) -> Result<T>) -> Result<T> {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;
        lock.lock_exclusive()?;

        let result = self.read_change_write(change);

        let _ = lock.unlock();
        result
    }

    fn read_change_write<T>(&self, change: impl FnOnce(&mut Library) -> Result<T>) -> Result<T> {
        let mut library = self.read_library_for_write()?;
        let value = change(&mut library)?;
        self.write_library(&library)?;
        Ok(value)
    }

    /// Atomically replace the library file
    fn write_library(&self, library: &Library) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        // Same directory as the target so persist is a rename
        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            serde_json::to_writer(&mut writer, library)?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;
        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} plan(s) to {:?}", library.plans.len(), self.path);
        Ok(())
    }
}

impl ProgramStore for JsonFileStore {
    fn save(&mut self, plan: &WorkoutPlan) -> Result<Uuid> {
        self.modify(|library| {
            library.plans.insert(plan.id, StoredPlan::new(plan.clone()));
            Ok(())
        })?;
        tracing::info!("Saved plan {} ({})", plan.id, plan.title);
        Ok(plan.id)
    }

    fn list(&self) -> Result<Vec<StoredPlan>> {
        Ok(sorted(self.read_library().plans.into_values()))
    }

    fn get(&self, id: Uuid) -> Result<StoredPlan> {
        self.read_library()
            .plans
            .remove(&id)
            .ok_or(Error::PlanNotFound(id))
    }

    fn update(&mut self, id: Uuid, plan: &WorkoutPlan) -> Result<()> {
        self.modify(|library| {
            let stored = library.plans.get_mut(&id).ok_or(Error::PlanNotFound(id))?;
            stored.plan = WorkoutPlan {
                id,
                ..plan.clone()
            };
            stored.updated_at = Utc::now();
            Ok(())
        })
    }

    fn delete(&mut self, id: Uuid) -> Result<()> {
        self.modify(|library| {
            library
                .plans
                .remove(&id)
                .map(|_| ())
                .ok_or(Error::PlanNotFound(id))
        })?;
        tracing::info!("Deleted plan {}", id);
        Ok(())
    }
}
