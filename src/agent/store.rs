use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::PathBuf;

use super::table::ValueTable;
use crate::error::StoreError;

/// Where value tables live between runs, keyed by agent id.
pub trait TableStore {
    /// `Ok(None)` means no table was ever stored for this agent.
    fn load(&self, agent_id: usize) -> Result<Option<ValueTable>, StoreError>;

    fn save(&mut self, agent_id: usize, table: &ValueTable) -> Result<(), StoreError>;
}

/// One bincode file per agent inside `dir`.
#[derive(Debug, Clone)]
pub struct FileTableStore {
    dir: PathBuf,
}

impl FileTableStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, agent_id: usize) -> PathBuf {
        self.dir.join(format!("agent_{}_qtable.bin", agent_id + 1))
    }
}

impl TableStore for FileTableStore {
    fn load(&self, agent_id: usize) -> Result<Option<ValueTable>, StoreError> {
        let file = match File::open(self.path_for(agent_id)) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let table = bincode::deserialize_from(BufReader::new(file))?;
        Ok(Some(table))
    }

    fn save(&mut self, agent_id: usize, table: &ValueTable) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let file = File::create(self.path_for(agent_id))?;
        bincode::serialize_into(BufWriter::new(file), table)?;
        Ok(())
    }
}

/// Keeps tables in process memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryTableStore {
    tables: HashMap<usize, ValueTable>,
}

impl MemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl TableStore for MemoryTableStore {
    fn load(&self, agent_id: usize) -> Result<Option<ValueTable>, StoreError> {
        Ok(self.tables.get(&agent_id).cloned())
    }

    fn save(&mut self, agent_id: usize, table: &ValueTable) -> Result<(), StoreError> {
        self.tables.insert(agent_id, table.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut store = FileTableStore::new(dir.path().join("tables"));

        let mut table = ValueTable::zeros(6);
        table.set(3, Action::Right, 0.25);
        table.set(5, Action::PlaceBomb, -4.5);

        store.save(0, &table).unwrap();
        assert!(store.path_for(0).ends_with("agent_1_qtable.bin"));

        let loaded = store.load(0).unwrap().unwrap();
        assert_eq!(loaded, table);
    }

    #[test]
    fn test_file_store_missing_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileTableStore::new(dir.path());
        assert!(store.load(3).unwrap().is_none());
    }

    #[test]
    fn test_file_store_corrupt_is_error() {
        let dir = TempDir::new().unwrap();
        let store = FileTableStore::new(dir.path());
        fs::write(store.path_for(0), b"not a table").unwrap();

        assert!(store.load(0).is_err());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryTableStore::new();
        assert!(store.load(0).unwrap().is_none());

        store.save(0, &ValueTable::zeros(4)).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.load(0).unwrap(), Some(ValueTable::zeros(4)));
    }
}
