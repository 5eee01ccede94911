use super::export::GenerationRecord;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Accumulates generation snapshots across a run and flushes them to disk on
/// demand. Owned by the driver and passed into each evolution cycle; there
/// is no process-wide save buffer.
#[derive(Debug, Default)]
pub struct EvaluationStore {
    pending: Vec<GenerationRecord>,
}

impl EvaluationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: GenerationRecord) {
        self.pending.push(record);
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Write every pending snapshot into one timestamped JSON file under
    /// `dir`, creating the directory if needed, and clear the buffer.
    /// Returns the path written.
    pub fn save_all<P: AsRef<Path>>(&mut self, dir: P) -> Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let filename = format!(
            "population_{}.json",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        );
        let path = dir.join(filename);

        write_records(&path, &self.pending)?;
        log::info!(
            "saved {} generation snapshots to {}",
            self.pending.len(),
            path.display()
        );

        self.pending.clear();
        Ok(path)
    }
}

/// Serialize a batch of generation snapshots to one pretty-printed JSON
/// file, overwriting it.
pub fn write_records<P: AsRef<Path>>(path: P, records: &[GenerationRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Read a batch of generation snapshots back from one JSON file.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<GenerationRecord>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_all_writes_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = EvaluationStore::new();
        store.add(GenerationRecord {
            gen_number: 0,
            trees: Vec::new(),
        });
        assert_eq!(store.pending_count(), 1);

        let path = store.save_all(dir.path()).unwrap();
        assert!(path.exists());
        assert_eq!(store.pending_count(), 0);

        let back = read_records(&path).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].gen_number, 0);
    }
}
