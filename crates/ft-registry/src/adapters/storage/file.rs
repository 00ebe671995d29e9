use super::memory::{apply_batch, scan};
use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{BatchOperation, KeyValueStore, ScanResult};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File-backed key-value store.
///
/// Keeps the whole map in memory and rewrites the file on every write.
/// Each write goes to a temp file that is synced and then renamed over the
/// data file, so a crash leaves either the old or the new state on disk.
///
/// File format: `[key_len:u32 LE][key][value_len:u32 LE][value]...`
pub struct FileBackedKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
    path: PathBuf,
}

impl FileBackedKVStore {
    /// Open the store at `path`, loading any existing contents.
    ///
    /// A missing file is an empty store. A truncated or malformed file is
    /// reported as corruption rather than partially loaded.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, KVStoreError> {
        let path = path.as_ref().to_path_buf();

        let data = match std::fs::read(&path) {
            Ok(bytes) => {
                let data = decode(&bytes)?;
                info!(
                    path = %path.display(),
                    bytes = bytes.len(),
                    keys = data.len(),
                    "Loaded storage file"
                );
                data
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No existing storage file, starting empty");
                BTreeMap::new()
            }
            Err(e) => return Err(io_error(e)),
        };

        Ok(Self { data, path })
    }

    /// Path of the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist `data` and, only once it is on disk, make it current.
    fn commit(&mut self, data: BTreeMap<Vec<u8>, Vec<u8>>) -> Result<(), KVStoreError> {
        self.save_to_file(&data)?;
        self.data = data;
        Ok(())
    }

    fn save_to_file(&self, data: &BTreeMap<Vec<u8>, Vec<u8>>) -> Result<(), KVStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_error)?;
            }
        }

        let bytes = encode(data)?;

        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(io_error)?;
        file.write_all(&bytes).map_err(io_error)?;
        file.sync_all().map_err(io_error)?;
        std::fs::rename(&temp_path, &self.path).map_err(io_error)?;

        debug!(path = %self.path.display(), bytes = bytes.len(), "Storage file written");
        Ok(())
    }
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.atomic_batch_write(vec![BatchOperation::put(key, value)])
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.atomic_batch_write(vec![BatchOperation::delete(key)])
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        let mut next = self.data.clone();
        apply_batch(&mut next, operations);
        self.commit(next)
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        Ok(scan(&self.data, prefix))
    }
}

fn io_error(e: std::io::Error) -> KVStoreError {
    KVStoreError::IOError {
        message: e.to_string(),
    }
}

fn encode(data: &BTreeMap<Vec<u8>, Vec<u8>>) -> Result<Vec<u8>, KVStoreError> {
    let mut bytes = Vec::new();
    for (key, value) in data {
        for field in [key, value] {
            let len = u32::try_from(field.len()).map_err(|_| KVStoreError::IOError {
                message: format!("entry of {} bytes exceeds the file format limit", field.len()),
            })?;
            bytes.extend_from_slice(&len.to_le_bytes());
            bytes.extend_from_slice(field);
        }
    }
    Ok(bytes)
}

fn decode(bytes: &[u8]) -> Result<BTreeMap<Vec<u8>, Vec<u8>>, KVStoreError> {
    let mut data = BTreeMap::new();
    let mut cursor = 0;

    while cursor < bytes.len() {
        let key = read_field(bytes, &mut cursor)?;
        let value = read_field(bytes, &mut cursor)?;
        data.insert(key, value);
    }

    Ok(data)
}

fn read_field(bytes: &[u8], cursor: &mut usize) -> Result<Vec<u8>, KVStoreError> {
    let truncated = |at: usize| KVStoreError::CorruptionError {
        message: format!("storage file truncated at byte {at}"),
    };

    let len_end = cursor.checked_add(4).ok_or_else(|| truncated(*cursor))?;
    let len_bytes: [u8; 4] = bytes
        .get(*cursor..len_end)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| truncated(*cursor))?;
    let len = u32::from_le_bytes(len_bytes) as usize;

    let end = len_end.checked_add(len).ok_or_else(|| truncated(len_end))?;
    let field = bytes.get(len_end..end).ok_or_else(|| truncated(len_end))?;
    *cursor = end;
    Ok(field.to_vec())
}
