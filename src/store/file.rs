/// Backing file management
///
/// Owns the in-memory inventory and its CSV file. The file is read once when
/// the store is opened and fully rewritten on every save.

use crate::core::normalizer::{normalize, parse_count};
use crate::error::{LedgerError, Result};
use crate::store::models::*;
use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Inventory backed by a CSV file
#[derive(Debug)]
pub struct InventoryStore {
    path: PathBuf,
    options: StoreOptions,
    pub(crate) entries: Vec<InventoryRecord>,
    pub(crate) index: HashMap<String, usize>,
    pub(crate) dirty: bool,
}

impl InventoryStore {
    /// Open the store at `path`, loading whatever is there
    ///
    /// # Arguments
    /// * `path` - Path to the CSV file (doesn't need to exist yet)
    /// * `options` - Load and flush policies
    ///
    /// # Returns
    /// * `Ok(InventoryStore)` - Store holding the file's contents (or nothing)
    /// * `Err(LedgerError)` - Unreadable file, bad header, or a bad row under `LoadPolicy::Strict`
    ///
    /// # Examples
    /// ```no_run
    /// use card_ledger_lib::store::{InventoryStore, StoreOptions};
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let store = InventoryStore::open("CardList.csv", StoreOptions::default())?;
    /// println!("{} cards", store.list().len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn open<P: AsRef<Path>>(path: P, options: StoreOptions) -> Result<Self> {
        let mut store = Self {
            path: path.as_ref().to_path_buf(),
            options,
            entries: Vec::new(),
            index: HashMap::new(),
            dirty: false,
        };

        store.entries = store.load()?;
        store.index = store
            .entries
            .iter()
            .enumerate()
            .map(|(i, record)| (record.name.clone(), i))
            .collect();

        Ok(store)
    }

    /// Read the backing file
    ///
    /// Names are normalized on the way in. A missing file is an empty
    /// inventory. If two rows normalize to the same name the later one wins
    /// and keeps the earlier one's position.
    pub fn load(&self) -> Result<Vec<InventoryRecord>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "card list not found, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            // zero-byte file
            return Ok(Vec::new());
        }

        let name_idx = column_index(&headers, NAME_COLUMN)?;
        let count_idx = column_index(&headers, COUNT_COLUMN)?;

        let mut records: Vec<InventoryRecord> = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for result in reader.records() {
            let parsed = match result {
                Ok(row) => {
                    let line = row.position().map(|p| p.line()).unwrap_or_default();
                    parse_row(&row, name_idx, count_idx).map_err(|reason| (line, reason))
                }
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    let line = e.position().map(|p| p.line()).unwrap_or_default();
                    Err((line, e.to_string()))
                }
            };

            let record = match parsed {
                Ok(record) => record,
                Err((line, reason)) => match self.options.load_policy {
                    LoadPolicy::Strict => return Err(LedgerError::MalformedRow { line, reason }),
                    LoadPolicy::SkipInvalid => {
                        warn!(line, %reason, "skipping malformed row, it will be dropped on next save");
                        continue;
                    }
                },
            };

            match seen.get(&record.name) {
                Some(&i) => {
                    warn!(name = %record.name, "duplicate card name, keeping the later count");
                    records[i].count = record.count;
                }
                None => {
                    seen.insert(record.name.clone(), records.len());
                    records.push(record);
                }
            }
        }

        debug!(path = %self.path.display(), items = records.len(), "loaded card list");
        Ok(records)
    }

    /// Rewrite the backing file from memory
    pub fn save(&mut self) -> Result<()> {
        self.write_records(&self.entries)?;
        self.dirty = false;
        Ok(())
    }

    /// Persist pending changes, if any
    ///
    /// Always a no-op under `FlushPolicy::WriteThrough`.
    pub fn flush(&mut self) -> Result<()> {
        if self.dirty {
            self.save()?;
        }
        Ok(())
    }

    /// Write `records` to a temp file next to the target, then rename it over
    /// the target. A failed write leaves the old file in place.
    pub(crate) fn write_records(&self, records: &[InventoryRecord]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = csv::WriterBuilder::new()
                .terminator(csv::Terminator::CRLF)
                .from_writer(tmp.as_file_mut());

            writer.write_record([NAME_COLUMN, COUNT_COLUMN])?;
            for record in records {
                writer.write_record([record.name.as_str(), record.count.to_string().as_str()])?;
            }
            writer.flush()?;
        }

        // NamedTempFile is created 0600; keep whatever the old file had
        if let Ok(meta) = fs::metadata(&self.path) {
            tmp.as_file().set_permissions(meta.permissions())?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!(path = %self.path.display(), items = records.len(), "saved card list");
        Ok(())
    }

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    /// True when memory holds changes the file doesn't
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Get store statistics
    pub fn stats(&self) -> StoreStats {
        let last_modified = fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Local>::from);

        StoreStats {
            total_items: self.entries.len(),
            total_count: self.entries.iter().map(|r| i128::from(r.count)).sum(),
            path: self.path.clone(),
            last_modified,
            unsaved_changes: self.dirty,
        }
    }
}

fn column_index(headers: &csv::StringRecord, column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}') == column)
        .ok_or_else(|| LedgerError::MalformedHeader(format!("missing column '{}'", column)))
}

fn parse_row(
    row: &csv::StringRecord,
    name_idx: usize,
    count_idx: usize,
) -> std::result::Result<InventoryRecord, String> {
    let name = row
        .get(name_idx)
        .ok_or_else(|| format!("missing {} column", NAME_COLUMN))?;
    let count = row
        .get(count_idx)
        .ok_or_else(|| format!("missing {} column", COUNT_COLUMN))?;

    let name = normalize(name);
    if name.trim().is_empty() {
        return Err("empty card name".to_string());
    }

    let count = parse_count(count).map_err(|_| format!("count '{}' is not an integer", count))?;

    Ok(InventoryRecord { name, count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("CardList.csv");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let store =
            InventoryStore::open(temp.path().join("nope.csv"), StoreOptions::default()).unwrap();

        assert!(store.list().is_empty());
        assert!(!temp.path().join("nope.csv").exists());
    }

    #[test]
    fn test_empty_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "");

        let store = InventoryStore::open(&path, StoreOptions::default()).unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_load_normalizes_names() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "CardName,Count\r\nＦｏｏ,2\r\nﾌﾞﾙｰｱｲｽﾞ,1\r\n");

        let store = InventoryStore::open(&path, StoreOptions::default()).unwrap();
        assert_eq!(
            store.list(),
            &[
                InventoryRecord::new("Foo", 2),
                InventoryRecord::new("ブルーアイズ", 1)
            ]
        );
    }

    #[test]
    fn test_load_columns_by_header_name() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "\u{feff}Count,CardName\n4,Dark Magician\n");

        let store = InventoryStore::open(&path, StoreOptions::default()).unwrap();
        assert_eq!(store.list(), &[InventoryRecord::new("Dark Magician", 4)]);
    }

    #[test]
    fn test_load_duplicate_names_last_wins() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "CardName,Count\nFoo,1\nBar,5\nＦｏｏ,7\n");

        let store = InventoryStore::open(&path, StoreOptions::default()).unwrap();
        assert_eq!(
            store.list(),
            &[InventoryRecord::new("Foo", 7), InventoryRecord::new("Bar", 5)]
        );
    }

    #[test]
    fn test_skip_invalid_rows() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "CardName,Count\nFoo,1\nBar,lots\nBaz\n,3\nQux,2\n");

        let store = InventoryStore::open(&path, StoreOptions::default()).unwrap();
        assert_eq!(
            store.list(),
            &[InventoryRecord::new("Foo", 1), InventoryRecord::new("Qux", 2)]
        );
    }

    #[test]
    fn test_strict_rejects_invalid_row() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "CardName,Count\nFoo,1\nBar,lots\n");

        let options = StoreOptions {
            load_policy: LoadPolicy::Strict,
            ..StoreOptions::default()
        };

        match InventoryStore::open(&path, options) {
            Err(LedgerError::MalformedRow { line, .. }) => assert_eq!(line, 3),
            other => panic!("Expected MalformedRow error, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_header_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "Name,Qty\nFoo,1\n");

        let result = InventoryStore::open(&path, StoreOptions::default());
        assert!(matches!(result, Err(LedgerError::MalformedHeader(_))));
    }

    #[test]
    fn test_save_format() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("CardList.csv");
        let mut store = InventoryStore::open(&path, StoreOptions::default()).unwrap();

        store.entries = vec![
            InventoryRecord::new("Foo", 2),
            InventoryRecord::new("Red, White", 1),
        ];
        store.save().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines, vec!["CardName,Count", "Foo,2", "\"Red, White\",1"]);
    }

    #[test]
    fn test_save_empty_writes_header() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("CardList.csv");
        let mut store = InventoryStore::open(&path, StoreOptions::default()).unwrap();

        store.save().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.trim_end(), "CardName,Count");
    }

    #[test]
    fn test_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("CardList.csv");
        let mut store = InventoryStore::open(&path, StoreOptions::default()).unwrap();

        store.entries = vec![
            InventoryRecord::new("Foo", 2),
            InventoryRecord::new("Quoted \"name\"", -1),
            InventoryRecord::new("ブルーアイズ", 3),
            InventoryRecord::new("Red, White", 10),
        ];
        store.save().unwrap();

        let reloaded = InventoryStore::open(&path, StoreOptions::default()).unwrap();
        let mut expected = store.list().to_vec();
        let mut actual = reloaded.list().to_vec();
        expected.sort_by(|a, b| a.name.cmp(&b.name));
        actual.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_stats() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "CardName,Count\nFoo,2\nBar,3\n");

        let store = InventoryStore::open(&path, StoreOptions::default()).unwrap();
        let stats = store.stats();

        assert_eq!(stats.total_items, 2);
        assert_eq!(stats.total_count, 5);
        assert!(stats.last_modified.is_some());
        assert!(!stats.unsaved_changes);
    }

    #[test]
    fn test_stats_total_beyond_i64() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "CardName,Count\nA,9223372036854775807\nB,1\n");

        let store = InventoryStore::open(&path, StoreOptions::default()).unwrap();
        let stats = store.stats();

        assert_eq!(stats.total_items, 2);
        assert_eq!(stats.total_count, i128::from(i64::MAX) + 1);
    }

    #[test]
    fn test_skipped_rows_gone_after_save() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "CardName,Count\nFoo,1\nBar,lots\n");

        let mut store = InventoryStore::open(&path, StoreOptions::default()).unwrap();
        store.update_count("Foo", 1).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("Bar"));
        assert_eq!(contents.lines().collect::<Vec<_>>(), vec!["CardName,Count", "Foo,2"]);
    }
}
