/// RocksDB edgestore
///
/// Key space design:
/// - Cell: {row_key (8 bytes)}{column bytes} → value bytes
///
/// Every column of a row is one RocksDB entry, so a full scan returns the
/// cells of each row contiguously with columns in byte order.

use super::error::{StorageError, StorageResult};
use super::{RowIter, RowSource};
use crate::schema::id_manager::ROW_KEY_LEN;
use crate::types::{Column, Row};
use bytes::Bytes;
use rocksdb::{IteratorMode, Options, WriteBatch, DB};
use std::iter::Peekable;
use std::path::Path;
use tracing::debug;

/// RocksDB-backed edgestore
pub struct RocksDbEdgeStore {
    /// RocksDB database instance
    db: DB,
}

impl RocksDbEdgeStore {
    /// Open (or create) an edgestore
    ///
    /// # Arguments
    /// * `path` - Path to the database directory
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        let db = DB::open(&opts, path)?;
        Ok(Self { db })
    }

    /// Open an existing edgestore without write access
    pub fn open_read_only<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let opts = Options::default();
        let db = DB::open_for_read_only(&opts, path, false)?;
        Ok(Self { db })
    }

    /// Write all cells of a row in one batch
    pub fn write_row(&self, row: &Row) -> StorageResult<()> {
        check_row_key(&row.key)?;

        let mut batch = WriteBatch::default();
        for column in &row.columns {
            batch.put(make_cell_key(&row.key, &column.column), &column.value);
        }
        self.db.write(batch)?;
        Ok(())
    }

    /// Read a single row
    ///
    /// # Returns
    /// * `Ok(Some(row))` if the row has at least one cell
    /// * `Ok(None)` if the row is absent
    pub fn get_row(&self, key: &[u8]) -> StorageResult<Option<Row>> {
        check_row_key(key)?;

        let mut columns = Vec::new();
        for item in self.db.prefix_iterator(key) {
            let (cell_key, value) = item?;

            // Check if key still matches prefix
            if !cell_key.starts_with(key) {
                break;
            }

            columns.push(Column::new(
                Bytes::copy_from_slice(&cell_key[ROW_KEY_LEN..]),
                Bytes::from(value.into_vec()),
            ));
        }

        if columns.is_empty() {
            return Ok(None);
        }
        Ok(Some(Row::new(Bytes::copy_from_slice(key), columns)))
    }

    /// Flush and close the database
    pub fn close(self) -> StorageResult<()> {
        self.db.flush()?;
        debug!("Closed edgestore at {:?}", self.db.path());
        Ok(())
    }
}

impl RowSource for RocksDbEdgeStore {
    fn rows(&self) -> RowIter<'_> {
        Box::new(GroupedRows {
            cells: self.db.iterator(IteratorMode::Start).peekable(),
        })
    }
}

type Cell = Result<(Box<[u8]>, Box<[u8]>), rocksdb::Error>;

/// Groups consecutive cells sharing a row key into rows
struct GroupedRows<I: Iterator<Item = Cell>> {
    cells: Peekable<I>,
}

impl<I: Iterator<Item = Cell>> Iterator for GroupedRows<I> {
    type Item = StorageResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        let (cell_key, value) = match self.cells.next()? {
            Ok(cell) => cell,
            Err(e) => return Some(Err(e.into())),
        };
        if cell_key.len() < ROW_KEY_LEN {
            return Some(Err(StorageError::InvalidCellKey(cell_key.len())));
        }

        let row_key = Bytes::copy_from_slice(&cell_key[..ROW_KEY_LEN]);
        let mut columns = vec![cell_to_column(&cell_key, value)];

        while let Some(Ok((next_key, next_value))) = self.cells.next_if(|cell| {
            matches!(cell, Ok((k, _)) if k.len() >= ROW_KEY_LEN && k[..ROW_KEY_LEN] == row_key[..])
        }) {
            columns.push(cell_to_column(&next_key, next_value));
        }

        Some(Ok(Row::new(row_key, columns)))
    }
}

fn cell_to_column(cell_key: &[u8], value: Box<[u8]>) -> Column {
    Column::new(
        Bytes::copy_from_slice(&cell_key[ROW_KEY_LEN..]),
        Bytes::from(value.into_vec()),
    )
}

fn make_cell_key(row_key: &[u8], column: &[u8]) -> Vec<u8> {
    let mut key = Vec::with_capacity(row_key.len() + column.len());
    key.extend_from_slice(row_key);
    key.extend_from_slice(column);
    key
}

fn check_row_key(key: &[u8]) -> StorageResult<()> {
    if key.len() != ROW_KEY_LEN {
        return Err(StorageError::InvalidRowKey {
            expected: ROW_KEY_LEN,
            actual: key.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (RocksDbEdgeStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = RocksDbEdgeStore::open(temp_dir.path()).unwrap();
        (store, temp_dir)
    }

    fn row(id: u64, columns: &[(&str, &str)]) -> Row {
        Row::new(
            id.to_be_bytes().to_vec(),
            columns
                .iter()
                .map(|(c, v)| Column::new(c.as_bytes().to_vec(), v.as_bytes().to_vec()))
                .collect(),
        )
    }

    #[test]
    fn test_write_and_get_row() {
        let (store, _temp) = create_test_store();

        store.write_row(&row(8, &[("b", "2"), ("a", "1")])).unwrap();

        let read = store.get_row(&8u64.to_be_bytes()).unwrap().unwrap();
        // Columns come back in byte order
        assert_eq!(read, row(8, &[("a", "1"), ("b", "2")]));

        assert!(store.get_row(&16u64.to_be_bytes()).unwrap().is_none());
    }

    #[test]
    fn test_scan_groups_cells_by_row() {
        let (store, _temp) = create_test_store();

        store.write_row(&row(16, &[("x", "1")])).unwrap();
        store.write_row(&row(8, &[("a", "1"), ("b", "2"), ("c", "3")])).unwrap();
        store.write_row(&row(24, &[("y", "1"), ("z", "2")])).unwrap();

        let rows: Vec<Row> = store.rows().map(Result::unwrap).collect();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].key.as_ref(), &8u64.to_be_bytes());
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[1].len(), 1);
        assert_eq!(rows[2].len(), 2);
        assert_eq!(rows[2].columns[1].value.as_ref(), b"2");
    }

    #[test]
    fn test_invalid_row_key() {
        let (store, _temp) = create_test_store();

        let result = store.write_row(&Row::new(vec![1u8, 2, 3], vec![]));
        assert!(matches!(
            result,
            Err(StorageError::InvalidRowKey { expected: 8, actual: 3 })
        ));
    }

    #[test]
    fn test_reopen_read_only() {
        let temp_dir = TempDir::new().unwrap();
        {
            let store = RocksDbEdgeStore::open(temp_dir.path()).unwrap();
            store.write_row(&row(8, &[("a", "1")])).unwrap();
            store.close().unwrap();
        }

        let store = RocksDbEdgeStore::open_read_only(temp_dir.path()).unwrap();
        assert_eq!(store.rows().count(), 1);
    }

    #[test]
    fn test_empty_store() {
        let (store, _temp) = create_test_store();
        assert_eq!(store.rows().count(), 0);
    }
}
