use super::{RowIter, RowSource};
use crate::types::Row;

/// Row source backed by a vector of rows
#[derive(Debug, Clone, Default)]
pub struct MemoryRowSource {
    rows: Vec<Row>,
}

impl MemoryRowSource {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl RowSource for MemoryRowSource {
    fn rows(&self) -> RowIter<'_> {
        Box::new(self.rows.iter().cloned().map(Ok))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Column;

    #[test]
    fn test_rows_in_insertion_order() {
        let mut source = MemoryRowSource::default();
        source.push(Row::new(vec![2u8], vec![]));
        source.push(Row::new(vec![1u8], vec![Column::new(vec![0u8], vec![1u8])]));

        let rows: Vec<Row> = source.rows().map(Result::unwrap).collect();

        assert_eq!(source.len(), 2);
        assert_eq!(rows[0].key.as_ref(), &[2u8]);
        assert_eq!(rows[1].len(), 1);
    }
}
