use bytes::Bytes;

/// One cell of an edgestore row: the column bytes and the value bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub column: Bytes,
    pub value: Bytes,
}

impl Column {
    pub fn new(column: impl Into<Bytes>, value: impl Into<Bytes>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// A full edgestore row: the row key and its columns in stored order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub key: Bytes,
    pub columns: Vec<Column>,
}

impl Row {
    pub fn new(key: impl Into<Bytes>, columns: Vec<Column>) -> Self {
        Self {
            key: key.into(),
            columns,
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
