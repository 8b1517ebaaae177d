//! Untyped table as produced by a `RawTableSource`.

/// Ordered headers plus ordered rows of string cells.
///
/// Construction through [`RawTable::new`] truncates the headers and every row
/// to the shortest observed width, so downstream code can index any cell
/// `< width()` without bounds surprises.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = rows
            .iter()
            .map(Vec::len)
            .min()
            .map_or(headers.len(), |shortest| shortest.min(headers.len()));

        let mut headers = headers;
        headers.truncate(width);

        let rows = rows
            .into_iter()
            .map(|mut r| {
                r.truncate(width);
                r
            })
            .collect();

        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.headers.is_empty()
    }

    /// Cell text, or `""` when the row is shorter than `col`.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Drop one column by index (no-op when out of range).
    pub fn drop_column(&mut self, col: usize) {
        if col >= self.headers.len() {
            return;
        }
        self.headers.remove(col);
        for r in &mut self.rows {
            if col < r.len() {
                r.remove(col);
            }
        }
    }
}
