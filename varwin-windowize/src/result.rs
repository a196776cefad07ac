use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use varwin_core::errors::WindowError;
use varwin_core::models::{Window, WindowTable};

/// A named per-window count column, aligned by row with the window table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountColumn {
    pub name: String,
    pub values: Vec<u32>,
}

///
/// A window table extended with one or more count columns.
///
/// Every column has exactly one value per window. The table itself is a copy of
/// the one the aggregator was given and is never modified.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationResult {
    table: WindowTable,
    columns: Vec<CountColumn>,
}

/// One row of an [AggregationResult]: the window and its counts in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow<'a> {
    pub window: &'a Window,
    pub counts: Vec<(&'a str, u32)>,
}

impl AggregationResult {
    pub(crate) fn new(table: &WindowTable, columns: Vec<CountColumn>) -> Self {
        debug_assert!(columns.iter().all(|c| c.values.len() == table.len()));
        AggregationResult {
            table: table.clone(),
            columns,
        }
    }

    pub fn table(&self) -> &WindowTable {
        &self.table
    }

    pub fn columns(&self) -> &[CountColumn] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Values of the named column, if present.
    pub fn column(&self, name: &str) -> Option<&[u32]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    ///
    /// Combine the columns of two results computed over the same window table.
    ///
    /// Fails with `InvalidArgument` if the tables differ or a column name
    /// appears in both results.
    ///
    pub fn join(mut self, other: AggregationResult) -> Result<Self, WindowError> {
        if self.table != other.table {
            return Err(WindowError::InvalidArgument(
                "cannot join results computed over different window tables".to_string(),
            ));
        }
        for column in other.columns {
            if self.column(&column.name).is_some() {
                return Err(WindowError::InvalidArgument(format!(
                    "column `{}` is present in both results",
                    column.name
                )));
            }
            self.columns.push(column);
        }
        Ok(self)
    }

    pub fn rows(&self) -> impl Iterator<Item = ResultRow<'_>> {
        self.table.iter().enumerate().map(move |(row, window)| ResultRow {
            window,
            counts: self
                .columns
                .iter()
                .map(|c| (c.name.as_str(), c.values[row]))
                .collect(),
        })
    }

    ///
    /// Fraction of G/C among unambiguous bases (A, C, G, T) in each window.
    ///
    /// Returns `None` when the result carries no sequence composition columns.
    /// Windows without any unambiguous base get `None`.
    ///
    pub fn gc_fraction(&self) -> Option<Vec<Option<f64>>> {
        let a = self.column("A")?;
        let c = self.column("C")?;
        let g = self.column("G")?;
        let t = self.column("T")?;

        let fractions = (0..self.table.len())
            .map(|i| {
                let gc = c[i] as u64 + g[i] as u64;
                let total = gc + a[i] as u64 + t[i] as u64;
                if total == 0 {
                    None
                } else {
                    Some(gc as f64 / total as f64)
                }
            })
            .collect();
        Some(fractions)
    }
}

impl Serialize for ResultRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4 + self.counts.len()))?;
        map.serialize_entry("index", &self.window.index)?;
        map.serialize_entry("start", &self.window.start)?;
        map.serialize_entry("end", &self.window.end)?;
        map.serialize_entry("length", &self.window.length)?;
        for (name, value) in &self.counts {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl Serialize for AggregationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.table.len()))?;
        for row in self.rows() {
            seq.serialize_element(&row)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn table() -> WindowTable {
        WindowTable::build(5, 10).unwrap()
    }

    fn column(name: &str, values: Vec<u32>) -> CountColumn {
        CountColumn {
            name: name.to_string(),
            values,
        }
    }

    #[rstest]
    fn test_column_lookup(table: WindowTable) {
        let result = AggregationResult::new(&table, vec![column("variants", vec![3, 2, 1])]);
        assert_eq!(result.column("variants"), Some(&[3, 2, 1][..]));
        assert_eq!(result.column("genic"), None);
        assert_eq!(result.table(), &table);
    }

    #[rstest]
    fn test_join_same_table(table: WindowTable) {
        let left = AggregationResult::new(&table, vec![column("variants", vec![3, 2, 1])]);
        let right = AggregationResult::new(&table, vec![column("genic", vec![0, 5, 5])]);

        let joined = left.join(right).unwrap();
        assert_eq!(joined.column_names(), vec!["variants", "genic"]);
    }

    #[rstest]
    fn test_join_rejects_different_tables(table: WindowTable) {
        let other = WindowTable::build(5, 20).unwrap();
        let left = AggregationResult::new(&table, vec![column("variants", vec![0; 3])]);
        let right = AggregationResult::new(&other, vec![column("genic", vec![0; 5])]);
        assert!(matches!(
            left.join(right),
            Err(WindowError::InvalidArgument(_))
        ));
    }

    #[rstest]
    fn test_join_rejects_duplicate_columns(table: WindowTable) {
        let left = AggregationResult::new(&table, vec![column("variants", vec![0; 3])]);
        let right = AggregationResult::new(&table, vec![column("variants", vec![1; 3])]);
        assert!(left.join(right).is_err());
    }

    #[rstest]
    fn test_rows(table: WindowTable) {
        let result = AggregationResult::new(&table, vec![column("variants", vec![3, 2, 1])]);
        let rows: Vec<ResultRow> = result.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].window.start, 6);
        assert_eq!(rows[1].counts, vec![("variants", 2)]);
    }

    #[rstest]
    fn test_serialize_rows_as_objects(table: WindowTable) {
        let result = AggregationResult::new(&table, vec![column("variants", vec![3, 2, 1])]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json[0],
            serde_json::json!({"index": 1, "start": 1, "end": 5, "length": 5, "variants": 3})
        );
        assert_eq!(json.as_array().unwrap().len(), 3);
    }

    #[rstest]
    fn test_gc_fraction(table: WindowTable) {
        let result = AggregationResult::new(
            &table,
            vec![
                column("A", vec![1, 0, 0]),
                column("C", vec![1, 0, 2]),
                column("G", vec![1, 0, 2]),
                column("T", vec![1, 0, 0]),
            ],
        );
        assert_eq!(result.gc_fraction(), Some(vec![Some(0.5), None, Some(1.0)]));
    }

    #[rstest]
    fn test_gc_fraction_without_sequence_columns(table: WindowTable) {
        let result = AggregationResult::new(&table, vec![column("variants", vec![0; 3])]);
        assert_eq!(result.gc_fraction(), None);
    }
}
