use std::ops::Index;

use log::debug;

use crate::errors::WindowError;
use crate::models::Window;

///
/// WindowTable struct, the ordered set of fixed-size windows tiling the
/// coordinate space `1..=max_bp`.
///
/// The table always holds `max_bp / window_size + 1` windows, so the last
/// window may end past `max_bp`. Windows are never clipped: every row has
/// `length == window_size`. The table is immutable once built.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowTable {
    windows: Vec<Window>,
    window_size: u32,
    max_bp: u32,
}

impl WindowTable {
    ///
    /// Build the window table covering a coordinate space.
    ///
    /// # Arguments:
    /// - window_size: number of base pairs per window
    /// - max_bp: declared size of the coordinate space
    ///
    pub fn build(window_size: u32, max_bp: u32) -> Result<Self, WindowError> {
        if window_size == 0 {
            return Err(WindowError::InvalidArgument(
                "window_size must be a positive integer".to_string(),
            ));
        }
        if max_bp == 0 {
            return Err(WindowError::InvalidArgument(
                "max_bp must be a positive integer".to_string(),
            ));
        }

        // the last window ends at n_windows * window_size
        let n_windows = (max_bp / window_size)
            .checked_add(1)
            .filter(|n| n.checked_mul(window_size).is_some())
            .ok_or_else(|| {
                WindowError::InvalidArgument(format!(
                    "window table for max_bp={} and window_size={} exceeds the coordinate range",
                    max_bp, window_size
                ))
            })?;

        let windows: Vec<Window> = (0..n_windows)
            .map(|i| Window {
                index: i + 1,
                start: i * window_size + 1,
                end: (i + 1) * window_size,
                length: window_size,
            })
            .collect();

        debug!(
            "Built {} windows of {} bp for max_bp={}",
            windows.len(),
            window_size,
            max_bp
        );

        Ok(WindowTable {
            windows,
            window_size,
            max_bp,
        })
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Window> {
        self.windows.iter()
    }

    pub fn get(&self, row: usize) -> Option<&Window> {
        self.windows.get(row)
    }

    pub fn window_size(&self) -> u32 {
        self.window_size
    }

    pub fn max_bp(&self) -> u32 {
        self.max_bp
    }

    ///
    /// Last coordinate covered by the table (end of the trailing window)
    ///
    pub fn last_end(&self) -> u32 {
        self.windows.last().map_or(0, |w| w.end)
    }

    ///
    /// Find the 0-based row of the window holding a 1-based position.
    ///
    /// Returns `None` for position `0` or for positions past [`last_end`](Self::last_end).
    ///
    pub fn locate(&self, position: u32) -> Option<usize> {
        if position == 0 || position > self.last_end() {
            return None;
        }
        Some(((position - 1) / self.window_size) as usize)
    }
}

impl Index<usize> for WindowTable {
    type Output = Window;

    fn index(&self, row: usize) -> &Window {
        &self.windows[row]
    }
}

impl<'a> IntoIterator for &'a WindowTable {
    type Item = &'a Window;
    type IntoIter = std::slice::Iter<'a, Window>;

    fn into_iter(self) -> Self::IntoIter {
        self.windows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case(5, 10, 3)]
    #[case(10, 20, 3)]
    #[case(10, 25, 3)]
    #[case(10, 9, 1)]
    #[case(1, 1, 2)]
    #[case(1000, 123_456, 124)]
    fn test_window_count(#[case] window_size: u32, #[case] max_bp: u32, #[case] expected: usize) {
        let table = WindowTable::build(window_size, max_bp).unwrap();
        assert_eq!(table.len(), expected);
        assert_eq!(table.len(), (max_bp / window_size + 1) as usize);
    }

    #[rstest]
    #[case(5, 10)]
    #[case(7, 100)]
    #[case(100, 99)]
    #[case(3, 3)]
    fn test_windows_are_contiguous_and_fixed_length(#[case] window_size: u32, #[case] max_bp: u32) {
        let table = WindowTable::build(window_size, max_bp).unwrap();

        assert_eq!(table[0].start, 1);
        for (i, w) in table.iter().enumerate() {
            assert_eq!(w.index as usize, i + 1);
            assert_eq!(w.length, window_size);
            assert_eq!(w.end - w.start + 1, window_size);
        }
        for pair in table.windows().windows(2) {
            assert_eq!(pair[1].start, pair[0].end + 1);
        }
    }

    #[rstest]
    fn test_exact_multiple_over_allocates() {
        let table = WindowTable::build(5, 10).unwrap();
        let rows: Vec<(u32, u32)> = table.iter().map(|w| (w.start, w.end)).collect();
        assert_eq!(rows, vec![(1, 5), (6, 10), (11, 15)]);
        assert_eq!(table.last_end(), 15);
        assert!(table.last_end() > table.max_bp());
    }

    #[rstest]
    #[case(0, 10)]
    #[case(10, 0)]
    #[case(0, 0)]
    fn test_non_positive_arguments_rejected(#[case] window_size: u32, #[case] max_bp: u32) {
        let result = WindowTable::build(window_size, max_bp);
        assert!(matches!(result, Err(WindowError::InvalidArgument(_))));
    }

    #[rstest]
    #[case(u32::MAX / 2 + 1, u32::MAX)]
    #[case(1, u32::MAX)]
    fn test_overflowing_table_rejected(#[case] window_size: u32, #[case] max_bp: u32) {
        let result = WindowTable::build(window_size, max_bp);
        assert!(matches!(result, Err(WindowError::InvalidArgument(_))));
    }

    #[rstest]
    #[case(1, Some(0))]
    #[case(5, Some(0))]
    #[case(6, Some(1))]
    #[case(15, Some(2))]
    #[case(16, None)]
    #[case(0, None)]
    fn test_locate(#[case] position: u32, #[case] expected: Option<usize>) {
        let table = WindowTable::build(5, 10).unwrap();
        assert_eq!(table.locate(position), expected);
    }

    #[rstest]
    fn test_build_is_pure() {
        assert_eq!(
            WindowTable::build(7, 50).unwrap(),
            WindowTable::build(7, 50).unwrap()
        );
    }
}
