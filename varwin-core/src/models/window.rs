use std::fmt::{self, Display};

///
/// Window struct, one row of a [WindowTable](crate::models::WindowTable).
///
/// Coordinates are 1-based and inclusive on both ends.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub index: u32,
    pub start: u32,
    pub end: u32,
    pub length: u32,
}

impl Window {
    ///
    /// Number of positions shared with the inclusive interval `[start, end]`
    ///
    #[inline]
    pub fn overlap_len(&self, start: u32, end: u32) -> u32 {
        let lo = self.start.max(start);
        let hi = self.end.min(end);
        if lo > hi { 0 } else { hi - lo + 1 }
    }

    ///
    /// Get the tab separated row of the window
    ///
    pub fn as_string(&self) -> String {
        format!("{}\t{}\t{}\t{}", self.index, self.start, self.end, self.length)
    }
}

impl Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}
