//! Strongly-typed index newtypes.
//!
//! Keeps per-node parameter lookups from being confused with species
//! positions inside a [`SpeciesVector`](super::SpeciesVector).

use std::fmt;

/// Radial node index.
///
/// Selects which interface's geometric coefficients are read from the
/// per-node arrays of a radial parameter set.
///
/// # Example
///
/// ```
/// use pemfc_transport::types::NodeIndex;
///
/// let node = NodeIndex::new(3);
/// assert_eq!(node.get(), 3);
/// assert_eq!(node.to_string(), "N3");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// First index (0).
    pub const ZERO: Self = Self(0);

    /// Create a new index.
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw index value.
    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Increment index by one.
    #[inline]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Create an iterator over [0, n) node indices.
    ///
    /// ```
    /// use pemfc_transport::types::NodeIndex;
    ///
    /// let indices: Vec<_> = NodeIndex::iter(4).collect();
    /// assert_eq!(indices.len(), 4);
    /// assert_eq!(indices[3].get(), 3);
    /// ```
    pub fn iter(n: usize) -> impl ExactSizeIterator<Item = NodeIndex> {
        (0..n).map(NodeIndex)
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

impl From<usize> for NodeIndex {
    #[inline]
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl From<NodeIndex> for usize {
    #[inline]
    fn from(idx: NodeIndex) -> usize {
        idx.0
    }
}
