//! Node identifiers.

use core::fmt;
use core::num::NonZeroU32;

/// Handle to a node in a frozen topology.
///
/// Ids are assigned densely from declaration order at load time, so an
/// id doubles as an index into the node slice of the graph that issued
/// it. Stored shifted by one in a `NonZeroU32` so `Option<NodeId>` is
/// still four bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(NonZeroU32);

impl NodeId {
    pub fn from_index(index: u32) -> Self {
        Self(NonZeroU32::new(index + 1).expect("node index below u32::MAX"))
    }

    pub fn index(self) -> u32 {
        self.0.get() - 1
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.index())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn optional_id_needs_no_extra_space() {
        assert_eq!(core::mem::size_of::<Option<NodeId>>(), 4);
    }

    #[test]
    fn display_prints_the_index() {
        let id = NodeId::from_index(7);
        assert_eq!(format!("{id}"), "7");
        assert_eq!(format!("{id:?}"), "NodeId(7)");
    }

    proptest! {
        #[test]
        fn index_survives_the_shift(i in 0u32..u32::MAX) {
            prop_assert_eq!(NodeId::from_index(i).index(), i);
        }
    }
}
