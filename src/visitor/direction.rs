use serde::{Deserialize, Serialize};
use std::iter::Rev;

/// Order in which a traversal walks every calendar level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeekDirection {
    #[default]
    Forward,
    Backward,
}

impl SeekDirection {
    pub fn reversed(self) -> Self {
        match self {
            SeekDirection::Forward => SeekDirection::Backward,
            SeekDirection::Backward => SeekDirection::Forward,
        }
    }

    /// The direction to walk for a signed offset: negative offsets flip it.
    pub fn for_offset(self, offset: i64) -> Self {
        if offset < 0 { self.reversed() } else { self }
    }

    /// Yields `iter` ascending for `Forward` and descending for `Backward`.
    pub fn order<I: DoubleEndedIterator>(self, iter: I) -> Ordered<I> {
        match self {
            SeekDirection::Forward => Ordered::Ascending(iter),
            SeekDirection::Backward => Ordered::Descending(iter.rev()),
        }
    }
}

/// Iterator returned by [`SeekDirection::order`].
pub enum Ordered<I> {
    Ascending(I),
    Descending(Rev<I>),
}

impl<I: DoubleEndedIterator> Iterator for Ordered<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Ordered::Ascending(iter) => iter.next(),
            Ordered::Descending(iter) => iter.next(),
        }
    }
}
