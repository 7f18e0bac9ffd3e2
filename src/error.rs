use std::{error, fmt};

/// Error enumerates over all possible errors that this package
/// shall return.
#[derive(Debug, PartialEq)]
pub enum Error<K> {
    /// Returned by del_min() and del_max() APIs when the tree is empty.
    EmptyTree,
    /// Returned by create() and load_from() APIs when key is already present.
    OverwriteKey,
    /// Fatal case, a red node has a red child.
    ConsecutiveReds(K),
    /// Fatal case, node has a red right-link.
    RightLeaning(K),
    /// Fatal case, number of blacks differ between two paths. The String
    /// component of this variant can be used for debugging.
    UnbalancedBlacks(String),
    /// Fatal case, index entries are not in sort-order.
    SortError(K, K),
    /// Fatal case, subtree size under key, (found, expected).
    SizeMismatch(K, usize, usize),
    /// Fatal case, rank(select(i)) returned (i, rank).
    RankMismatch(usize, usize),
    /// Fatal case, select(rank(key)) returned another key, (key, selected).
    SelectMismatch(K, K),
    /// Fatal case, select(i) found no key for an in-range rank.
    SelectMissing(usize),
}

impl<K> fmt::Display for Error<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::EmptyTree => write!(f, "empty tree"),
            Error::OverwriteKey => write!(f, "key already present"),
            Error::ConsecutiveReds(key) => {
                write!(f, "consecutive reds at {:?}", key)
            }
            Error::RightLeaning(key) => {
                write!(f, "red right-link under {:?}", key)
            }
            Error::UnbalancedBlacks(msg) => write!(f, "unbalanced blacks, {}", msg),
            Error::SortError(key, parent) => {
                write!(f, "key {:?} out of order under {:?}", key, parent)
            }
            Error::SizeMismatch(key, found, expected) => write!(
                f,
                "size at {:?} is {}, expected {}",
                key, found, expected
            ),
            Error::RankMismatch(i, rank) => {
                write!(f, "rank(select({})) returned {}", i, rank)
            }
            Error::SelectMismatch(key, other) => {
                write!(f, "select(rank({:?})) returned {:?}", key, other)
            }
            Error::SelectMissing(i) => write!(f, "select({}) returned none", i),
        }
    }
}

impl<K> error::Error for Error<K> where K: fmt::Debug {}
