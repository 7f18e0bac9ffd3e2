//! Ordered key-value map backed by a [left-leaning-red-black][llrb] tree.
//!
//! Apart from the usual map operations, every node tracks the size of its
//! subtree, which gives order-statistics: [`Llrb::rank`], [`Llrb::select`],
//! [`Llrb::floor`], [`Llrb::ceiling`] and counted range queries.
//!
//! [llrb]: https://en.wikipedia.org/wiki/Left-leaning_red-black_tree

mod depth;
mod error;
mod llrb;

pub use crate::depth::Depth;
pub use crate::error::Error;
pub use crate::llrb::{Comparator, Llrb, Stats};
