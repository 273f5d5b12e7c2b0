//! Brute-force keyspace indexing.
//!
//! Every password of a fixed length over a charset is identified by an
//! integer index, which lets the keyspace be split into disjoint
//! contiguous ranges without ever materializing it.

mod charset;
mod indexer;

pub use charset::{CharSet, DEFAULT_CHARSET};
pub use indexer::{Keyspace, KeyspaceIter, WorkUnit};
