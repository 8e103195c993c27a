#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

#[cfg(feature = "tracing")]
macro_rules! trace {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "lazy_cursor", $($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

mod error;
mod cursor;
mod source;
mod peekable;
mod combinator;
mod coerce;
mod consume;

pub use error::{Error, Result};
pub use cursor::{from_std, Cursor, Iter, IterCursor, PeekCursor};
pub use source::{entries, keys, values, Entries, Entry, Exact, Keys, Mapping, Seq, Values};
pub use peekable::{peekable, IntoPeekable, Peekable};
pub use combinator::{Filter, Map};
pub use coerce::{to_cursor, IntoCursor, Json, OwnedEntries};
pub use consume::{each, filter, fold, map, project, reduce, to_map, to_vec, Field, IntoEntry};
