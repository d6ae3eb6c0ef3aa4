//! Managed block editing for gitws.
//!
//! A managed block is a region of a shared, human-edited config file bounded
//! by a start and an end marker line:
//!
//! ```text
//! # >>> gws work >>> DO NOT EDIT
//! Host github.com-work
//!   ...
//! # <<< gws work <<<
//! ```
//!
//! Everything between (and including) the markers belongs to gitws and may be
//! rewritten at will; everything outside belongs to the user and is preserved
//! byte for byte.
//!
//! - [`markers`] derives marker pairs from a namespace, in one place, so that
//!   every run targets the same region.
//! - [`editor`] implements the pure text transforms: upsert, extract, remove.

pub mod editor;
pub mod markers;

pub use editor::{BlockSpan, Lookup, Upsert, UpsertAction, extract, locate, remove, upsert};
pub use markers::{MarkerPair, Namespace, marker_pair};
