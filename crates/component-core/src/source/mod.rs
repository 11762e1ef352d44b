//! Component sources on the remote hosting platform
//!
//! This module provides:
//! - Source URL parsing (owner / repo / branch / path)
//! - Contents-API listing types
//! - The directory fetcher that materializes a listing locally

pub mod fetcher;
pub mod listing;
pub mod location;

pub use fetcher::{DirectoryFetcher, FetchReport, FileWarning};
pub use listing::{EntryKind, Listing, RemoteEntry};
pub use location::SourceLocation;
