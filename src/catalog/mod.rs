//! Reference catalogs (tags, technologies)
//!
//! - `entry`: the entry kinds and how aliases refer to them
//! - `repository`: loading catalog files and caching them per path
//! - `resolve`: finding the entry an alias refers to

pub mod entry;
pub mod repository;
pub mod resolve;

pub use entry::{CatalogEntry, Entry, Tag, Technology};
pub use repository::{Catalog, CatalogCache};
pub use resolve::{resolve, Resolved};
