//! `ev-catalog`: the immutable table of areas every query runs against.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`catalog`]  | `AreaCatalog` (validated, name-indexed, read-only)        |
//! | [`loader`]   | `load_catalog_csv`, `load_catalog_reader`, header aliases |
//! | [`source`]   | `CatalogSource` (`Embedded` or `Csv(path)`)               |
//! | [`error`]    | `CatalogError`, `CatalogResult<T>`                        |
//!
//! A catalog is built once at startup.  Any schema or validation failure is
//! returned as a [`CatalogError`]; nothing is silently substituted.

pub mod catalog;
pub mod error;
pub mod loader;
pub mod source;

#[cfg(test)]
mod tests;

pub use catalog::AreaCatalog;
pub use error::{CatalogError, CatalogResult};
pub use loader::{load_catalog_csv, load_catalog_reader};
pub use source::CatalogSource;
