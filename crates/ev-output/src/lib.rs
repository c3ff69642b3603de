//! `ev-output`: route records for presentation layers.
//!
//! Two backends are provided:
//!
//! | Writer              | Files created  | Contents                                  |
//! |---------------------|----------------|-------------------------------------------|
//! | [`CsvRouteWriter`]  | `routes.csv`   | One [`RouteRow`] per ranked route         |
//! | [`JsonRouteWriter`] | `routes.json`  | Every query with outcome and path coords  |
//!
//! Both implement [`OutputWriter`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use ev_output::{CsvRouteWriter, OutputWriter};
//!
//! let mut writer = CsvRouteWriter::new(Path::new("./out"))?;
//! let rec = ctx.recommend("bandra");
//! writer.write_recommendation("bandra", &rec, &ctx)?;
//! writer.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod json;
pub mod row;
pub mod writer;


pub use csv::CsvRouteWriter;
pub use error::{OutputError, OutputResult};
pub use json::JsonRouteWriter;
pub use row::RouteRow;
pub use writer::OutputWriter;
