//! Read-side operations over a theme's rows: column views, group statistics and export.
//!
//! Every function here takes a [`Frame`](crate::models::Frame) by reference and returns
//! a new one, so the store is never modified by a query.

pub mod aggregate;
pub mod export;
pub mod view;

pub use aggregate::{GroupBy, Statistic, aggregate};
pub use export::{write_csv, write_xlsx};
pub use view::{ID_COLUMNS, indicator_columns, select_view};
