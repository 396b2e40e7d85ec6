//! Record flattening
//!
//! Maps raw upstream records onto flat rows, one mapping per table:
//!
//! | table     | columns                                                     |
//! |-----------|-------------------------------------------------------------|
//! | customers | name, email, phone_primary, status, is_active               |
//! | invoices  | invoice_number, total_amount, status, customer_name         |
//! | vendors   | name, email, status                                         |
//!
//! Every row also carries `id` and `sync_timestamp`. Unknown tables get only
//! those two columns.

mod coerce;
mod flattener;
mod tables;
mod types;

pub use coerce::{to_bool, to_float, to_text, NONE_MARKER};
pub use flattener::{flatten, flatten_at};
pub use tables::{fields_for, FieldKind, FieldSpec};
pub use types::{FlatRow, FlatValue};
