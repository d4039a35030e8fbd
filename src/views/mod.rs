//! View models over fetched data.

pub mod claims_table;
pub mod format;
pub mod payments_table;
pub mod report;

pub use claims_table::{ClaimRow, ClaimsTable, Pagination, Paging, TableBody, EMPTY_MESSAGE};
pub use format::{format_amount, format_date};
pub use payments_table::{filter_and_sort, PaymentFilter, PaymentRow, SortKey, SortOrder};
pub use report::render_member_report;
