pub mod aggregation;
pub mod range;

pub use aggregation::{is_month_end, month_end_points};
pub use range::select_range;
