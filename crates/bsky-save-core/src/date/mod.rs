//! Post timestamp handling: normalize the free-text accessibility label into
//! a date, and render dates into filename patterns.

mod format;
mod normalize;

pub use format::{day_date_string, format_date, format_date_str, DateFormatter};
pub use normalize::{normalize_label, normalize_label_in, NormalizedDate};
