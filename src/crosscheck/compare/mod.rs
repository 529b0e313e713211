//! Pure field comparison primitives shared by the matcher and the rule sets.
//!
//! Every comparator is total: malformed input degrades to a mismatch or an
//! [`DateComparison::Unparseable`] outcome and never panics.

mod address;
mod dates;
mod descriptions;
mod text;

pub use address::address_match;
pub use dates::{add_years, compare_dates, date_equal, format_date, parse_date, DateComparison};
pub use descriptions::descriptions_match;
pub use text::{
    exact_match, fuzzy_match, licence_numbers_match, normalize_licence, similarity,
    TextComparison,
};
