//! Value rules applied while building a record.

pub mod dates;
pub mod taxes;

pub use dates::{is_calendar_date, reverse_date_segments};
pub use taxes::reconcile_taxes;
