pub mod sparklines;
pub mod status;

pub use sparklines::SparklinesWidget;
pub use status::StatusWidget;
