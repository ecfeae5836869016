pub mod data;

pub use data::entity::*;
pub use data::events::*;
pub use data::genome::*;
pub use data::stats::*;
pub use data::terrain::*;
