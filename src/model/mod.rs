pub mod common;
pub mod form_data;
pub mod metadata;
pub mod state;

pub use common::*;
pub use form_data::*;
pub use metadata::*;
pub use state::*;
