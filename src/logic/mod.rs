pub mod controller;
pub mod extract;
pub mod fetch;
pub mod merge;

pub use controller::{run_view, ChartViewController, NavigationAction};
pub use extract::{extract_identity, Location};
pub use fetch::{FetchOutcome, MetadataFetcher};
pub use merge::merge_form_data;
