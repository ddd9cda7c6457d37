pub mod http;
pub mod traits;

pub use http::HttpMetadataApi;
pub use traits::{ChartApi, ExploreApi, MetadataApi};
