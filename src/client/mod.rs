pub mod http;
pub mod traits;

pub use http::HttpAnalysisApi;
pub use traits::AnalysisApi;
