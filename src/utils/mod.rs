pub mod http;

pub use http::{HttpFetcher, PageFetcher};
