pub mod app;
pub mod store;

pub use app::*;
pub use store::*;
