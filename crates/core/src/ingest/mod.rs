pub mod context;
pub mod loader;

pub use context::{DatasetPaths, MarketContext, Table};
pub use loader::DatasetError;
