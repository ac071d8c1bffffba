mod loader;
mod types;

pub use loader::{DatasetLoader, parse_csv};
pub use types::{Dataset, LoadError, RawUpload};
