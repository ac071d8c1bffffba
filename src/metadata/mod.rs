mod store;
mod types;

pub use store::MetadataStore;
pub use types::ModelMetadata;
