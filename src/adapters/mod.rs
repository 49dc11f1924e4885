// Adapters layer: concrete implementations for external systems (storage, raw loader, flat-file encoder).

pub mod encoder;
pub mod loader;
pub mod storage;

pub use storage::LocalStorage;
