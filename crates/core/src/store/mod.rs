//! File store for transient uploaded and converted files.
//!
//! Storage is a service abstraction parameterized by a root path and
//! injected into the web handlers; nothing reads directory locations
//! from process-wide globals.

mod error;
mod fs_store;
mod types;

pub use error::StoreError;
pub use fs_store::FileStore;
pub use types::{FileInfo, JobState, UploadedFile};
