pub mod app;
pub mod blob;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod stats;
pub mod state;
pub mod store;
pub mod ui;

pub use app::router;
pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use config::Config;
pub use state::AppState;
pub use store::{EntryStore, ENTRIES_KEY};
