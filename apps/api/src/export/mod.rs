// Diary export: HTML normalization, composition on top of the layout engine,
// PDF serialization and file sinks.
// The synchronous pipeline runs inside tokio::task::spawn_blocking (see service).

pub mod composer;
pub mod dates;
pub mod filename;
pub mod handlers;
pub mod normalizer;
pub mod render;
pub mod service;
pub mod sink;

pub use dates::DateFormatter;
pub use service::ExportSettings;
