mod format;
mod store;

pub use format::{export_json, import_file, parse_json, parse_yaml, TranscriptFormat};
pub use store::{FileStore, MemoryStore, TranscriptStore, DEFAULT_LIFETIME_DAYS};
