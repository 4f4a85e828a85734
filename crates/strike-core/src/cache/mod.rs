pub mod format;
pub mod key;
pub mod store;

pub use format::{
    export, export_with, import, peek_checksum_equal, read_checksum, CacheCompression,
};
pub use key::cache_checksum;
pub use store::{default_cache_path, load_if_fresh, store};
