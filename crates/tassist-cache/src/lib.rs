pub mod error;
pub mod key;
pub mod memory;

pub use error::CacheError;
pub use key::cache_key;
pub use memory::ToolCache;
