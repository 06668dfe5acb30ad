pub mod archive_store;
pub mod card_filter;
pub mod dataset_cache;
pub mod formatter;
pub mod sampler;

pub use archive_store::{ArchiveStore, FileStorage, KeyValueStore, MemoryStorage};
pub use card_filter::{filter_by_range, filter_cards, in_range};
pub use dataset_cache::DatasetCache;
pub use formatter::{format_card, format_cards};
pub use sampler::sample;
