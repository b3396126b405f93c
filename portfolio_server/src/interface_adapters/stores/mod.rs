pub mod blob;
pub mod fs_blob;
pub mod http_blob;
pub mod memory;
pub mod postgres;

pub use blob::BlobEntryStore;
pub use fs_blob::FsBlobStore;
pub use http_blob::HttpBlobStore;
pub use memory::InMemoryEntryStore;
pub use postgres::PostgresEntryStore;
