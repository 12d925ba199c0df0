mod database;
mod error;
mod fetch;
mod server;

pub use database::Database;
pub use error::ClientError;
pub use fetch::PageFetch;
pub use server::{ClientOptions, Credentials, Server};

#[cfg(feature = "memory")]
mod memory;

#[cfg(feature = "memory")]
pub use memory::MemoryViews;
