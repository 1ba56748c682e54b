pub mod client;
pub mod dbs;
pub mod error;
pub mod trait_client;

pub use client::{IdentityStore, ACCESS_TOKEN_KEY, USER_KEY};
pub use dbs::file::FileIdentityCache;
pub use dbs::memory::MemoryIdentityCache;
pub use error::PersistError;
pub use trait_client::IdentityCache;
