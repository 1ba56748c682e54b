pub mod client;
pub mod exchange;

pub use client::{GithubTransport, GithubTransportBuilder};
pub use exchange::HttpTokenExchange;
