pub mod config;
pub mod github;
pub mod oauth;
pub mod traits;

pub use config::{TransportConfig, DEFAULT_EXCHANGE_URL, GITHUB_API_BASE};
pub use github::{GithubTransport, GithubTransportBuilder, HttpTokenExchange};
pub use oauth::{login_link, strip_code, OAUTH_AUTHORIZE_URL, OAUTH_SCOPE};
pub use traits::{TokenExchange, Transport};
