pub mod client;
pub mod errors;
pub mod source;
pub mod types;

pub use client::CoinGeckoClient;
pub use errors::FetchError;
pub use source::CoinGeckoSource;
pub use types::*;
