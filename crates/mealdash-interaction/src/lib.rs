//! Remote access clients for the mealdash backend.

pub mod http_api_client;

pub use http_api_client::HttpApiClient;
