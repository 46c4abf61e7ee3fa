pub mod api;
pub mod client;

pub use api::CatalogApi;
pub use client::TmdbClient;

#[cfg(test)]
pub use api::MockCatalogApi;
