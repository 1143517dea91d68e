// Image API module.
// Provides the category set, endpoint resolution and the client for both image backends.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::NekosClient;
pub use endpoints::{Category, Sources};
pub use types::*;
