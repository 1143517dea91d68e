// Fediverse API module.
// Provides the client and types for posting media statuses to a Mastodon-compatible instance.

pub mod client;
pub mod types;

pub use client::FediClient;
pub use types::*;
