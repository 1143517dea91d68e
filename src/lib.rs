// Fetch anime-style neko images and post them to a Mastodon-compatible instance.

pub mod cache;
pub mod config;
pub mod error;
pub mod fedi;
mod http;
pub mod id;
pub mod nekos;
pub mod poster;

pub use config::Config;
pub use error::{NekoError, Result, Step};
pub use fedi::Visibility;
pub use nekos::Category;
pub use poster::{NekoPoster, Published};
