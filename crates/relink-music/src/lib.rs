pub mod api;
pub mod classifier;
pub mod converter;
pub mod link;
pub mod parsers;
pub mod query;
pub mod ranker;
mod resolve;

pub use api::spotify::{SpotifyAuth, SpotifyCredentials};
pub use api::{ApiClients, Endpoints};
pub use classifier::{SourceLink, identify};
pub use converter::MusicConverter;
pub use link::{AppleMusicTarget, Link, SpotifyTarget};
pub use parsers::apple_music::AppleEntity;
