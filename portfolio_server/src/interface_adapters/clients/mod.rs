// reqwest clients for the third-party services the proxies read from.
pub mod jikan;
pub mod spotify;

pub use jikan::JikanClient;
pub use spotify::{SpotifyClient, SpotifyCredentials};
