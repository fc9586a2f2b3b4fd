//! Catalog layer over the search core: show records, the streaming
//! service that owns the inverted index, and the playlist/user
//! bookkeeping on top of it.

pub mod error;
pub mod playlist;
pub mod service;
pub mod show;
pub mod user;

pub use error::{CatalogError, Result};
pub use playlist::{FavouritePlaylist, Playlist};
pub use service::StreamingService;
pub use show::{Show, ShowRecord};
pub use user::User;
