use thiserror::Error;

/// Failures raised by the catalog layer.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The service does not carry a show with the given title.
    #[error("the show {title:?} is not available from {service}")]
    ShowNotFound { title: String, service: String },

    /// Titles are the catalog's unique key.
    #[error("the show {0:?} is already cataloged")]
    DuplicateTitle(String),

    /// Playlists need room for at least one show.
    #[error("playlist capacity must be positive")]
    InvalidCapacity,

    /// The playlist is at capacity.
    #[error("the playlist {0:?} is full")]
    PlaylistFull(String),

    /// Nothing to play.
    #[error("no show is in the playlist")]
    EmptyPlaylist,

    /// The playlist does not hold the given title.
    #[error("the show {0:?} is not in the playlist")]
    ShowNotInPlaylist(String),

    /// The supplied birthday is not a real calendar date.
    #[error("invalid birth date {year:04}-{month:02}-{day:02}")]
    InvalidDate { day: u8, month: u8, year: i32 },

    /// Search core failure: bad field input, or a query none of whose
    /// terms is indexed.
    #[error(transparent)]
    Search(#[from] streamdex_core::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
