use rand::Rng;

use crate::error::{CatalogError, Result};
use crate::show::Show;

/// An insertion-ordered, capacity-bounded list of shows keyed by title,
/// like "watch later". Playing a show removes it.
pub struct Playlist {
    name: String,
    capacity: usize,
    shows: Vec<Show>,
}

impl Playlist {
    pub fn new(name: impl Into<String>, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CatalogError::InvalidCapacity);
        }
        Ok(Self {
            name: name.into(),
            capacity,
            shows: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a show; re-adding a held title replaces the old entry without
    /// counting against capacity.
    pub fn add_show(&mut self, show: Show) -> Result<()> {
        if let Some(existing) = self.shows.iter_mut().find(|s| s.title == show.title) {
            *existing = show;
            return Ok(());
        }
        if self.shows.len() >= self.capacity {
            return Err(CatalogError::PlaylistFull(self.name.clone()));
        }
        self.shows.push(show);
        Ok(())
    }

    pub fn remove_show(&mut self, title: &str) -> Result<Show> {
        let pos = self.position(title)?;
        Ok(self.shows.remove(pos))
    }

    /// Play (and drop) the named show, or the first-added one when no
    /// title is given.
    pub fn play_show(&mut self, title: Option<&str>) -> Result<Show> {
        let pos = match title {
            Some(title) => self.position(title)?,
            None => {
                if self.shows.is_empty() {
                    return Err(CatalogError::EmptyPlaylist);
                }
                0
            }
        };
        let show = self.shows.remove(pos);
        tracing::info!(title = %show.title, duration = %show.duration, "playing show");
        Ok(show)
    }

    /// Play a uniformly random show.
    pub fn shuffle_play(&mut self) -> Result<Show> {
        if self.shows.is_empty() {
            return Err(CatalogError::EmptyPlaylist);
        }
        let pos = rand::rng().random_range(0..self.shows.len());
        let title = self.shows[pos].title.clone();
        self.play_show(Some(&title))
    }

    pub fn shows(&self) -> &[Show] {
        &self.shows
    }

    pub fn len(&self) -> usize {
        self.shows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shows.is_empty()
    }

    fn position(&self, title: &str) -> Result<usize> {
        self.shows
            .iter()
            .position(|s| s.title == title)
            .ok_or_else(|| CatalogError::ShowNotInPlaylist(title.to_string()))
    }
}

/// A playlist whose shows survive being played. The unnamed form plays a
/// random pick instead of the oldest entry.
pub struct FavouritePlaylist {
    inner: Playlist,
}

impl FavouritePlaylist {
    pub fn new(name: impl Into<String>, capacity: usize) -> Result<Self> {
        Ok(Self {
            inner: Playlist::new(name, capacity)?,
        })
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn add_show(&mut self, show: Show) -> Result<()> {
        self.inner.add_show(show)
    }

    pub fn remove_show(&mut self, title: &str) -> Result<Show> {
        self.inner.remove_show(title)
    }

    /// Play the named show, or a random one when no title is given.
    /// Nothing is removed.
    pub fn play_show(&self, title: Option<&str>) -> Result<Show> {
        let shows = self.inner.shows();
        let show = match title {
            Some(title) => shows
                .iter()
                .find(|s| s.title == title)
                .ok_or_else(|| CatalogError::ShowNotInPlaylist(title.to_string()))?,
            None => {
                if shows.is_empty() {
                    return Err(CatalogError::EmptyPlaylist);
                }
                &shows[rand::rng().random_range(0..shows.len())]
            }
        };
        tracing::info!(title = %show.title, duration = %show.duration, "playing show");
        Ok(show.clone())
    }

    pub fn shows(&self) -> &[Show] {
        self.inner.shows()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
