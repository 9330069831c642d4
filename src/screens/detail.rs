//! Detail screen: one title with its extended fields

use anyhow::Result;

use crate::error::FetchError;
use crate::favorites::FavoritesStore;
use crate::models::AnimeDetail;

use super::{FetchRequest, Generation, RequestTicket};

/// Detail lifecycle
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailPhase {
    /// Nothing requested
    #[default]
    Idle,
    /// Waiting for the gateway
    Loading,
    /// Record available
    Loaded(Box<AnimeDetail>),
    /// The request failed; shown as "Anime not found."
    NotFound,
}

/// Controller for the detail screen
#[derive(Debug, Default)]
pub struct DetailController {
    id: Option<u32>,
    phase: DetailPhase,
    is_favorite: bool,
    generation: Generation,
    last_error: Option<FetchError>,
}

impl DetailController {
    /// Create an idle controller
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the screen for `id`, with its persisted favorite flag
    pub fn mount(&mut self, id: u32, is_favorite: bool) -> FetchRequest {
        self.id = Some(id);
        self.is_favorite = is_favorite;
        self.phase = DetailPhase::Loading;
        self.last_error = None;
        let ticket = self.generation.next();
        tracing::debug!("detail: requesting anime {id} ({ticket:?})");
        FetchRequest::Detail { ticket, id }
    }

    /// Apply a settled request. Returns `false` for a stale ticket.
    pub fn complete(&mut self, ticket: RequestTicket, result: Result<AnimeDetail, FetchError>) -> bool {
        if !self.generation.is_current(ticket) {
            tracing::debug!("detail: dropping stale response {ticket:?}");
            return false;
        }

        self.phase = match result {
            Ok(detail) => DetailPhase::Loaded(Box::new(detail)),
            Err(e) => {
                tracing::warn!("Failed to fetch anime {:?}: {e}", self.id);
                self.last_error = Some(e);
                DetailPhase::NotFound
            }
        };
        true
    }

    /// Flip the favorite flag in the store and mirror it locally.
    ///
    /// Returns `None` until a record is loaded, since a favorite is stored with its title.
    pub fn toggle_favorite(&mut self, store: &FavoritesStore) -> Result<Option<bool>> {
        let Some(detail) = self.detail() else {
            return Ok(None);
        };
        let (id, title) = (detail.summary.id, detail.summary.title.clone());
        self.is_favorite = store.toggle(id, &title)?;
        Ok(Some(self.is_favorite))
    }

    /// Id of the mounted title
    pub const fn id(&self) -> Option<u32> {
        self.id
    }

    /// Current lifecycle phase
    pub const fn phase(&self) -> &DetailPhase {
        &self.phase
    }

    /// Loaded record, if any
    pub fn detail(&self) -> Option<&AnimeDetail> {
        match &self.phase {
            DetailPhase::Loaded(detail) => Some(&**detail),
            _ => None,
        }
    }

    /// Whether the title is a favorite
    pub const fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    /// Whether the request is still in flight
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, DetailPhase::Loading)
    }

    /// Error of the last settled request, if it failed
    pub const fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }
}
