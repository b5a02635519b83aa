use shared::{EntityId, Itinerary, ItineraryStatus};
use tracing::{info, warn};

use crate::api::schedule_api;
use crate::error::{Error, Result};
use crate::http::ApiClient;

/// Driver status board: the last confirmed schedule plus the transitions on it.
///
/// The displayed list is only ever replaced by a complete `/schedule` answer,
/// never patched in place, so a failed call leaves it exactly as it was.
pub struct ScheduleBoard {
    client: ApiClient,
    itineraries: Vec<Itinerary>,
}

impl ScheduleBoard {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            itineraries: Vec::new(),
        }
    }

    pub fn itineraries(&self) -> &[Itinerary] {
        &self.itineraries
    }

    pub fn get(&self, id: EntityId) -> Option<&Itinerary> {
        self.itineraries.iter().find(|itinerary| itinerary.id == id)
    }

    pub async fn list_schedule(&mut self) -> Result<&[Itinerary]> {
        match schedule_api::list_schedule(&self.client).await {
            Ok(itineraries) => {
                self.itineraries = itineraries;
                Ok(&self.itineraries)
            }
            Err(error) => {
                warn!(error = %error, kept = self.itineraries.len(), "Fail to fetch schedule, keeping displayed list");
                Err(error)
            }
        }
    }

    /// Requests `target` for an itinerary on the board, then reloads the schedule.
    ///
    /// Only `SCHEDULED -> IN_PROGRESS` and `IN_PROGRESS -> COMPLETED` leave the
    /// client; any other edge fails locally.
    pub async fn advance_status(&mut self, id: EntityId, target: ItineraryStatus) -> Result<&[Itinerary]> {
        let current = self.get(id).map(|itinerary| itinerary.status).ok_or(Error::UnknownItinerary(id))?;
        if !current.can_transition_to(target) {
            warn!(itinerary_id = id, from = %current, to = %target, "Status transition rejected locally");
            return Err(Error::IllegalTransition { from: current, to: target });
        }

        if let Err(error) = schedule_api::update_status(&self.client, id, target).await {
            warn!(itinerary_id = id, to = %target, error = %error, "Status update failed");
            return Err(error);
        }
        info!(itinerary_id = id, from = %current, to = %target, "Status updated, reloading schedule");
        self.list_schedule().await
    }

    /// Moves an itinerary to the next status of its lifecycle.
    pub async fn advance(&mut self, id: EntityId) -> Result<&[Itinerary]> {
        let current = self.get(id).map(|itinerary| itinerary.status).ok_or(Error::UnknownItinerary(id))?;
        let target = current.next().ok_or(Error::AlreadyCompleted(id))?;
        self.advance_status(id, target).await
    }
}
