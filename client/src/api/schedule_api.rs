use shared::{EntityId, Itinerary, ItineraryStatus, NewItinerary, StatusUpdate};
use tracing::info;

use super::check;
use crate::error::Result;
use crate::http::ApiClient;

pub async fn list_schedule(client: &ApiClient) -> Result<Vec<Itinerary>> {
    let itineraries: Vec<Itinerary> = client.get_json("/schedule").await?;
    info!(count = itineraries.len(), "Api list schedule");
    Ok(itineraries)
}

pub async fn create_itinerary(client: &ApiClient, itinerary: &NewItinerary) -> Result<()> {
    let mut errors = Vec::new();
    if itinerary.truck_id <= 0 {
        errors.push(("truckId", "select a truck"));
    }
    if itinerary.route_id <= 0 {
        errors.push(("routeId", "select a route"));
    }
    check(errors)?;
    client.post("/itineraries", itinerary).await?;
    info!(
        truck_id = itinerary.truck_id,
        route_id = itinerary.route_id,
        date = %itinerary.date,
        "Api itinerary scheduled"
    );
    Ok(())
}

/// Sends the transition as is; callers check it against the allowed edges first.
pub async fn update_status(client: &ApiClient, id: EntityId, status: ItineraryStatus) -> Result<()> {
    client
        .patch(&format!("/itineraries/{id}/status"), &StatusUpdate { status })
        .await?;
    info!(itinerary_id = id, status = %status, "Api itinerary status updated");
    Ok(())
}
