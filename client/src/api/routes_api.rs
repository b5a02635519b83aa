use shared::{EntityId, NewRoute, Route};
use tracing::info;

use super::check;
use crate::error::Result;
use crate::http::ApiClient;

pub const MIN_POINTS_PER_ROUTE: usize = 2;

pub async fn list(client: &ApiClient) -> Result<Vec<Route>> {
    let routes: Vec<Route> = client.get_json("/routes").await?;
    info!(count = routes.len(), "Api list routes");
    Ok(routes)
}

pub async fn create(client: &ApiClient, route: &NewRoute) -> Result<()> {
    let mut errors = Vec::new();
    if route.name.trim().is_empty() {
        errors.push(("name", "name must not be empty"));
    }
    if !route.distance_km.is_finite() || route.distance_km < 0.0 {
        errors.push(("distanceKm", "distance must be a non-negative number"));
    }
    if route.point_ids.len() < MIN_POINTS_PER_ROUTE {
        errors.push(("pointIds", "a route needs at least 2 points"));
    }
    check(errors)?;
    client.post("/routes", route).await?;
    info!(name = %route.name, points = route.point_ids.len(), "Api route created");
    Ok(())
}

pub async fn remove(client: &ApiClient, id: EntityId) -> Result<()> {
    client.delete(&format!("/routes/{id}")).await?;
    info!(route_id = id, "Api route removed");
    Ok(())
}
