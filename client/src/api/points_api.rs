use shared::{CollectionPoint, EntityId, NewCollectionPoint};
use tracing::info;

use super::check;
use crate::error::Result;
use crate::http::ApiClient;

pub async fn list(client: &ApiClient) -> Result<Vec<CollectionPoint>> {
    let points: Vec<CollectionPoint> = client.get_json("/points").await?;
    info!(count = points.len(), "Api list collection points");
    Ok(points)
}

pub async fn create(client: &ApiClient, point: &NewCollectionPoint) -> Result<()> {
    let mut errors = Vec::new();
    if point.name.trim().is_empty() {
        errors.push(("name", "name must not be empty"));
    }
    if point.address.trim().is_empty() {
        errors.push(("address", "address must not be empty"));
    }
    if point.waste_types.is_empty() {
        errors.push(("wasteTypes", "select at least one waste type"));
    }
    check(errors)?;
    client.post("/points", point).await?;
    info!(name = %point.name, "Api collection point created");
    Ok(())
}

pub async fn remove(client: &ApiClient, id: EntityId) -> Result<()> {
    client.delete(&format!("/points/{id}")).await?;
    info!(point_id = id, "Api collection point removed");
    Ok(())
}
