use shared::{EntityId, NewTruck, Truck};
use tracing::info;

use super::check;
use crate::error::Result;
use crate::http::ApiClient;

pub async fn list(client: &ApiClient) -> Result<Vec<Truck>> {
    let trucks: Vec<Truck> = client.get_json("/trucks").await?;
    info!(count = trucks.len(), "Api list trucks");
    Ok(trucks)
}

pub async fn create(client: &ApiClient, truck: &NewTruck) -> Result<()> {
    let mut errors = Vec::new();
    if truck.plate.trim().is_empty() {
        errors.push(("plate", "plate must not be empty"));
    }
    if truck.driver_name.trim().is_empty() {
        errors.push(("driverName", "driver name must not be empty"));
    }
    if truck.capacity == 0 {
        errors.push(("capacity", "capacity must be positive"));
    }
    check(errors)?;
    client.post("/trucks", truck).await?;
    info!(plate = %truck.plate, "Api truck created");
    Ok(())
}

pub async fn remove(client: &ApiClient, id: EntityId) -> Result<()> {
    client.delete(&format!("/trucks/{id}")).await?;
    info!(truck_id = id, "Api truck removed");
    Ok(())
}
