use client::Identity;
use shared::{CollectionPoint, Itinerary, ItineraryStatus, Route, Truck, WasteType};

fn waste_list(waste_types: &[WasteType]) -> String {
    if waste_types.is_empty() {
        return "-".to_owned();
    }
    waste_types
        .iter()
        .map(|waste| waste.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

fn next_action(status: ItineraryStatus) -> &'static str {
    match status {
        ItineraryStatus::Scheduled => "start route",
        ItineraryStatus::InProgress => "finish route",
        ItineraryStatus::Completed => "route completed",
    }
}

pub fn identity(user: &Identity) {
    println!("Signed in as {name} (id {id})", name = user.name, id = user.id);
}

pub fn trucks(trucks: &[Truck]) {
    if trucks.is_empty() {
        println!("No trucks registered.");
        return;
    }
    println!("{:>5}  {:<10}  {:<20}  {:>9}  WASTE", "ID", "PLATE", "DRIVER", "CAPACITY");
    for truck in trucks {
        let capacity = truck
            .capacity
            .map(|capacity| format!("{capacity}"))
            .unwrap_or_else(|| "-".to_owned());
        println!(
            "{:>5}  {:<10}  {:<20}  {:>9}  {}",
            truck.id,
            truck.plate,
            truck.driver_name,
            capacity,
            waste_list(&truck.waste_types)
        );
    }
}

pub fn points(points: &[CollectionPoint]) {
    if points.is_empty() {
        println!("No collection points registered.");
        return;
    }
    println!("{:>5}  {:<24}  {:<30}  WASTE", "ID", "NAME", "ADDRESS");
    for point in points {
        println!(
            "{:>5}  {:<24}  {:<30}  {}",
            point.id,
            point.name,
            point.address,
            waste_list(&point.waste_types)
        );
    }
}

pub fn routes(routes: &[Route]) {
    if routes.is_empty() {
        println!("No routes registered.");
        return;
    }
    println!("{:>5}  {:<24}  {:>8}  POINTS", "ID", "NAME", "KM");
    for route in routes {
        let distance = route
            .distance_km
            .map(|km| format!("{km:.1}"))
            .unwrap_or_else(|| "-".to_owned());
        println!(
            "{:>5}  {:<24}  {:>8}  {}",
            route.id,
            route.name,
            distance,
            route.points.len()
        );
    }
}

/// Driver board: one card per itinerary.
pub fn schedule(itineraries: &[Itinerary]) {
    if itineraries.is_empty() {
        println!("No itineraries scheduled.");
        return;
    }
    for itinerary in itineraries {
        println!(
            "#{id} Route #{route_id}: {route_name} [{status}]",
            id = itinerary.id,
            route_id = itinerary.route.id,
            route_name = itinerary.route.name,
            status = itinerary.status,
        );
        println!("    Date: {}", itinerary.date.format("%d/%m/%Y"));
        println!(
            "    Truck: {plate} ({driver})",
            plate = itinerary.truck.plate,
            driver = itinerary.truck.driver_name
        );
        println!("    Collection points: {}", itinerary.route.points.len());
        println!("    Next: {}", next_action(itinerary.status));
    }
}
