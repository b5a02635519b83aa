use std::str::FromStr;

use chrono::NaiveDate;
use secrecy::SecretString;
use serde_json::json;
use shared::{
    parse_calendar_date, Itinerary, ItineraryStatus, LoginRequest, NewItinerary, NewRoute,
    NewTruck, Theme, WasteType,
};

#[test]
fn test_itinerary_from_backend_json() -> anyhow::Result<()> {
    let payload = json!({
        "id": 12,
        "status": "IN_PROGRESS",
        "date": "2025-03-04T00:00:00.000Z",
        "route": {
            "id": 3,
            "name": "Centro",
            "distanceKm": 12.5,
            "points": [{"id": 1}, {"id": 2}, {"id": 5}]
        },
        "truck": {"id": 9, "plate": "ABC1D23", "driverName": "Joana"}
    });

    let itinerary: Itinerary = serde_json::from_value(payload)?;

    assert_eq!(itinerary.id, 12);
    assert_eq!(itinerary.status, ItineraryStatus::InProgress);
    assert_eq!(itinerary.date, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
    assert_eq!(itinerary.route.name, "Centro");
    assert_eq!(itinerary.route.points.len(), 3);
    assert_eq!(itinerary.truck.driver_name, "Joana");
    Ok(())
}

#[test]
fn test_itinerary_with_unknown_status_is_rejected() {
    let payload = json!({
        "id": 1,
        "status": "CANCELLED",
        "date": "2025-03-04",
        "route": {"id": 3, "name": "Centro"},
        "truck": {"plate": "ABC1D23", "driverName": "Joana"}
    });

    assert!(serde_json::from_value::<Itinerary>(payload).is_err());
}

#[test]
fn test_status_transitions() {
    assert!(ItineraryStatus::Scheduled.can_transition_to(ItineraryStatus::InProgress));
    assert!(ItineraryStatus::InProgress.can_transition_to(ItineraryStatus::Completed));

    assert!(!ItineraryStatus::Scheduled.can_transition_to(ItineraryStatus::Completed));
    assert!(!ItineraryStatus::Scheduled.can_transition_to(ItineraryStatus::Scheduled));
    assert!(!ItineraryStatus::InProgress.can_transition_to(ItineraryStatus::Scheduled));
    assert!(!ItineraryStatus::Completed.can_transition_to(ItineraryStatus::InProgress));
    assert!(!ItineraryStatus::Completed.can_transition_to(ItineraryStatus::Completed));

    assert!(ItineraryStatus::Completed.is_terminal());
    assert_eq!(ItineraryStatus::Completed.next(), None);
}

#[test]
fn test_status_wire_and_display_names() -> anyhow::Result<()> {
    assert_eq!(
        serde_json::to_value(ItineraryStatus::InProgress)?,
        json!("IN_PROGRESS")
    );
    assert_eq!(ItineraryStatus::InProgress.to_string(), "IN_PROGRESS");
    assert_eq!(
        ItineraryStatus::from_str("in_progress")?,
        ItineraryStatus::InProgress
    );
    assert!(ItineraryStatus::from_str("done").is_err());
    Ok(())
}

#[test]
fn test_waste_type_names() -> anyhow::Result<()> {
    assert_eq!(serde_json::to_value(WasteType::Glass)?, json!("VIDRO"));
    assert_eq!(WasteType::Organic.to_string(), "ORGANICO");
    assert_eq!(WasteType::from_str("plastico")?, WasteType::Plastic);
    assert_eq!(WasteType::from_str("Paper")?, WasteType::Paper);
    Ok(())
}

#[test]
fn test_request_bodies_use_camel_case() -> anyhow::Result<()> {
    let truck = NewTruck {
        plate: "XYZ9A87".to_owned(),
        driver_name: "Rui".to_owned(),
        capacity: NewTruck::DEFAULT_CAPACITY,
        waste_types: NewTruck::DEFAULT_WASTE_TYPES.to_vec(),
    };
    assert_eq!(
        serde_json::to_value(&truck)?,
        json!({"plate": "XYZ9A87", "driverName": "Rui", "capacity": 1000, "wasteTypes": ["PLASTICO", "PAPEL"]})
    );

    let route = NewRoute {
        name: "Norte".to_owned(),
        distance_km: 8.0,
        point_ids: vec![4, 2],
    };
    assert_eq!(
        serde_json::to_value(&route)?,
        json!({"name": "Norte", "distanceKm": 8.0, "pointIds": [4, 2]})
    );

    let itinerary = NewItinerary {
        truck_id: 1,
        route_id: 2,
        date: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
    };
    assert_eq!(
        serde_json::to_value(&itinerary)?,
        json!({"truckId": 1, "routeId": 2, "date": "2025-01-31"})
    );
    Ok(())
}

#[test]
fn test_login_request_exposes_password_only_on_the_wire() -> anyhow::Result<()> {
    let request = LoginRequest {
        email: "ana@greenlog.test".to_owned(),
        password: SecretString::from("s3cret".to_owned()),
    };

    assert_eq!(
        serde_json::to_value(&request)?,
        json!({"email": "ana@greenlog.test", "password": "s3cret"})
    );
    assert!(!format!("{request:?}").contains("s3cret"));
    Ok(())
}

#[test]
fn test_parse_calendar_date_formats() -> anyhow::Result<()> {
    let expected = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
    assert_eq!(parse_calendar_date("2024-12-01")?, expected);
    assert_eq!(parse_calendar_date("2024-12-01T10:30:00")?, expected);
    assert_eq!(parse_calendar_date("2024-12-01T23:30:00-03:00")?, expected.succ_opt().unwrap());
    assert!(parse_calendar_date("01/12/2024").is_err());
    Ok(())
}

#[test]
fn test_theme_toggle_and_parse() -> anyhow::Result<()> {
    assert_eq!(Theme::default(), Theme::Dark);
    assert_eq!(Theme::Dark.toggled(), Theme::Light);
    assert_eq!(Theme::from_str("LIGHT")?, Theme::Light);
    assert_eq!(Theme::Light.to_string(), "light");
    Ok(())
}
