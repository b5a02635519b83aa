use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};

pub type EntityId = i64;

fn expose_secret<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(serialize_with = "expose_secret")]
    pub password: SecretString,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    #[serde(serialize_with = "expose_secret")]
    pub password: SecretString,
}

/// Body returned by both `/login` and `/register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Error body the backend sends alongside non-2xx statuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
pub enum WasteType {
    #[serde(rename = "PLASTICO")]
    #[strum(to_string = "PLASTICO", serialize = "plastic", ascii_case_insensitive)]
    Plastic,
    #[serde(rename = "PAPEL")]
    #[strum(to_string = "PAPEL", serialize = "paper", ascii_case_insensitive)]
    Paper,
    #[serde(rename = "METAL")]
    #[strum(to_string = "METAL", ascii_case_insensitive)]
    Metal,
    #[serde(rename = "VIDRO")]
    #[strum(to_string = "VIDRO", serialize = "glass", ascii_case_insensitive)]
    Glass,
    #[serde(rename = "ORGANICO")]
    #[strum(to_string = "ORGANICO", serialize = "organic", ascii_case_insensitive)]
    Organic,
    #[serde(rename = "ELETRONICO")]
    #[strum(to_string = "ELETRONICO", serialize = "electronic", ascii_case_insensitive)]
    Electronic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Truck {
    pub id: EntityId,
    pub plate: String,
    pub driver_name: String,
    #[serde(default)]
    pub capacity: Option<f64>,
    #[serde(default)]
    pub waste_types: Vec<WasteType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTruck {
    pub plate: String,
    pub driver_name: String,
    pub capacity: u32,
    pub waste_types: Vec<WasteType>,
}

impl NewTruck {
    pub const DEFAULT_CAPACITY: u32 = 1000;
    pub const DEFAULT_WASTE_TYPES: [WasteType; 2] = [WasteType::Plastic, WasteType::Paper];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPoint {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub responsible: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub waste_types: Vec<WasteType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCollectionPoint {
    pub name: String,
    pub address: String,
    pub responsible: String,
    pub contact: String,
    pub waste_types: Vec<WasteType>,
}

/// A route as listed by `/routes` and embedded in each itinerary.
///
/// The shape of the individual points differs between backend versions, so
/// they are kept as raw JSON; only their count and order are consumed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub points: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoute {
    pub name: String,
    pub distance_km: f64,
    pub point_ids: Vec<EntityId>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ItineraryStatus {
    #[strum(ascii_case_insensitive)]
    Scheduled,
    #[strum(ascii_case_insensitive)]
    InProgress,
    #[strum(ascii_case_insensitive)]
    Completed,
}

impl ItineraryStatus {
    /// The only status this one may move to, `None` once completed.
    pub fn next(self) -> Option<Self> {
        match self {
            ItineraryStatus::Scheduled => Some(ItineraryStatus::InProgress),
            ItineraryStatus::InProgress => Some(ItineraryStatus::Completed),
            ItineraryStatus::Completed => None,
        }
    }

    pub fn can_transition_to(self, target: ItineraryStatus) -> bool {
        self.next() == Some(target)
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryTruck {
    pub plate: String,
    pub driver_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub id: EntityId,
    pub status: ItineraryStatus,
    pub route: Route,
    pub truck: ItineraryTruck,
    #[serde(with = "calendar_date")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItinerary {
    pub truck_id: EntityId,
    pub route_id: EntityId,
    #[serde(with = "calendar_date")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: ItineraryStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, AsRefStr, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    #[strum(ascii_case_insensitive)]
    Dark,
    #[strum(ascii_case_insensitive)]
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Accepts `YYYY-MM-DD` as well as full timestamps, keeping the UTC calendar day.
pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(date_time) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(date_time.date());
    }
    DateTime::parse_from_rfc3339(raw).map(|date_time| date_time.with_timezone(&Utc).date_naive())
}

mod calendar_date {
    use super::*;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_calendar_date(&raw).map_err(serde::de::Error::custom)
    }
}
