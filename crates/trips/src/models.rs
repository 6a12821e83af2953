use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime, PrimitiveDateTime};
use uuid::Uuid;

use crate::{auth::hash_password, errors::TripsError};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub name: String,
    pub home_city: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// User data ready for insertion. The password is hashed on construction.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub home_city: Option<String>,
}

impl NewUser {
    pub fn new(
        email: &str,
        password: &str,
        name: &str,
        home_city: Option<&str>,
    ) -> Result<Self, TripsError> {
        if !email.contains('@') {
            return Err(TripsError::InvalidInput(format!(
                "Invalid email address: {email}"
            )));
        }
        Ok(Self {
            email: email.to_string(),
            password_hash: hash_password(password)?,
            name: name.to_string(),
            home_city: home_city.map(str::to_string),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Place {
    pub id: Uuid,
    pub name: String,
    pub place_type: String,
    pub country_code: String,
    pub country_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPlace {
    pub name: String,
    pub place_type: String,
    pub country_code: String,
    pub country_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

impl NewPlace {
    pub fn validate(&self) -> Result<(), TripsError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(TripsError::InvalidInput(format!(
                "Latitude out of range for {}: {}",
                self.name, self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(TripsError::InvalidInput(format!(
                "Longitude out of range for {}: {}",
                self.name, self.longitude
            )));
        }
        if self.country_code.len() != 2 {
            return Err(TripsError::InvalidInput(format!(
                "Country code must be ISO 3166-1 alpha-2: {}",
                self.country_code
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "transport_mode", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Flight,
    Train,
    Bus,
    Car,
    Ferry,
    Bike,
    Walk,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Flight => "flight",
            TransportMode::Train => "train",
            TransportMode::Bus => "bus",
            TransportMode::Car => "car",
            TransportMode::Ferry => "ferry",
            TransportMode::Bike => "bike",
            TransportMode::Walk => "walk",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trip {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Date,
    pub end_date: Date,
    pub user_id: Uuid,
    pub is_public: bool,
    pub share_token: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A trip together with the segments it owns, in position order.
#[derive(Debug, Clone, Serialize)]
pub struct TripWithSegments {
    pub trip: Trip,
    pub segments: Vec<Segment>,
}

/// Trip data ready for insertion.
///
/// Segment positions are not part of the input: they are assigned from the
/// order of `segments`, starting at 1.
#[derive(Debug, Clone)]
pub struct NewTrip {
    pub title: String,
    pub description: Option<String>,
    pub start_date: Date,
    pub end_date: Date,
    pub user_id: Uuid,
    pub is_public: bool,
    pub share_token: Option<String>,
    pub segments: Vec<NewSegment>,
}

impl NewTrip {
    pub fn validate(&self) -> Result<(), TripsError> {
        if self.title.trim().is_empty() {
            return Err(TripsError::InvalidInput(
                "Trip title must not be empty".to_string(),
            ));
        }
        if self.end_date < self.start_date {
            return Err(TripsError::InvalidInput(format!(
                "Trip '{}' ends before it starts",
                self.title
            )));
        }
        if let Some(token) = &self.share_token {
            if token.trim().is_empty() {
                return Err(TripsError::InvalidInput(
                    "Share token must not be blank".to_string(),
                ));
            }
        }
        for segment in &self.segments {
            segment.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Segment {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub origin_id: Uuid,
    pub destination_id: Uuid,
    pub transport_mode: TransportMode,
    /// Kilometres.
    pub distance: f64,
    /// Kilograms of CO2.
    pub carbon_footprint: f64,
    pub departure_time: PrimitiveDateTime,
    pub arrival_time: PrimitiveDateTime,
    pub position: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSegment {
    pub origin_id: Uuid,
    pub destination_id: Uuid,
    pub transport_mode: TransportMode,
    pub distance: f64,
    pub carbon_footprint: f64,
    /// Local wall-clock time at the origin.
    pub departure_time: PrimitiveDateTime,
    /// Local wall-clock time at the destination.
    pub arrival_time: PrimitiveDateTime,
}

impl NewSegment {
    pub fn validate(&self) -> Result<(), TripsError> {
        if self.origin_id == self.destination_id {
            return Err(TripsError::InvalidInput(
                "Segment origin and destination must differ".to_string(),
            ));
        }
        if self.distance < 0.0 || self.carbon_footprint < 0.0 {
            return Err(TripsError::InvalidInput(
                "Segment distance and carbon footprint must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Aggregates over every stored segment.
#[derive(Debug, Clone, Copy, PartialEq, FromRow)]
pub struct SegmentTotals {
    pub segment_count: i64,
    pub total_distance: f64,
    pub total_carbon: f64,
}
