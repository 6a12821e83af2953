//! The fixed demonstration dataset.
//!
//! Nothing here touches the database. Segments refer to places through
//! [`PlaceKey`] and receive their positions from list order, so a trip can
//! only reference places the dataset defines and positions are always
//! contiguous from 1.

use std::collections::HashMap;
use std::fmt;

use time::{Date, PrimitiveDateTime, macros::date, macros::datetime};
use trips::models::{NewPlace, NewSegment, NewTrip, SegmentTotals, TransportMode};
use uuid::Uuid;

use crate::db::SeedError;

/// Stable handle for a demo place, resolved to a database id while seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceKey {
    Tokyo,
    London,
    Paris,
    Barcelona,
    NewYorkCity,
}

#[derive(Debug, Clone)]
pub struct DemoUser {
    pub email: &'static str,
    pub password: &'static str,
    pub name: &'static str,
    pub home_city: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct DemoPlace {
    pub key: PlaceKey,
    pub place: NewPlace,
}

#[derive(Debug, Clone)]
pub struct DemoSegment {
    pub origin: PlaceKey,
    pub destination: PlaceKey,
    pub transport_mode: TransportMode,
    pub distance: f64,
    pub carbon_footprint: f64,
    pub departure_time: PrimitiveDateTime,
    pub arrival_time: PrimitiveDateTime,
}

#[derive(Debug, Clone)]
pub struct DemoTrip {
    pub title: &'static str,
    pub description: Option<&'static str>,
    pub start_date: Date,
    pub end_date: Date,
    pub is_public: bool,
    pub share_token: Option<&'static str>,
    pub segments: Vec<DemoSegment>,
}

impl DemoTrip {
    /// Resolves place keys to stored ids and builds the insertable trip.
    pub fn to_new_trip(
        &self,
        user_id: Uuid,
        place_ids: &HashMap<PlaceKey, Uuid>,
    ) -> Result<NewTrip, SeedError> {
        let resolve = |key: PlaceKey| {
            place_ids
                .get(&key)
                .copied()
                .ok_or(SeedError::UnknownPlace(key))
        };

        let segments = self
            .segments
            .iter()
            .map(|s| {
                Ok(NewSegment {
                    origin_id: resolve(s.origin)?,
                    destination_id: resolve(s.destination)?,
                    transport_mode: s.transport_mode,
                    distance: s.distance,
                    carbon_footprint: s.carbon_footprint,
                    departure_time: s.departure_time,
                    arrival_time: s.arrival_time,
                })
            })
            .collect::<Result<Vec<_>, SeedError>>()?;

        Ok(NewTrip {
            title: self.title.to_string(),
            description: self.description.map(str::to_string),
            start_date: self.start_date,
            end_date: self.end_date,
            user_id,
            is_public: self.is_public,
            share_token: self.share_token.map(str::to_string),
            segments,
        })
    }
}

/// A segment whose local arrival time is earlier than its local departure.
///
/// Times are wall-clock at origin and destination, so eastbound date-line
/// crossings legitimately produce these. They are reported, never rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleWarning {
    pub trip_title: String,
    pub position: i32,
    pub departure_time: PrimitiveDateTime,
    pub arrival_time: PrimitiveDateTime,
}

impl fmt::Display for ScheduleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' segment {} arrives ({}) before it departs ({}) in local time",
            self.trip_title, self.position, self.arrival_time, self.departure_time
        )
    }
}

#[derive(Debug, Clone)]
pub struct DemoDataset {
    pub user: DemoUser,
    pub places: Vec<DemoPlace>,
    pub trips: Vec<DemoTrip>,
}

impl DemoDataset {
    pub fn place(&self, key: PlaceKey) -> Option<&NewPlace> {
        self.places.iter().find(|p| p.key == key).map(|p| &p.place)
    }

    pub fn segment_count(&self) -> usize {
        self.trips.iter().map(|t| t.segments.len()).sum()
    }

    /// Checks internal consistency before anything is written.
    ///
    /// Returns schedule warnings for segments that arrive before they depart.
    pub fn validate(&self) -> Result<Vec<ScheduleWarning>, SeedError> {
        let mut warnings = Vec::new();

        for place in &self.places {
            place.place.validate()?;
        }

        for trip in &self.trips {
            if trip.segments.is_empty() {
                return Err(SeedError::EmptyTrip(trip.title.to_string()));
            }
            for (position, segment) in (1_i32..).zip(&trip.segments) {
                for key in [segment.origin, segment.destination] {
                    if self.place(key).is_none() {
                        return Err(SeedError::UnknownPlace(key));
                    }
                }
                if segment.arrival_time < segment.departure_time {
                    warnings.push(ScheduleWarning {
                        trip_title: trip.title.to_string(),
                        position,
                        departure_time: segment.departure_time,
                        arrival_time: segment.arrival_time,
                    });
                }
            }
        }

        Ok(warnings)
    }

    /// Totals the database should report after seeding an empty schema.
    pub fn expected_totals(&self) -> SegmentTotals {
        let segments = self.trips.iter().flat_map(|t| &t.segments);
        let (total_distance, total_carbon) = segments
            .clone()
            .fold((0.0, 0.0), |(d, c), s| (d + s.distance, c + s.carbon_footprint));

        SegmentTotals {
            segment_count: segments.count() as i64,
            total_distance,
            total_carbon,
        }
    }

    /// Distinct country codes in itinerary order.
    pub fn countries_visited(&self) -> Vec<String> {
        let mut countries: Vec<String> = Vec::new();
        let stops = self
            .trips
            .iter()
            .flat_map(|t| &t.segments)
            .flat_map(|s| [s.origin, s.destination]);

        for key in stops {
            if let Some(place) = self.place(key) {
                if !countries.contains(&place.country_code) {
                    countries.push(place.country_code.clone());
                }
            }
        }
        countries
    }
}

fn city(key: PlaceKey, name: &str, code: &str, country: &str, lat: f64, lon: f64) -> DemoPlace {
    DemoPlace {
        key,
        place: NewPlace {
            name: name.to_string(),
            place_type: "city".to_string(),
            country_code: code.to_string(),
            country_name: country.to_string(),
            latitude: lat,
            longitude: lon,
            display_name: format!("{name}, {country}"),
        },
    }
}

fn leg(
    origin: PlaceKey,
    destination: PlaceKey,
    transport_mode: TransportMode,
    distance: f64,
    carbon_footprint: f64,
    departure_time: PrimitiveDateTime,
    arrival_time: PrimitiveDateTime,
) -> DemoSegment {
    DemoSegment {
        origin,
        destination,
        transport_mode,
        distance,
        carbon_footprint,
        departure_time,
        arrival_time,
    }
}

/// The demo user, five cities and two trips shown on a fresh install.
pub fn demo_dataset() -> DemoDataset {
    use PlaceKey::*;
    use TransportMode::*;

    DemoDataset {
        user: DemoUser {
            email: "ankit@example.com",
            password: "Password123",
            name: "Ankit",
            home_city: Some("New York"),
        },
        places: vec![
            city(Tokyo, "Tokyo", "JP", "Japan", 35.6762, 139.6503),
            city(London, "London", "GB", "United Kingdom", 51.5074, -0.1278),
            city(Paris, "Paris", "FR", "France", 48.8566, 2.3522),
            city(Barcelona, "Barcelona", "ES", "Spain", 41.3851, 2.1734),
            city(NewYorkCity, "New York City", "US", "United States", 40.7128, -74.0060),
        ],
        trips: vec![
            DemoTrip {
                title: "Europe Summer 2024",
                description: Some("Backpacking through Western Europe"),
                start_date: date!(2024 - 06 - 15),
                end_date: date!(2024 - 07 - 05),
                is_public: true,
                share_token: Some("demo-europe-2024"),
                segments: vec![
                    leg(
                        NewYorkCity,
                        London,
                        Flight,
                        5571.0,
                        1420.6,
                        datetime!(2024-06-15 20:00),
                        datetime!(2024-06-16 08:00),
                    ),
                    leg(
                        London,
                        Paris,
                        Train,
                        344.0,
                        14.1,
                        datetime!(2024-06-20 10:30),
                        datetime!(2024-06-20 13:00),
                    ),
                    leg(
                        Paris,
                        Barcelona,
                        Train,
                        831.0,
                        34.1,
                        datetime!(2024-06-25 09:00),
                        datetime!(2024-06-25 15:30),
                    ),
                    leg(
                        Barcelona,
                        NewYorkCity,
                        Flight,
                        5996.0,
                        1529.0,
                        datetime!(2024-07-05 11:00),
                        datetime!(2024-07-05 14:30),
                    ),
                ],
            },
            DemoTrip {
                title: "Tokyo Business Trip",
                description: Some("Client meetings in Japan"),
                start_date: date!(2024 - 09 - 10),
                end_date: date!(2024 - 09 - 17),
                is_public: false,
                share_token: None,
                segments: vec![
                    leg(
                        NewYorkCity,
                        Tokyo,
                        Flight,
                        10850.0,
                        2766.8,
                        datetime!(2024-09-10 16:00),
                        datetime!(2024-09-11 19:00),
                    ),
                    leg(
                        Tokyo,
                        NewYorkCity,
                        Flight,
                        10850.0,
                        2766.8,
                        datetime!(2024-09-17 14:00),
                        datetime!(2024-09-17 13:00),
                    ),
                ],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_shape() {
        let dataset = demo_dataset();
        assert_eq!(dataset.places.len(), 5);
        assert_eq!(dataset.trips.len(), 2);
        assert_eq!(dataset.trips[0].segments.len(), 4);
        assert_eq!(dataset.trips[1].segments.len(), 2);
        assert_eq!(dataset.segment_count(), 6);
    }

    #[test]
    fn test_expected_totals() {
        let totals = demo_dataset().expected_totals();
        assert_eq!(totals.segment_count, 6);
        assert_eq!(format!("{:.0}", totals.total_distance), "34442");
        assert_eq!(format!("{:.1}", totals.total_carbon), "8531.4");
    }

    #[test]
    fn test_countries_in_itinerary_order() {
        assert_eq!(
            demo_dataset().countries_visited(),
            vec!["US", "GB", "FR", "ES", "JP"]
        );
    }

    #[test]
    fn test_only_tokyo_return_leg_is_flagged() {
        let warnings = demo_dataset().validate().unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].trip_title, "Tokyo Business Trip");
        assert_eq!(warnings[0].position, 2);
        assert!(warnings[0].to_string().contains("before it departs"));
    }

    #[test]
    fn test_unknown_place_rejected() {
        let mut dataset = demo_dataset();
        dataset.places.retain(|p| p.key != PlaceKey::Barcelona);
        assert!(matches!(
            dataset.validate(),
            Err(SeedError::UnknownPlace(PlaceKey::Barcelona))
        ));
    }

    #[test]
    fn test_empty_trip_rejected() {
        let mut dataset = demo_dataset();
        dataset.trips[1].segments.clear();
        assert!(matches!(dataset.validate(), Err(SeedError::EmptyTrip(_))));
    }

    #[test]
    fn test_to_new_trip_assigns_ids_in_order() {
        let dataset = demo_dataset();
        let place_ids: HashMap<PlaceKey, Uuid> = dataset
            .places
            .iter()
            .map(|p| (p.key, Uuid::new_v4()))
            .collect();
        let user_id = Uuid::new_v4();

        let europe = dataset.trips[0].to_new_trip(user_id, &place_ids).unwrap();
        assert_eq!(europe.user_id, user_id);
        assert_eq!(europe.share_token.as_deref(), Some("demo-europe-2024"));
        assert_eq!(europe.segments[0].origin_id, place_ids[&PlaceKey::NewYorkCity]);
        assert_eq!(europe.segments[3].destination_id, place_ids[&PlaceKey::NewYorkCity]);
        assert!(europe.validate().is_ok());

        let asia = dataset.trips[1].to_new_trip(user_id, &place_ids).unwrap();
        assert!(asia.share_token.is_none());
        assert!(!asia.is_public);
    }

    #[test]
    fn test_to_new_trip_missing_place_id() {
        let dataset = demo_dataset();
        let place_ids = HashMap::new();
        assert!(matches!(
            dataset.trips[1].to_new_trip(Uuid::new_v4(), &place_ids),
            Err(SeedError::UnknownPlace(PlaceKey::NewYorkCity))
        ));
    }
}
