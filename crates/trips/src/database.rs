use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::errors::TripsError;
use crate::models::{
    NewPlace, NewTrip, NewUser, Place, Segment, SegmentTotals, Trip, TripWithSegments, User,
};

const USER_COLUMNS: &str = "id, email, password_hash, name, home_city, created_at";
const PLACE_COLUMNS: &str =
    "id, name, place_type, country_code, country_name, latitude, longitude, display_name";
const TRIP_COLUMNS: &str =
    "id, title, description, start_date, end_date, user_id, is_public, share_token, created_at";
const SEGMENT_COLUMNS: &str = "id, trip_id, origin_id, destination_id, transport_mode, distance, \
     carbon_footprint, departure_time, arrival_time, position";

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Closes every pooled connection. Safe to call more than once.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Round-trips a trivial query to prove the database is reachable.
    pub async fn ping(&self) -> Result<(), TripsError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<User, TripsError> {
        let created = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, email, password_hash, name, home_city, created_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(&user.home_city)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, TripsError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at, email"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, TripsError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn create_place(&self, place: &NewPlace) -> Result<Place, TripsError> {
        place.validate()?;

        let created = sqlx::query_as::<_, Place>(&format!(
            r#"
            INSERT INTO places (id, name, place_type, country_code, country_name,
                                latitude, longitude, display_name)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PLACE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&place.name)
        .bind(&place.place_type)
        .bind(&place.country_code)
        .bind(&place.country_name)
        .bind(place.latitude)
        .bind(place.longitude)
        .bind(&place.display_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    pub async fn count_places(&self) -> Result<i64, TripsError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM places")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Inserts a trip and all of its segments in one transaction.
    ///
    /// Segment positions are assigned 1..=n in the order given.
    pub async fn create_trip(&self, trip: &NewTrip) -> Result<TripWithSegments, TripsError> {
        trip.validate()?;

        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Trip>(&format!(
            r#"
            INSERT INTO trips (id, title, description, start_date, end_date,
                               user_id, is_public, share_token, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW())
            RETURNING {TRIP_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&trip.title)
        .bind(&trip.description)
        .bind(trip.start_date)
        .bind(trip.end_date)
        .bind(trip.user_id)
        .bind(trip.is_public)
        .bind(&trip.share_token)
        .fetch_one(&mut *tx)
        .await?;

        let mut segments = Vec::with_capacity(trip.segments.len());
        for (position, segment) in (1_i32..).zip(&trip.segments) {
            let inserted = sqlx::query_as::<_, Segment>(&format!(
                r#"
                INSERT INTO segments (id, trip_id, origin_id, destination_id, transport_mode,
                                      distance, carbon_footprint, departure_time, arrival_time,
                                      position)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING {SEGMENT_COLUMNS}
                "#
            ))
            .bind(Uuid::new_v4())
            .bind(created.id)
            .bind(segment.origin_id)
            .bind(segment.destination_id)
            .bind(segment.transport_mode)
            .bind(segment.distance)
            .bind(segment.carbon_footprint)
            .bind(segment.departure_time)
            .bind(segment.arrival_time)
            .bind(position)
            .fetch_one(&mut *tx)
            .await?;
            segments.push(inserted);
        }

        tx.commit().await?;
        debug!(trip_id = %created.id, segments = segments.len(), "trip committed");

        Ok(TripWithSegments {
            trip: created,
            segments,
        })
    }

    pub async fn get_trip_segments(&self, trip_id: Uuid) -> Result<Vec<Segment>, TripsError> {
        let segments = sqlx::query_as::<_, Segment>(&format!(
            "SELECT {SEGMENT_COLUMNS} FROM segments WHERE trip_id = $1 ORDER BY position"
        ))
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(segments)
    }

    pub async fn get_trip_by_share_token(
        &self,
        share_token: &str,
    ) -> Result<TripWithSegments, TripsError> {
        let trip = sqlx::query_as::<_, Trip>(&format!(
            "SELECT {TRIP_COLUMNS} FROM trips WHERE share_token = $1 AND is_public"
        ))
        .bind(share_token)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(TripsError::NotFound)?;

        let segments = self.get_trip_segments(trip.id).await?;
        Ok(TripWithSegments { trip, segments })
    }

    pub async fn count_user_trips(&self, user_id: Uuid) -> Result<i64, TripsError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM trips WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Segment count plus distance and carbon sums across all trips.
    pub async fn segment_totals(&self) -> Result<SegmentTotals, TripsError> {
        let totals = sqlx::query_as::<_, SegmentTotals>(
            r#"
            SELECT COUNT(*) AS segment_count,
                   COALESCE(SUM(distance), 0)::float8 AS total_distance,
                   COALESCE(SUM(carbon_footprint), 0)::float8 AS total_carbon
            FROM segments
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(totals)
    }
}
