//! Trip search, publishing and management endpoints.

use blablabil_core::{RidePreferences, User};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::ApiClient;

/// A published ride offer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub from_city: String,
    pub to_city: String,
    /// Travel date, `YYYY-MM-DD`.
    pub date: String,
    /// Local departure time, `HH:MM`.
    pub departure_time: String,
    #[serde(default)]
    pub arrival_time: Option<String>,
    /// Price per seat in NOK.
    pub price_per_seat: f64,
    pub total_seats: u32,
    pub available_seats: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stops: Vec<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub vehicle: Option<Vehicle>,
    #[serde(default)]
    pub preferences: Option<RidePreferences>,
    #[serde(default)]
    pub driver: Option<User>,
    #[serde(default)]
    pub driver_id: Option<String>,
    #[serde(default = "TripStatus::active")]
    pub status: TripStatus,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub make: String,
    pub model: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub license_plate: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    Active,
    Completed,
    Cancelled,
}

impl TripStatus {
    fn active() -> Self {
        Self::Active
    }
}

/// Which side of a trip a user is on, for `/trips/user/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripRole {
    Driver,
    Passenger,
    All,
}

impl TripRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Driver => "driver",
            Self::Passenger => "passenger",
            Self::All => "all",
        }
    }
}

/// Payload for publishing a new trip.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrip {
    pub from_city: String,
    pub to_city: String,
    pub date: String,
    pub departure_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
    pub price_per_seat: f64,
    pub total_seats: u32,
    pub available_seats: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub stops: Vec<String>,
    pub vehicle: Vehicle,
    pub preferences: RidePreferences,
    pub driver_id: String,
}

/// Partial trip update; only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_seat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_seats: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<RidePreferences>,
}

/// Query for `/trips/search`. Unset filters are omitted from the URL.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSearchQuery {
    pub from: String,
    pub to: String,
    pub date: String,
    pub passengers: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
}

#[derive(Deserialize)]
struct TripEnvelope {
    trip: Trip,
}

#[derive(Deserialize)]
struct TripsEnvelope {
    #[serde(default)]
    trips: Vec<Trip>,
}

#[derive(Clone)]
pub struct TripsApi {
    client: ApiClient,
}

impl TripsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Searches published trips matching the query.
    pub async fn search(&self, query: &TripSearchQuery) -> Result<Vec<Trip>, ApiError> {
        let envelope: TripsEnvelope = self
            .client
            .fetch(
                self.client
                    .request(Method::GET, "/trips/search")
                    .query(query),
            )
            .await?;
        Ok(envelope.trips)
    }

    pub async fn get(&self, trip_id: &str) -> Result<Trip, ApiError> {
        let envelope: TripEnvelope = self
            .client
            .fetch(self.client.request(Method::GET, &format!("/trips/{trip_id}")))
            .await?;
        Ok(envelope.trip)
    }

    /// Publishes a new trip and returns it with its assigned id.
    pub async fn create(&self, trip: &NewTrip) -> Result<Trip, ApiError> {
        let envelope: TripEnvelope = self
            .client
            .fetch(self.client.request(Method::POST, "/trips").json(trip))
            .await?;
        Ok(envelope.trip)
    }

    pub async fn update(&self, trip_id: &str, update: &TripUpdate) -> Result<Trip, ApiError> {
        let envelope: TripEnvelope = self
            .client
            .fetch(
                self.client
                    .request(Method::PUT, &format!("/trips/{trip_id}"))
                    .json(update),
            )
            .await?;
        Ok(envelope.trip)
    }

    /// Cancels a published trip.
    pub async fn cancel(&self, trip_id: &str) -> Result<(), ApiError> {
        self.client
            .fire(
                self.client
                    .request(Method::DELETE, &format!("/trips/{trip_id}")),
            )
            .await
    }

    /// Lists trips a user takes part in, filtered by role.
    pub async fn for_user(&self, user_id: &str, role: TripRole) -> Result<Vec<Trip>, ApiError> {
        let envelope: TripsEnvelope = self
            .client
            .fetch(
                self.client
                    .request(Method::GET, &format!("/trips/user/{user_id}"))
                    .query(&[("role", role.as_str())]),
            )
            .await?;
        Ok(envelope.trips)
    }
}
