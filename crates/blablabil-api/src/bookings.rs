//! Seat booking endpoints.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::trips::Trip;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Vipps,
    Cash,
}

/// A passenger's reservation on a trip.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub trip_id: String,
    pub passenger_id: String,
    pub seats: u32,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    /// Total charged for all seats, in NOK.
    pub total_amount: f64,
    pub status: BookingStatus,
    /// Embedded trip record, when the endpoint expands it.
    #[serde(default)]
    pub trip: Option<Trip>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Payload for reserving seats on a trip.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub trip_id: String,
    pub passenger_id: String,
    pub seats: u32,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    pub total_amount: f64,
}

/// Payload confirming payment for a booking.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

#[derive(Deserialize)]
struct BookingEnvelope {
    booking: Booking,
}

#[derive(Deserialize)]
struct BookingsEnvelope {
    #[serde(default)]
    bookings: Vec<Booking>,
}

#[derive(Clone)]
pub struct BookingsApi {
    client: ApiClient,
}

impl BookingsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Reserves seats on a trip.
    pub async fn create(&self, booking: &NewBooking) -> Result<Booking, ApiError> {
        let envelope: BookingEnvelope = self
            .client
            .fetch(self.client.request(Method::POST, "/bookings").json(booking))
            .await?;
        Ok(envelope.booking)
    }

    pub async fn get(&self, booking_id: &str) -> Result<Booking, ApiError> {
        let envelope: BookingEnvelope = self
            .client
            .fetch(
                self.client
                    .request(Method::GET, &format!("/bookings/{booking_id}")),
            )
            .await?;
        Ok(envelope.booking)
    }

    pub async fn cancel(&self, booking_id: &str) -> Result<(), ApiError> {
        self.client
            .fire(
                self.client
                    .request(Method::DELETE, &format!("/bookings/{booking_id}")),
            )
            .await
    }

    /// Lists all bookings made by a user.
    pub async fn for_user(&self, user_id: &str) -> Result<Vec<Booking>, ApiError> {
        let envelope: BookingsEnvelope = self
            .client
            .fetch(
                self.client
                    .request(Method::GET, &format!("/bookings/user/{user_id}")),
            )
            .await?;
        Ok(envelope.bookings)
    }

    /// Confirms payment for a pending booking.
    pub async fn confirm_payment(
        &self,
        booking_id: &str,
        confirmation: &PaymentConfirmation,
    ) -> Result<Booking, ApiError> {
        let envelope: BookingEnvelope = self
            .client
            .fetch(
                self.client
                    .request(Method::POST, &format!("/bookings/{booking_id}/payment"))
                    .json(confirmation),
            )
            .await?;
        Ok(envelope.booking)
    }
}
