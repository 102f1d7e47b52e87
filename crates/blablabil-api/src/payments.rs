//! Payment processing endpoints.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::bookings::PaymentMethod;
use crate::error::ApiError;
use crate::http::ApiClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

/// A processed or pending payment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    #[serde(default)]
    pub booking_id: Option<String>,
    /// Amount in NOK.
    pub amount: f64,
    pub status: PaymentStatus,
    #[serde(default)]
    pub method: Option<PaymentMethod>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Payload for starting a Vipps payment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VippsPayment {
    pub booking_id: String,
    pub amount: f64,
    /// Phone number registered with Vipps.
    pub phone: String,
}

#[derive(Serialize)]
struct RefundRequest<'a> {
    reason: &'a str,
}

#[derive(Deserialize)]
struct PaymentEnvelope {
    payment: Payment,
}

#[derive(Deserialize)]
struct PaymentsEnvelope {
    #[serde(default)]
    payments: Vec<Payment>,
}

#[derive(Clone)]
pub struct PaymentsApi {
    client: ApiClient,
}

impl PaymentsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Starts a Vipps payment for a booking.
    pub async fn process_vipps(&self, payment: &VippsPayment) -> Result<Payment, ApiError> {
        let envelope: PaymentEnvelope = self
            .client
            .fetch(
                self.client
                    .request(Method::POST, "/payments/vipps")
                    .json(payment),
            )
            .await?;
        Ok(envelope.payment)
    }

    /// Lists a user's past payments.
    pub async fn history(&self, user_id: &str) -> Result<Vec<Payment>, ApiError> {
        let envelope: PaymentsEnvelope = self
            .client
            .fetch(
                self.client
                    .request(Method::GET, &format!("/payments/history/{user_id}")),
            )
            .await?;
        Ok(envelope.payments)
    }

    /// Requests a refund for a payment.
    pub async fn request_refund(&self, payment_id: &str, reason: &str) -> Result<Payment, ApiError> {
        let body = RefundRequest { reason };
        let envelope: PaymentEnvelope = self
            .client
            .fetch(
                self.client
                    .request(Method::POST, &format!("/payments/{payment_id}/refund"))
                    .json(&body),
            )
            .await?;
        Ok(envelope.payment)
    }
}
