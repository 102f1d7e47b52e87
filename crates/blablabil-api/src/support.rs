//! Support ticket and FAQ endpoints.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::ApiClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketCategory {
    General,
    Booking,
    Payment,
    Technical,
    Safety,
    Feedback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

/// A message in a ticket's conversation thread.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketMessage {
    pub message: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportTicket {
    pub id: String,
    pub subject: String,
    pub category: TicketCategory,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    #[serde(default)]
    pub messages: Vec<TicketMessage>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Payload for opening a ticket.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    pub subject: String,
    pub category: TicketCategory,
    pub priority: TicketPriority,
    pub message: String,
    pub user_id: String,
    pub user_email: String,
    pub user_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Serialize)]
struct TicketMessageRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct TicketEnvelope {
    ticket: SupportTicket,
}

#[derive(Deserialize)]
struct TicketsEnvelope {
    #[serde(default)]
    tickets: Vec<SupportTicket>,
}

#[derive(Deserialize)]
struct FaqEnvelope {
    #[serde(default)]
    faq: Vec<FaqItem>,
}

#[derive(Clone)]
pub struct SupportApi {
    client: ApiClient,
}

impl SupportApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Opens a new support ticket.
    pub async fn create_ticket(&self, ticket: &NewTicket) -> Result<SupportTicket, ApiError> {
        let envelope: TicketEnvelope = self
            .client
            .fetch(
                self.client
                    .request(Method::POST, "/support/tickets")
                    .json(ticket),
            )
            .await?;
        Ok(envelope.ticket)
    }

    /// Lists tickets opened by a user.
    pub async fn tickets_for_user(&self, user_id: &str) -> Result<Vec<SupportTicket>, ApiError> {
        let envelope: TicketsEnvelope = self
            .client
            .fetch(
                self.client
                    .request(Method::GET, &format!("/support/tickets/user/{user_id}")),
            )
            .await?;
        Ok(envelope.tickets)
    }

    pub async fn ticket(&self, ticket_id: &str) -> Result<SupportTicket, ApiError> {
        let envelope: TicketEnvelope = self
            .client
            .fetch(
                self.client
                    .request(Method::GET, &format!("/support/tickets/{ticket_id}")),
            )
            .await?;
        Ok(envelope.ticket)
    }

    /// Appends a message to an existing ticket's thread.
    pub async fn add_message(
        &self,
        ticket_id: &str,
        message: &str,
    ) -> Result<SupportTicket, ApiError> {
        let body = TicketMessageRequest { message };
        let envelope: TicketEnvelope = self
            .client
            .fetch(
                self.client
                    .request(Method::POST, &format!("/support/tickets/{ticket_id}/messages"))
                    .json(&body),
            )
            .await?;
        Ok(envelope.ticket)
    }

    /// Fetches the FAQ entries shown on the support page.
    pub async fn faq(&self) -> Result<Vec<FaqItem>, ApiError> {
        let envelope: FaqEnvelope = self
            .client
            .fetch(self.client.request(Method::GET, "/support/faq"))
            .await?;
        Ok(envelope.faq)
    }
}
