//! Admin-only endpoints. The server enforces the admin check; these
//! bindings only shape the requests.

use blablabil_core::User;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::bookings::Booking;
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::support::SupportTicket;
use crate::trips::Trip;

/// Marketplace totals for the admin dashboard.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub active_trips: u64,
    #[serde(default)]
    pub monthly_bookings: u64,
    /// Gross revenue in NOK.
    #[serde(default)]
    pub revenue: f64,
}

/// Moderation status of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Suspended,
    Banned,
}

/// Page and filter parameters shared by the admin list endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminListQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for AdminListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            status: None,
            search: None,
        }
    }
}

impl AdminListQuery {
    pub fn page(page: u32) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserPage {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(flatten)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripPage {
    #[serde(default)]
    pub trips: Vec<Trip>,
    #[serde(flatten)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingPage {
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(flatten)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TicketPage {
    #[serde(default)]
    pub tickets: Vec<SupportTicket>,
    #[serde(flatten)]
    pub pagination: Pagination,
}

#[derive(Deserialize)]
struct StatsEnvelope {
    stats: DashboardStats,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: User,
}

#[derive(Serialize)]
struct StatusRequest {
    status: AccountStatus,
}

#[derive(Clone)]
pub struct AdminApi {
    client: ApiClient,
}

impl AdminApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        let envelope: StatsEnvelope = self
            .client
            .fetch(self.client.request(Method::GET, "/admin/dashboard"))
            .await?;
        Ok(envelope.stats)
    }

    pub async fn users(&self, query: &AdminListQuery) -> Result<UserPage, ApiError> {
        self.client
            .fetch(self.client.request(Method::GET, "/admin/users").query(query))
            .await
    }

    pub async fn trips(&self, query: &AdminListQuery) -> Result<TripPage, ApiError> {
        self.client
            .fetch(self.client.request(Method::GET, "/admin/trips").query(query))
            .await
    }

    pub async fn bookings(&self, query: &AdminListQuery) -> Result<BookingPage, ApiError> {
        self.client
            .fetch(
                self.client
                    .request(Method::GET, "/admin/bookings")
                    .query(query),
            )
            .await
    }

    pub async fn support_tickets(&self, query: &AdminListQuery) -> Result<TicketPage, ApiError> {
        self.client
            .fetch(
                self.client
                    .request(Method::GET, "/admin/support/tickets")
                    .query(query),
            )
            .await
    }

    /// Changes the moderation status of a user account.
    pub async fn update_user_status(
        &self,
        user_id: &str,
        status: AccountStatus,
    ) -> Result<User, ApiError> {
        let body = StatusRequest { status };
        let envelope: UserEnvelope = self
            .client
            .fetch(
                self.client
                    .request(Method::PUT, &format!("/admin/users/{user_id}/status"))
                    .json(&body),
            )
            .await?;
        Ok(envelope.user)
    }
}
