//! Reservation Model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Reservation status (预订状态)
///
/// Carried on the wire as the integers 1..=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum ReservationStatus {
    Requested = 1,
    Approved = 2,
    Cancelled = 3,
    Completed = 4,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 4] = [
        ReservationStatus::Requested,
        ReservationStatus::Approved,
        ReservationStatus::Cancelled,
        ReservationStatus::Completed,
    ];

    #[inline]
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    /// Cancelled and Completed admit no further transition
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Approved => "approved",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    /// User-facing label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Requested => "待确认",
            Self::Approved => "已确认",
            Self::Cancelled => "已取消",
            Self::Completed => "已完成",
        }
    }
}

impl From<ReservationStatus> for u8 {
    #[inline]
    fn from(status: ReservationStatus) -> Self {
        status.code()
    }
}

/// Error when converting from an unknown status value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid reservation status: {0}")]
pub struct InvalidStatus(pub String);

impl TryFrom<u8> for ReservationStatus {
    type Error = InvalidStatus;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Requested),
            2 => Ok(Self::Approved),
            3 => Ok(Self::Cancelled),
            4 => Ok(Self::Completed),
            _ => Err(InvalidStatus(value.to_string())),
        }
    }
}

impl FromStr for ReservationStatus {
    type Err = InvalidStatus;

    /// Accepts the English name or the numeric code
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u8>() {
            return Self::try_from(n);
        }
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| InvalidStatus(s.to_string()))
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contact embedded in a reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
}

/// Table a reservation is seated at (capacity only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatedTable {
    pub seats: u32,
}

/// Reservation entity (预订)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    /// Requested date as sent by the backend
    pub date: String,
    pub number_of_people: u32,
    pub status: ReservationStatus,
    pub contact: Contact,
    pub table: SeatedTable,
}

/// List filters (all optional)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ReservationFilter {
    pub fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_seats(mut self, seats: u32) -> Self {
        self.seats = Some(seats);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Blank keywords are dropped rather than sent
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        self.keyword = (!keyword.trim().is_empty()).then_some(keyword);
        self
    }

    pub fn with_page(mut self, page: u32, limit: u32) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }
}

/// Create reservation payload (AddReservationInfoInput)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    pub number_of_people: u32,
    pub date: NaiveDate,
}

/// Fields a user may rewrite while the reservation is still Requested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReservationEdit {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    pub number_of_people: u32,
    pub date: NaiveDate,
}

/// Update reservation payload (UpdateReservationInfoInput)
///
/// Unset fields are omitted so the backend leaves them untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationUpdate {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_people: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl ReservationUpdate {
    /// Status-only update
    pub fn status(id: impl Into<String>, status: ReservationStatus) -> Self {
        Self {
            id: id.into(),
            status: Some(status),
            name: None,
            phone: None,
            number_of_people: None,
            date: None,
        }
    }

    /// Contact/date/party-size rewrite, status untouched
    pub fn edit(id: impl Into<String>, edit: &ReservationEdit) -> Self {
        Self {
            id: id.into(),
            status: None,
            name: Some(edit.name.clone()),
            phone: Some(edit.phone.clone()),
            number_of_people: Some(edit.number_of_people),
            date: Some(edit.date),
        }
    }
}
