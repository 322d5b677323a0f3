use chrono::{DateTime, Utc};
use serde::Deserialize;

// ============================================================================
// Upstream (Mobilize) payloads
// ============================================================================

/// Envelope returned by the Mobilize events endpoint.
///
/// The response carries several sections (`count`, `next`, `previous`, ...);
/// only `data` is consumed and a response without it fails to decode.
#[derive(Debug, Clone, Deserialize)]
pub struct EventEnvelope {
    pub data: Vec<MobilizeEvent>,
}

/// One event as returned by the upstream API, before flattening.
///
/// Absent fields decode to their empty values; upstream shape is not
/// validated beyond what deserialization enforces.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MobilizeEvent {
    pub title: String,
    pub description: String,
    pub browser_url: String,
    pub timeslots: Vec<Timeslot>,
}

/// A single occurrence of an upstream event, in epoch seconds.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct Timeslot {
    pub id: u64,
    pub start_date: i64,
    pub end_date: i64,
}

// ============================================================================
// Flattened event records
// ============================================================================

/// One announceable occurrence: parent event fields joined with one
/// timeslot's timing.
///
/// `id` is the originating timeslot id. Slot ids are assigned per slot,
/// not per event, so ids can collide across the flattened result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub url: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

// ============================================================================
// Bot credentials
// ============================================================================

/// Application identity stored in the secret store as a JSON object.
///
/// Resolved fresh on every trigger invocation and held in memory only for
/// the duration of one request.
#[derive(Debug, Clone, Deserialize)]
pub struct BotCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}
