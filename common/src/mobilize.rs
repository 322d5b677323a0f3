// Event source client for the Mobilize events API

use crate::config::MobilizeConfig;
use crate::errors::SourceError;
use crate::models::{Event, EventEnvelope, MobilizeEvent};
use crate::window::Window;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::Client;

/// MobilizeClient fetches raw events for a date window.
pub struct MobilizeClient {
    client: Client,
    base_url: String,
    organization_id: u64,
}

impl MobilizeClient {
    pub fn new(client: Client, config: &MobilizeConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            organization_id: config.organization_id,
        }
    }

    /// Fetch all events whose timeslots start inside the window.
    ///
    /// The window is encoded as two values of the same query key:
    /// `timeslot_start=gte_<start>` and `timeslot_start=lt_<end>`.
    #[tracing::instrument(skip(self, window), fields(start = window.start_epoch(), end = window.end_epoch()))]
    pub async fn fetch_events(&self, window: &Window) -> Result<Vec<MobilizeEvent>, SourceError> {
        let url = format!(
            "{}/organizations/{}/events",
            self.base_url, self.organization_id
        );
        tracing::info!(url = %url, "Fetching events for window");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("timeslot_start", format!("gte_{}", window.start_epoch())),
                ("timeslot_start", format!("lt_{}", window.end_epoch())),
            ])
            .send()
            .await
            .map_err(|e| SourceError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SourceError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(SourceError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: EventEnvelope =
            serde_json::from_str(&body).map_err(|e| SourceError::MalformedBody(e.to_string()))?;

        tracing::info!(count = envelope.data.len(), "Events fetched");
        Ok(envelope.data)
    }
}

/// Flatten nested timeslots into one record per slot.
///
/// Output preserves upstream order: events in response order, slots in the
/// order each event listed them. No filtering, sorting, or dedup.
pub fn flatten_events(raw: Vec<MobilizeEvent>) -> Result<Vec<Event>, SourceError> {
    let mut events = Vec::new();
    for event in raw {
        for slot in &event.timeslots {
            events.push(Event {
                id: slot.id,
                title: event.title.clone(),
                description: event.description.clone(),
                url: event.browser_url.clone(),
                start: epoch_to_utc(slot.id, slot.start_date)?,
                end: epoch_to_utc(slot.id, slot.end_date)?,
            });
        }
    }
    Ok(events)
}

fn epoch_to_utc(slot_id: u64, epoch: i64) -> Result<DateTime<Utc>, SourceError> {
    Utc.timestamp_opt(epoch, 0)
        .single()
        .ok_or(SourceError::InvalidTimestamp { slot_id, epoch })
}
