// Posting pipeline: title formatting and the ordered submission loop

use crate::errors::PostError;
use crate::models::Event;
use async_trait::async_trait;
use chrono_tz::Tz;

/// The seam between the pipeline and the forum.
///
/// `RedditSession` is the production implementation; tests substitute
/// recording stubs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkPoster: Send + Sync {
    async fn submit_link(&self, title: &str, url: &str) -> Result<(), PostError>;
}

/// Render a post title: `[Mar 11, 7:30 PM Eastern] <event title>`.
pub fn format_title(event: &Event, tz: Tz, label: &str) -> String {
    let start = event.start.with_timezone(&tz);
    format!(
        "[{} {}] {}",
        start.format("%b %-d, %-I:%M %p"),
        label,
        event.title
    )
}

/// Submit one link post per event, strictly in input order.
///
/// The first failed submission aborts the batch; remaining events are never
/// attempted. Returns the number of posts submitted on full success.
#[tracing::instrument(skip(poster, events), fields(count = events.len()))]
pub async fn post_events(
    poster: &dyn LinkPoster,
    tz: Tz,
    label: &str,
    events: &[Event],
) -> Result<usize, PostError> {
    for event in events {
        let title = format_title(event, tz, label);
        tracing::info!(slot_id = event.id, title = %title, "Submitting event");
        poster.submit_link(&title, &event.url).await?;
    }
    Ok(events.len())
}
