// Property-based tests for timeslot flattening

use common::mobilize::flatten_events;
use common::models::{MobilizeEvent, Timeslot};
use proptest::prelude::*;

fn timeslot_strategy() -> impl Strategy<Value = Timeslot> {
    (0u64..1_000_000u64, 0i64..4_000_000_000i64).prop_map(|(id, start)| Timeslot {
        id,
        start_date: start,
        end_date: start + 7200,
    })
}

fn event_strategy() -> impl Strategy<Value = MobilizeEvent> {
    (
        "[a-z ]{1,24}",
        "[a-z ]{0,48}",
        prop::collection::vec(timeslot_strategy(), 0..5),
    )
        .prop_map(|(title, description, timeslots)| MobilizeEvent {
            browser_url: format!("https://www.mobilize.us/org/event/{}/", title.len()),
            title,
            description,
            timeslots,
        })
}

fn events_strategy() -> impl Strategy<Value = Vec<MobilizeEvent>> {
    prop::collection::vec(event_strategy(), 0..8)
}

proptest! {
    /// For any upstream result, one record is produced per timeslot.
    #[test]
    fn prop_record_count_equals_total_timeslots(raw in events_strategy()) {
        let expected: usize = raw.iter().map(|e| e.timeslots.len()).sum();
        let events = flatten_events(raw).unwrap();
        prop_assert_eq!(events.len(), expected);
    }

    /// Flattening preserves upstream ordering of events and their slots.
    #[test]
    fn prop_flattening_preserves_order(raw in events_strategy()) {
        let expected_ids: Vec<u64> = raw
            .iter()
            .flat_map(|e| e.timeslots.iter().map(|s| s.id))
            .collect();
        let events = flatten_events(raw).unwrap();
        let ids: Vec<u64> = events.iter().map(|e| e.id).collect();
        prop_assert_eq!(ids, expected_ids);
    }

    /// Every record carries its parent's title/description/URL and its own
    /// slot's timing.
    #[test]
    fn prop_records_join_parent_fields_with_slot_timing(raw in events_strategy()) {
        let events = flatten_events(raw.clone()).unwrap();

        let mut flat = events.iter();
        for parent in &raw {
            for slot in &parent.timeslots {
                let record = flat.next().unwrap();
                prop_assert_eq!(&record.title, &parent.title);
                prop_assert_eq!(&record.description, &parent.description);
                prop_assert_eq!(&record.url, &parent.browser_url);
                prop_assert_eq!(record.start.timestamp(), slot.start_date);
                prop_assert_eq!(record.end.timestamp(), slot.end_date);
            }
        }
    }
}
