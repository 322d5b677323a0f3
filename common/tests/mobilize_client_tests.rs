// Event source client tests against a stub upstream

use chrono::TimeZone;
use chrono_tz::America::New_York;
use common::config::MobilizeConfig;
use common::errors::SourceError;
use common::mobilize::{flatten_events, MobilizeClient};
use common::window::Window;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> MobilizeClient {
    MobilizeClient::new(
        reqwest::Client::new(),
        &MobilizeConfig {
            base_url: server.uri(),
            organization_id: 42,
        },
    )
}

fn march_window() -> Window {
    Window {
        start: New_York.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap(),
        end: New_York.with_ymd_and_hms(2024, 3, 12, 0, 0, 0).unwrap(),
    }
}

#[tokio::test]
async fn test_window_is_encoded_as_repeated_query_key() {
    let server = MockServer::start().await;
    let window = march_window();

    Mock::given(method("GET"))
        .and(path("/organizations/42/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "count": 0,
            "data": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let events = client_for(&server).fetch_events(&window).await.unwrap();
    assert!(events.is_empty());

    // Both bounds travel as values of the same query key.
    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap().to_string();
    assert!(query.contains(&format!("timeslot_start=gte_{}", window.start_epoch())));
    assert!(query.contains(&format!("timeslot_start=lt_{}", window.end_epoch())));

    server.verify().await;
}

#[tokio::test]
async fn test_fetch_and_flatten_preserve_upstream_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations/42/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "count": 2,
            "next": null,
            "data": [
                {
                    "title": "Canvass kickoff",
                    "description": "Doors in the morning, doors at night.",
                    "browser_url": "https://www.mobilize.us/org/event/1001/",
                    "timeslots": [
                        {"id": 501, "start_date": 1710162000, "end_date": 1710165600},
                        {"id": 502, "start_date": 1710190800, "end_date": 1710194400}
                    ]
                },
                {
                    "title": "Phone bank",
                    "description": "Calls.",
                    "browser_url": "https://www.mobilize.us/org/event/1002/",
                    "timeslots": [
                        {"id": 777, "start_date": 1710180000, "end_date": 1710183600}
                    ]
                }
            ]
        })))
        .mount(&server)
        .await;

    let raw = client_for(&server)
        .fetch_events(&march_window())
        .await
        .unwrap();
    let events = flatten_events(raw).unwrap();

    assert_eq!(events.len(), 3);
    let ids: Vec<u64> = events.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![501, 502, 777]);
    assert_eq!(events[0].title, events[1].title);
    assert_eq!(events[0].url, "https://www.mobilize.us/org/event/1001/");
    assert_eq!(events[2].title, "Phone bank");
}

#[tokio::test]
async fn test_event_without_timeslots_yields_no_records() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations/42/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {
                    "title": "No occurrences yet",
                    "description": "",
                    "browser_url": "https://www.mobilize.us/org/event/1003/",
                    "timeslots": []
                }
            ]
        })))
        .mount(&server)
        .await;

    let raw = client_for(&server)
        .fetch_events(&march_window())
        .await
        .unwrap();
    assert_eq!(raw.len(), 1);
    assert!(flatten_events(raw).unwrap().is_empty());
}

#[tokio::test]
async fn test_bad_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations/42/events"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_events(&march_window())
        .await
        .unwrap_err();

    assert!(matches!(err, SourceError::BadStatus { status: 503, .. }));
}

#[tokio::test]
async fn test_missing_data_section_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations/42/events"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"count": 3})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_events(&march_window())
        .await
        .unwrap_err();

    assert!(matches!(err, SourceError::MalformedBody(_)));
}

#[tokio::test]
async fn test_non_json_body_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations/42/events"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_events(&march_window())
        .await
        .unwrap_err();

    assert!(matches!(err, SourceError::MalformedBody(_)));
}
