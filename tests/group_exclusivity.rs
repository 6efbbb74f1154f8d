use calswitch::{
    AvailabilityClient, CacheRegion, CalendarSwitch, GroupBus, GroupToggleSignal, Notifier,
    QueryCache, Severity, SwitchContext, SwitchProps,
};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct RecordingCache {
    invalidated: Mutex<Vec<CacheRegion>>,
}

impl QueryCache for RecordingCache {
    fn invalidate(&self, region: CacheRegion) {
        self.invalidated.lock().unwrap().push(region);
    }
}

#[derive(Default)]
struct RecordingNotifier {
    toasts: Mutex<Vec<(String, Severity)>>,
}

impl Notifier for RecordingNotifier {
    fn toast(&self, message: &str, severity: Severity) {
        self.toasts
            .lock()
            .unwrap()
            .push((message.to_string(), severity));
    }
}

fn grouped_page(base_url: &str, bus: &Arc<GroupBus>) -> SwitchContext {
    SwitchContext {
        api: Arc::new(AvailabilityClient::new(base_url).unwrap()),
        cache: Arc::new(RecordingCache::default()),
        notifier: Arc::new(RecordingNotifier::default()),
        group_bus: Some(bus.clone()),
    }
}

fn grouped_props(external_id: &str, checked: bool) -> SwitchProps {
    SwitchProps {
        is_free: true,
        title: format!("Calendar {}", external_id),
        external_id: external_id.to_string(),
        integration: "google_calendar".to_string(),
        is_checked: checked,
        name: external_id.to_string(),
        credential_id: 42,
        delegation_credential_id: None,
        event_type_id: None,
        disabled: false,
        group_id: Some("destination".to_string()),
        unique_id: external_id.to_string(),
        destination: false,
    }
}

#[tokio::test]
async fn test_enabling_one_switch_turns_group_sibling_off_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/availability/calendar"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let bus = GroupBus::new();
    let ctx = grouped_page(&server.uri(), &bus);

    let a = CalendarSwitch::new(grouped_props("cal-a", false), ctx.clone()).unwrap();
    let b = CalendarSwitch::new(grouped_props("cal-b", true), ctx.clone()).unwrap();
    assert!(b.is_checked());

    a.set_checked(true).await.unwrap();

    assert!(a.is_checked());
    assert!(!b.is_checked());

    // The sibling was reconciled locally: the only request on the wire is
    // the enabling switch's own.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["externalId"], json!("cal-a"));
}

#[tokio::test]
async fn test_signal_for_other_group_changes_nothing() {
    let bus = GroupBus::new();
    // Never contacted.
    let ctx = grouped_page("http://127.0.0.1:9", &bus);

    let b = CalendarSwitch::new(grouped_props("cal-b", true), ctx.clone()).unwrap();

    bus.broadcast(&GroupToggleSignal {
        group_id: "other-group".to_string(),
        unique_id: "cal-a".to_string(),
    });

    assert!(b.is_checked());
}

#[tokio::test]
async fn test_own_signal_never_self_deactivates() {
    let bus = GroupBus::new();
    let ctx = grouped_page("http://127.0.0.1:9", &bus);

    let b = CalendarSwitch::new(grouped_props("cal-b", true), ctx.clone()).unwrap();

    bus.broadcast(&GroupToggleSignal {
        group_id: "destination".to_string(),
        unique_id: "cal-b".to_string(),
    });

    assert!(b.is_checked());
}

#[tokio::test]
async fn test_already_off_sibling_ignores_signal() {
    let bus = GroupBus::new();
    let ctx = grouped_page("http://127.0.0.1:9", &bus);

    let b = CalendarSwitch::new(grouped_props("cal-b", false), ctx.clone()).unwrap();

    bus.broadcast(&GroupToggleSignal {
        group_id: "destination".to_string(),
        unique_id: "cal-a".to_string(),
    });

    assert!(!b.is_checked());
    assert!(!b.is_pending());
}

#[tokio::test]
async fn test_dropped_switch_stops_listening() {
    let bus = GroupBus::new();
    let ctx = grouped_page("http://127.0.0.1:9", &bus);

    let b = CalendarSwitch::new(grouped_props("cal-b", true), ctx.clone()).unwrap();
    assert_eq!(bus.listener_count(), 1);

    drop(b);
    assert_eq!(bus.listener_count(), 0);

    // Broadcasting to an empty group is a no-op.
    bus.broadcast(&GroupToggleSignal {
        group_id: "destination".to_string(),
        unique_id: "cal-a".to_string(),
    });
}

#[tokio::test]
async fn test_ungrouped_switch_does_not_register() {
    let bus = GroupBus::new();
    let ctx = grouped_page("http://127.0.0.1:9", &bus);

    let mut props = grouped_props("cal-b", true);
    props.group_id = None;
    let b = CalendarSwitch::new(props, ctx.clone()).unwrap();

    assert_eq!(bus.listener_count(), 0);
    bus.broadcast(&GroupToggleSignal {
        group_id: "destination".to_string(),
        unique_id: "cal-a".to_string(),
    });
    assert!(b.is_checked());
}

#[tokio::test]
async fn test_late_success_after_force_off_stays_off() {
    let server = MockServer::start().await;
    // B's enable settles slowly; A's immediately.
    Mock::given(method("POST"))
        .and(path("/availability/calendar"))
        .and(body_json(json!({
            "integration": "google_calendar",
            "externalId": "cal-b",
            "credentialId": "42",
            "free": true,
        })))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(250)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/availability/calendar"))
        .and(body_json(json!({
            "integration": "google_calendar",
            "externalId": "cal-a",
            "credentialId": "42",
            "free": true,
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let bus = GroupBus::new();
    let ctx = grouped_page(&server.uri(), &bus);

    let a = CalendarSwitch::new(grouped_props("cal-a", false), ctx.clone()).unwrap();
    let b = Arc::new(CalendarSwitch::new(grouped_props("cal-b", false), ctx.clone()).unwrap());

    let b_task = {
        let b = b.clone();
        tokio::spawn(async move { b.set_checked(true).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(b.is_pending());

    // A turns on while B's enable is still in flight: B is forced off.
    a.set_checked(true).await.unwrap();
    assert!(!b.is_checked());

    // B's request then settles successfully, but must not resurrect "on".
    b_task.await.unwrap().unwrap();
    assert!(!b.is_checked());
    assert!(a.is_checked());
}
