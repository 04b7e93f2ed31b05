use httpmock::prelude::*;
use pager::{ErrorKind, Pager, PagerConfig};
use serde_json::json;

const SERVICE_KEY: &str = "3961B1F4AD08424C9DA704DEBCBBF8F3";
const THREAD_LOCAL_KEY: &str = "09D0A4B9B3F54047BCD7B65704A58333";

fn mock_pager(server: &MockServer, service_key: &str) -> Pager {
    Pager::with_config(
        PagerConfig::builder()
            .service_key(service_key)
            .endpoint(server.url("/create_event.json"))
            .build(),
    )
}

#[test]
fn test_global_trigger_with_details() {
    let server = MockServer::start();
    let _guard = pager::configure_thread_local(mock_pager(&server, SERVICE_KEY));

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/create_event.json")
            .json_body(json!({
                "service_key": SERVICE_KEY,
                "event_type": "trigger",
                "description": "TestTriggerWithDetails",
                "details": {"testing": true},
            }));
        then.status(200)
            .json_body(json!({"status": "success", "incident_key": "K7"}));
    });

    let key = pager::trigger_with_details("TestTriggerWithDetails", vec![("testing", true)])
        .unwrap();
    assert_eq!(key, "K7");
    mock.assert();

    let retrigger = server.mock(|when, then| {
        when.method(POST).json_body(json!({
            "service_key": SERVICE_KEY,
            "event_type": "trigger",
            "description": "TestTriggerIncidentKeyWithDetails",
            "incident_key": "K7",
            "details": {"testing": true},
        }));
        then.status(200)
            .json_body(json!({"status": "success", "incident_key": "K7"}));
    });

    let again = pager::trigger_incident_key_with_details(
        "TestTriggerIncidentKeyWithDetails",
        &key,
        vec![("testing", true)],
    )
    .unwrap();
    assert_eq!(again, key);
    retrigger.assert();
}

#[test]
fn test_thread_local_guard_restores_previous() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200).json_body(json!({"status": "success"}));
    });

    let outer = pager::configure_thread_local(mock_pager(&server, THREAD_LOCAL_KEY));
    {
        let _inner = pager::configure_thread_local(mock_pager(&server, ""));
        let err = pager::resolve("K1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        mock.assert_hits(0);
    }

    assert!(pager::resolve("K1").unwrap().is_success());
    mock.assert_hits(1);

    drop(outer);
    assert_ne!(pager::default_pager().config().service_key(), THREAD_LOCAL_KEY);
}

#[test]
fn test_thread_local_does_not_leak_across_threads() {
    let server = MockServer::start();
    let _guard = pager::configure_thread_local(mock_pager(&server, THREAD_LOCAL_KEY));
    assert_eq!(
        pager::default_pager().config().service_key(),
        THREAD_LOCAL_KEY
    );

    std::thread::spawn(|| {
        assert_ne!(
            pager::default_pager().config().service_key(),
            THREAD_LOCAL_KEY
        );
    })
    .join()
    .unwrap();
}

// The only test in this binary that touches the process-wide default
#[test]
fn test_process_wide_default() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).json_body(json!({
            "service_key": SERVICE_KEY,
            "event_type": "trigger",
            "description": "TestPager",
            "details": {},
        }));
        then.status(202)
            .json_body(json!({"status": "success", "incident_key": "K3"}));
    });

    let err = pager::trigger("TestServiceKey").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);

    pager::set_endpoint(server.url("/create_event.json"));
    let err = pager::trigger("TestServiceKey").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    mock.assert_hits(0);

    pager::set_service_key(SERVICE_KEY);
    assert_eq!(pager::trigger("TestPager").unwrap(), "K3");
    mock.assert_hits(1);

    pager::configure(Pager::default());
    let err = pager::trigger("TestPager").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}
