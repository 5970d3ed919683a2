mod common;

use common::{client_with, fixture, CountingGate, FixtureTransport};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;

use fsreg::api::gate::{ConcurrencyLimit, RequestGate};
use fsreg::api::{lookup, RawResponse, RegisterClient, ResolutionResult, ResourceType, BASE_URL};
use fsreg::error::{FsrError, RequestErrorKind};

#[test]
fn test_lookup_round_trips_every_kind() {
    for kind in ResourceType::ALL {
        let info = lookup(kind.as_str()).unwrap();
        assert_eq!(info.resource_type, kind);
        assert_eq!(ResourceType::from_str(info.type_name), Some(kind));
    }

    for name in ["Firm", "bank", "", "individuals", "cis"] {
        assert!(matches!(lookup(name), Err(FsrError::InvalidResourceType(_))), "{name}");
    }
}

#[tokio::test]
async fn test_invalid_modifiers_never_reach_the_network() {
    let transport = Arc::new(FixtureTransport::new());
    let gate = Arc::new(CountingGate::default());
    let client = client_with(transport.clone(), gate.clone());

    let cases: [(&str, &[&str]); 4] = [
        ("firm", &["Subfund"]),
        ("fund", &["CF"]),
        ("individual", &["CF", "AR"]),
        ("firm", &["names"]),
    ];
    for (kind, modifiers) in cases {
        let err = client
            .get_resource_info("113849", kind, modifiers)
            .await
            .unwrap_err();
        assert!(matches!(err, FsrError::InvalidModifier { .. }), "{kind} {modifiers:?}");
    }

    assert!(transport.requests().is_empty());
    assert_eq!(gate.acquired(), 0);
}

#[tokio::test]
async fn test_transport_failure_is_always_a_request_error() {
    let transport = Arc::new(FixtureTransport::unreachable());
    let gate = Arc::new(CountingGate::default());
    let client = client_with(transport.clone(), gate.clone());

    for kind in ["firm", "fund", "individual"] {
        let err = client.get_resource_info("1", kind, &[]).await.unwrap_err();
        assert_eq!(err.request_kind(), Some(RequestErrorKind::Transport));

        let err = client.common_search("acme", kind).await.unwrap_err();
        assert_eq!(err.request_kind(), Some(RequestErrorKind::Transport));

        let err = client
            .search_reference_number("acme", kind)
            .await
            .unwrap_err();
        assert_eq!(err.request_kind(), Some(RequestErrorKind::Transport));
    }

    assert_eq!(transport.requests().len(), 9);
    assert_eq!(gate.acquired(), 9);
    assert_eq!(gate.in_flight(), 0);
}

#[tokio::test]
async fn test_unknown_firm_is_an_empty_success() {
    let transport = Arc::new(FixtureTransport::new().route(
        "Firm/1234567890",
        &[],
        "firm_no_result.json",
    ));
    let client = client_with(transport, Arc::new(CountingGate::default()));

    let outcome = client
        .get_resource_info("1234567890", "firm", &[])
        .await
        .unwrap();
    assert!(outcome.is_success);
    assert!(outcome.is_empty_result());
    assert_eq!(outcome.data, json!([]));
    assert_eq!(outcome.status_code, "FSR-API-02-01-11");
}

#[tokio::test]
async fn test_no_result_search_is_no_match_for_resolution() {
    let transport = Arc::new(FixtureTransport::new().route(
        "Search",
        &[("q", "nonexistent firm"), ("type", "firm")],
        "search_no_result.json",
    ));
    let client = client_with(transport, Arc::new(CountingGate::default()));

    let outcome = client.common_search("nonexistent firm", "firm").await.unwrap();
    assert!(outcome.is_success);
    assert_eq!(outcome.data, json!([]));

    let err = client.search_frn("nonexistent firm").await.unwrap_err();
    assert_eq!(err.request_kind(), Some(RequestErrorKind::NoMatch));
}

#[tokio::test]
async fn test_single_candidate_resolves_to_reference_number() {
    let transport = Arc::new(FixtureTransport::new().route(
        "Search",
        &[("q", "mark carney"), ("type", "individual")],
        "individual_search_mark_carney.json",
    ));
    let client = client_with(transport, Arc::new(CountingGate::default()));

    let result = client
        .search_reference_number("mark carney", "individual")
        .await
        .unwrap();
    assert_eq!(result, ResolutionResult::Resolved("MXC29012".to_string()));
    assert_eq!(serde_json::to_value(&result).unwrap(), json!("MXC29012"));
}

#[tokio::test]
async fn test_many_candidates_keep_fixture_order() {
    let transport = Arc::new(FixtureTransport::new().route(
        "Search",
        &[("q", "andrew bailey"), ("type", "individual")],
        "individual_search_andrew_bailey.json",
    ));
    let client = client_with(transport, Arc::new(CountingGate::default()));

    let result = client.search_irn("andrew bailey").await.unwrap();
    let candidates = result.candidates().unwrap();

    let body: Value = serde_json::from_str(&fixture("individual_search_andrew_bailey.json")).unwrap();
    let expected: Vec<&str> = body["Data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["Reference Number"].as_str().unwrap())
        .collect();

    assert_eq!(candidates.len(), 20);
    assert_eq!(
        candidates
            .iter()
            .map(|c| c.reference_number.as_str())
            .collect::<Vec<_>>(),
        expected
    );
    assert_eq!(candidates[0].name, "Andrew Bailey");
    assert_eq!(candidates[1].name, "Andrew John Bailey");
}

#[tokio::test]
async fn test_permits_balance_after_failures() {
    let transport = Arc::new(
        FixtureTransport::new()
            .route("Firm/113849", &[], "firm_113849.json")
            .route_raw("Firm/113849/Names", &[], RawResponse::new(200, "<html>maintenance</html>"))
            .route_raw(
                "Search",
                &[("q", "broken"), ("type", "firm")],
                RawResponse::new(200, r#"{"Status": "FSR-API-04-01-00", "Message": "Ok", "Data": [{"Name": "No reference"}]}"#),
            ),
    );
    let gate = Arc::new(CountingGate::default());
    let client = client_with(transport, gate.clone());

    assert!(client.get_firm("113849").await.is_ok());
    assert!(client.get_firm_names("113849").await.unwrap_err().is_response_error());
    assert!(client.search_frn("broken").await.unwrap_err().is_response_error());
    // unrouted requests fail in the transport
    assert!(client.get_firm_waivers("113849").await.unwrap_err().is_request_error());
    // invalid input never takes a permit
    assert!(client.get_resource_info("113849", "bank", &[]).await.is_err());

    assert_eq!(gate.acquired(), 4);
    assert_eq!(gate.released(), 4);
}

#[tokio::test]
async fn test_concurrent_batch_under_concurrency_limit() {
    let transport = Arc::new(
        FixtureTransport::new()
            .route(
                "Search",
                &[("q", "mark carney"), ("type", "individual")],
                "individual_search_mark_carney.json",
            )
            .route(
                "Search",
                &[("q", "andrew bailey"), ("type", "individual")],
                "individual_search_andrew_bailey.json",
            ),
    );
    let gate = Arc::new(ConcurrencyLimit::new(1));
    let client = RegisterClient::with_transport(transport.clone(), gate.clone(), BASE_URL).unwrap();

    let results = client
        .search_reference_numbers(&["mark carney", "andrew bailey", "nobody"], "individual")
        .await
        .unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().reference_number(), Some("MXC29012"));
    assert_eq!(results[1].as_ref().unwrap().candidates().map(<[_]>::len), Some(20));
    assert!(results[2].as_ref().unwrap_err().is_request_error());
    assert_eq!(gate.available(), 1);
    assert_eq!(gate.name(), "concurrency");
    assert_eq!(transport.requests().len(), 3);
}

#[tokio::test]
async fn test_appointed_representatives_and_names() {
    let transport = Arc::new(
        FixtureTransport::new()
            .route("Firm/113849/AR", &[], "firm_113849_ar.json")
            .route("Firm/113849/Names", &[], "firm_113849_names.json"),
    );
    let client = client_with(transport, Arc::new(CountingGate::default()));

    let ar = client.get_firm_appointed_representatives("113849").await.unwrap();
    assert_eq!(
        ar.data["CurrentAppointedRepresentatives"][0]["FRN"],
        json!("900001")
    );

    let names = client.get_firm_names("113849").await.unwrap();
    assert_eq!(names.records().map(Vec::len), Some(2));
    assert_eq!(names.result_info.unwrap().total_count, Some(1));
}

#[tokio::test]
async fn test_regulated_markets_fixture() {
    let transport = Arc::new(FixtureTransport::new().route(
        "CommonSearch",
        &[("q", "RM")],
        "regulated_markets.json",
    ));
    let client = client_with(transport, Arc::new(CountingGate::default()));

    let outcome = client.get_regulated_markets().await.unwrap();
    assert!(outcome.is_success);
    assert_eq!(outcome.data[1]["Name"], json!("ICE Futures Europe"));
}

#[tokio::test]
async fn test_firm_search_reports_paging() {
    let transport = Arc::new(FixtureTransport::new().route(
        "Search",
        &[("q", "hiscox insurance company"), ("type", "firm")],
        "firm_search_hiscox.json",
    ));
    let client = client_with(transport, Arc::new(CountingGate::default()));

    let outcome = client
        .common_search("hiscox insurance company", "firm")
        .await
        .unwrap();
    let info = outcome.result_info.clone().unwrap();
    assert_eq!(info.total_count, Some(1));
    assert_eq!(info.next, None);

    let frn = client.search_frn("hiscox insurance company").await.unwrap();
    assert_eq!(frn.reference_number(), Some("113849"));
}

#[tokio::test]
async fn test_rows_with_null_fields_still_resolve() {
    let transport = Arc::new(FixtureTransport::new().route_raw(
        "Search",
        &[("q", "acme"), ("type", "firm")],
        RawResponse::new(
            200,
            json!({
                "Status": "FSR-API-04-01-00",
                "Message": "Ok. Search successful",
                "Data": [
                    {"Name": "Acme Ltd", "Reference Number": "100001", "Status": null, "URL": null},
                    {"Name": null, "Reference Number": "100002", "Type of business or Individual": null}
                ]
            })
            .to_string(),
        ),
    ));
    let client = client_with(transport, Arc::new(CountingGate::default()));

    let result = client.search_frn("acme").await.unwrap();
    let candidates = result.candidates().unwrap();
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].status, "");
    assert_eq!(candidates[1].reference_number, "100002");
    assert_eq!(candidates[1].name, "");
}
