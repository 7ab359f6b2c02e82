use super::*;

use serde_json::json;

use crate::catalog::search_params;

fn fixture() -> FixtureClient {
    FixtureClient::from_value(json!({
        "Catalogs": {
            "*": {"data": [{"Qualified Name": "qa"}]},
            "qa": {"data": [{"Qualified Name": "qa", "Containing Members": ["m1"]}]},
            "broken": {"$error": "view server unavailable"}
        }
    }))
    .unwrap()
}

#[test]
fn exact_search_wins() {
    let payload = fixture().query("Catalogs", &search_params("qa")).unwrap();
    assert_eq!(payload["data"][0]["Containing Members"], json!(["m1"]));
}

#[test]
fn falls_back_to_wildcard() {
    let payload = fixture().query("Catalogs", &search_params("other")).unwrap();
    assert_eq!(payload["data"][0]["Qualified Name"], json!("qa"));

    let no_search = fixture().query("Catalogs", &QueryParams::new()).unwrap();
    assert_eq!(no_search, payload);
}

#[test]
fn error_marker_fails_the_query() {
    let err = fixture()
        .query("Catalogs", &search_params("broken"))
        .unwrap_err();
    assert_eq!(err.to_string(), "view server unavailable");
}

#[test]
fn unknown_query_fails() {
    let err = fixture().query("Nope", &search_params("*")).unwrap_err();
    assert!(err.to_string().contains("unknown query Nope"));
}

#[test]
fn missing_search_without_wildcard_fails() {
    let client = FixtureClient::new().with("Explore", "m1", json!({"Qualified Name": "m1"}));
    assert!(client.query("Explore", &search_params("m1")).is_ok());
    assert!(client.query("Explore", &search_params("m2")).is_err());
}

#[test]
fn rejects_malformed_documents() {
    assert!(FixtureClient::from_value(json!([])).is_err());
    assert!(FixtureClient::from_value(json!({"Catalogs": []})).is_err());
}
