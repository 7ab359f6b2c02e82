use super::*;

use time::Duration as TimeDuration;

fn at(ts: &str) -> OffsetDateTime {
    OffsetDateTime::parse(ts, &Rfc3339).unwrap()
}

#[test]
fn fmt_ts_ui_renders_utc_without_fraction() {
    assert_eq!(fmt_ts_ui("2026-03-04T05:06:07.123Z"), "2026-03-04 05:06:07Z");
}

#[test]
fn fmt_ts_ui_passes_through_unparseable_text() {
    assert_eq!(fmt_ts_ui("yesterday"), "yesterday");
}

#[test]
fn fmt_since_buckets() {
    let ts = "2026-03-04T05:06:07Z";
    let base = at(ts);
    assert_eq!(fmt_since(ts, base + TimeDuration::seconds(30)).as_deref(), Some("just now"));
    assert_eq!(fmt_since(ts, base + TimeDuration::minutes(5)).as_deref(), Some("5m ago"));
    assert_eq!(fmt_since(ts, base + TimeDuration::hours(3)).as_deref(), Some("3h ago"));
    assert_eq!(fmt_since(ts, base + TimeDuration::days(3)), None);
    assert_eq!(fmt_since(ts, base - TimeDuration::minutes(1)), None);
    assert_eq!(fmt_since("garbage", base), None);
}

#[test]
fn now_ts_round_trips_through_rfc3339() {
    assert!(OffsetDateTime::parse(&now_ts(), &Rfc3339).is_ok());
}
