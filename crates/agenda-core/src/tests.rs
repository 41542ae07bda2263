use crate::*;
use chrono::{NaiveDate, TimeZone, Utc};

fn t(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

fn session(code: &str, day: &str, room: &str, start: &str, end: &str) -> Session {
    Session {
        code: code.into(),
        title: format!("Talk {}", code),
        speakers: vec!["Speaker".into()],
        start: t(start),
        end: t(end),
        room: room.into(),
        track: "Track".into(),
        language: "English".into(),
        difficulty: "Beginner".into(),
        tags: vec!["AI".into()],
        abstract_text: "abstract".into(),
        day: day.into(),
        url: None,
    }
}

// ========== TimeOfDay ==========

#[test]
fn test_time_parse_and_display() {
    let v = t("09:05");
    assert_eq!(v.minutes(), 9 * 60 + 5);
    assert_eq!(v.to_string(), "09:05");
    assert_eq!(t("9:30").to_string(), "09:30");
}

#[test]
fn test_time_rejects_garbage() {
    for bad in ["", "24:00", "12:60", "noon", "12:5", "12-30"] {
        assert!(bad.parse::<TimeOfDay>().is_err(), "{bad} should be rejected");
    }
}

#[test]
fn test_time_serde_as_string() {
    let json = serde_json::to_string(&t("17:00")).unwrap();
    assert_eq!(json, "\"17:00\"");
    let back: TimeOfDay = serde_json::from_str("\"08:15\"").unwrap();
    assert_eq!(back, t("08:15"));
    assert!(serde_json::from_str::<TimeOfDay>("\"8h15\"").is_err());
}

#[test]
fn test_minutes_until_and_saturating_add() {
    assert_eq!(t("09:00").minutes_until(t("09:45")), 45);
    assert_eq!(t("09:45").minutes_until(t("09:00")), -45);
    assert_eq!(t("23:50").saturating_add(30), t("23:59"));
}

// ========== Overlap ==========

#[test]
fn test_back_to_back_does_not_overlap() {
    let a = TimeSpan::new(t("09:00"), t("10:00"));
    let b = TimeSpan::new(t("10:00"), t("11:00"));
    assert!(!a.overlaps(&b));
    assert!(!b.overlaps(&a));
}

#[test]
fn test_partial_overlap_is_symmetric() {
    let a = TimeSpan::new(t("09:00"), t("10:30"));
    let b = TimeSpan::new(t("10:00"), t("11:00"));
    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
}

#[test]
fn test_containment_overlaps() {
    let outer = TimeSpan::new(t("09:00"), t("12:00"));
    let inner = TimeSpan::new(t("10:00"), t("10:30"));
    assert!(outer.overlaps(&inner));
    assert!(inner.overlaps(&outer));
    assert!(outer.contains(t("09:00")));
    assert!(!outer.contains(t("12:00")));
}

// ========== Event calendar ==========

#[test]
fn test_resolve_day_key_and_label() {
    let event = EventConfig::default();
    assert_eq!(event.resolve_day("Aug9").unwrap().key, "Aug9");
    assert_eq!(event.resolve_day("Aug.10").unwrap().key, "Aug10");
    let err = event.resolve_day("Aug11").unwrap_err();
    assert!(matches!(err, AgendaError::InvalidDay { .. }));
    assert!(err.to_string().contains("Aug9, Aug10"));
}

#[test]
fn test_local_time_uses_event_offset() {
    let event = EventConfig::default();
    // 01:15 UTC is 09:15 in UTC+8.
    let now = Utc.with_ymd_and_hms(2025, 8, 9, 1, 15, 0).unwrap();
    assert_eq!(event.local_time(now), t("09:15"));
    assert_eq!(event.day_at(now).unwrap().key, "Aug9");
}

#[test]
fn test_outside_event_period() {
    let event = EventConfig::default();
    let before = Utc.with_ymd_and_hms(2025, 8, 8, 10, 0, 0).unwrap();
    assert!(!event.is_active(before));
    // 16:30 UTC on Aug 8 is already Aug 9 locally.
    let late = Utc.with_ymd_and_hms(2025, 8, 8, 16, 30, 0).unwrap();
    assert_eq!(event.day_at(late).unwrap().date, NaiveDate::from_ymd_opt(2025, 8, 9).unwrap());
}

// ========== Config ==========

#[test]
fn test_config_defaults() {
    let c = AgendaConfig::default();
    assert_eq!(c.store.num_shards, 16);
    assert_eq!(c.store.ttl_hours, 24);
    assert_eq!(c.planning.long_session_minutes, 240);
    assert_eq!(c.planning.completion_cutoff, t("17:00"));
    assert_eq!(c.status.just_ended_grace_minutes, 10);
    assert!(c.validate().is_ok());
}

#[test]
fn test_config_partial_json() {
    let c = AgendaConfig::from_json(r#"{ "store": { "num_shards": 4 }, "status": { "just_ended_grace_minutes": 5 } }"#).unwrap();
    assert_eq!(c.store.num_shards, 4);
    assert_eq!(c.store.ttl_hours, 24);
    assert_eq!(c.status.just_ended_grace_minutes, 5);
    assert_eq!(c.event.days.len(), 2);
}

#[test]
fn test_config_bounds_store_durations() {
    let mut c = AgendaConfig::default();
    c.store.ttl_hours = i64::MAX / 2;
    assert!(matches!(c.validate(), Err(AgendaError::Config(_))));
    c.store.ttl_hours = MAX_TTL_HOURS;
    assert!(c.validate().is_ok());

    c.store.sweep_interval_minutes = u64::MAX;
    assert!(matches!(c.validate(), Err(AgendaError::Config(_))));
    c.store.sweep_interval_minutes = MAX_SWEEP_INTERVAL_MINUTES;
    assert!(c.validate().is_ok());

    let err = AgendaConfig::from_json(r#"{ "store": { "ttl_hours": 9000000000000000000 } }"#).unwrap_err();
    assert!(matches!(err, AgendaError::Config(_)));
}

#[test]
fn test_store_durations_are_clamped() {
    let s = StoreConfig { ttl_hours: i64::MAX, sweep_interval_minutes: u64::MAX, ..StoreConfig::default() };
    assert_eq!(s.ttl(), chrono::Duration::hours(MAX_TTL_HOURS));
    assert_eq!(s.sweep_interval(), std::time::Duration::from_secs(MAX_SWEEP_INTERVAL_MINUTES * 60));
    let s = StoreConfig { ttl_hours: -5, sweep_interval_minutes: 0, ..StoreConfig::default() };
    assert_eq!(s.ttl(), chrono::Duration::hours(1));
    assert_eq!(s.sweep_interval(), std::time::Duration::from_secs(60));
}

#[test]
fn test_config_rejects_zero_shards() {
    let err = AgendaConfig::from_json(r#"{ "store": { "num_shards": 0 } }"#).unwrap_err();
    assert!(matches!(err, AgendaError::Config(_)));
}

// ========== Catalog ==========

#[test]
fn test_catalog_lookup_and_first_sessions() {
    let cat = StaticCatalog::new(vec![
        session("B", "Aug9", "RB-105", "09:00", "09:30"),
        session("A", "Aug9", "AU", "09:00", "09:40"),
        session("C", "Aug9", "AU", "10:00", "10:30"),
        session("D", "Aug10", "TR211", "09:30", "10:00"),
    ])
    .unwrap();
    assert_eq!(cat.len(), 4);
    assert_eq!(cat.session_by_code("C").unwrap().room, "AU");
    assert!(cat.session_by_code("Z").is_none());

    let first: Vec<_> = cat.first_sessions_of_day("Aug9").iter().map(|s| s.code.as_str()).collect();
    assert_eq!(first, vec!["A", "B"]);
    assert!(cat.first_sessions_of_day("Aug11").is_empty());

    let au: Vec<_> = cat.sessions_in_room("Aug9", "AU").iter().map(|s| s.code.as_str()).collect();
    assert_eq!(au, vec!["A", "C"]);
    assert_eq!(cat.rooms("Aug9").into_iter().collect::<Vec<_>>(), vec!["AU", "RB-105"]);
}

#[test]
fn test_catalog_rejects_inverted_session() {
    let err = StaticCatalog::new(vec![session("X", "Aug9", "AU", "10:00", "09:00")]).unwrap_err();
    assert!(matches!(err, AgendaError::InvalidCatalog(_)));
}

#[test]
fn test_catalog_rejects_duplicate_code() {
    let err = StaticCatalog::new(vec![
        session("X", "Aug9", "AU", "09:00", "09:30"),
        session("X", "Aug10", "AU", "09:00", "09:30"),
    ])
    .unwrap_err();
    assert!(err.to_string().contains("duplicate"));
}

#[test]
fn test_catalog_from_nested_json() {
    let json = r#"{
        "Aug.9": {
            "AU": [ { "code": "K1", "title": "Keynote", "start": "09:10", "end": "10:00", "speakers": ["A"] } ],
            "TR211": [ { "code": "T1", "title": "Rust", "start": "10:10", "end": "10:40", "abstract": "ownership" } ]
        }
    }"#;
    let cat = StaticCatalog::from_json(json, &EventConfig::default()).unwrap();
    let k1 = cat.session_by_code("K1").unwrap();
    assert_eq!(k1.day, "Aug9");
    assert_eq!(k1.room, "AU");
    assert_eq!(k1.url.as_deref(), Some("https://coscup.org/2025/sessions/K1"));
    assert_eq!(cat.session_by_code("T1").unwrap().abstract_text, "ownership");
}

#[test]
fn test_catalog_json_unknown_day() {
    let json = r#"{ "Sep.1": { "AU": [ { "code": "K1", "title": "K", "start": "09:00", "end": "10:00" } ] } }"#;
    assert!(StaticCatalog::from_json(json, &EventConfig::default()).is_err());
}

// ========== Errors ==========

#[test]
fn test_time_conflict_message_names_sessions() {
    let a = session("A", "Aug9", "AU", "09:00", "09:30");
    let b = session("B", "Aug9", "RB-105", "09:15", "09:45");
    let err = AgendaError::TimeConflict(TimeConflict {
        requested: ConflictEntry::from(&b),
        conflicts: vec![ConflictEntry::from(&a)],
    });
    let msg = err.to_string();
    assert!(msg.contains("09:00-09:30 \"Talk A\""));
    assert!(msg.contains("09:15-09:45 \"Talk B\""));
    assert!(!err.is_not_found());
}

#[test]
fn test_not_found_family() {
    assert!(AgendaError::ItineraryNotFound { id: "x".into() }.is_not_found());
    assert!(AgendaError::SessionNotFound { code: "x".into() }.is_not_found());
    assert!(!AgendaError::MissingArgument("sessionId").is_not_found());
}

#[test]
fn test_session_summary_drops_details() {
    let s = session("A", "Aug9", "AU", "09:00", "09:30");
    let json = serde_json::to_value(s.summary()).unwrap();
    assert!(json.get("abstract").is_none());
    assert!(json.get("difficulty").is_none());
    assert_eq!(json["start"], "09:00");
}
