// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use beacon_analytics::events::{app, ecommerce, view};
use beacon_analytics::{
	keys, Analytics, AnalyticsConfig, FixedEnvironment, JsonLinesSink, ParameterSet,
	RecordingSink, SharedSink, SimpleEvent, SinkCall,
};
use chrono::{TimeZone, Utc};

fn analytics() -> Analytics {
	let now = Utc.with_ymd_and_hms(2024, 5, 17, 9, 0, 0).unwrap();
	Analytics::with_environment(
		AnalyticsConfig {
			medium: "android".to_string(),
			..Default::default()
		},
		Arc::new(FixedEnvironment::new("Africa/Dar_es_Salaam", now)),
	)
}

fn ready() -> (Analytics, Arc<RecordingSink>) {
	let analytics = analytics();
	let sink = Arc::new(RecordingSink::new());
	let shared: SharedSink = sink.clone();
	analytics.initialize(|| shared);
	(analytics, sink)
}

#[test]
fn purchase_uses_default_currency_and_defaults() {
	let (analytics, sink) = ready();
	ecommerce::purchase(&analytics, ecommerce::Purchase::new(20.20));

	let events = sink.events();
	assert_eq!(events.len(), 1);
	let (name, params) = &events[0];
	assert_eq!(name, "ecommerce_purchase");
	assert_eq!(params.get_f64(keys::VALUE), Some(20.20));
	assert_eq!(params.get_str(keys::CURRENCY), Some("USD"));
	assert_eq!(params.get_str(keys::MEDIUM), Some("android"));
	assert_eq!(params.get_str(keys::TIMEZONE), Some("Africa/Dar_es_Salaam"));
	assert_eq!(params.get_i64(keys::TIME), Some(1_715_936_400_000));
}

#[test]
fn view_item_defaults_id_to_name() {
	let (analytics, sink) = ready();
	view::item(&analytics, view::ViewItem::new("Shoe").category("Footwear"));

	let (name, params) = &sink.events()[0];
	assert_eq!(name, "view_item");
	assert_eq!(params.get_str(keys::ITEM_NAME), Some("Shoe"));
	assert_eq!(params.get_str(keys::ITEM_ID), Some("Shoe"));
	assert_eq!(params.get_str(keys::ITEM_CATEGORY), Some("Footwear"));
}

#[test]
fn empty_login_method_reaches_no_sink() {
	let (analytics, sink) = ready();
	app::logged_in(&analytics, "", None);
	assert!(sink.is_empty());
}

#[test]
fn calls_before_initialize_are_dropped() {
	let analytics = analytics();
	analytics.track("app_open", None);
	analytics.set_user_identifier("u-1");
	analytics.set_default_param("plan", "pro");

	let sink = Arc::new(RecordingSink::new());
	let shared: SharedSink = sink.clone();
	analytics.initialize(|| shared);
	assert!(sink.is_empty());

	analytics.track("app_open", None);
	assert!(!sink.events()[0].1.contains_key("plan"));
}

#[test]
fn dispose_stops_forwarding() {
	let (analytics, sink) = ready();
	analytics.dispose();

	app::opened(&analytics, None);
	analytics.track("custom", Some(&ParameterSet::new().insert("k", "v")));
	analytics.set_user_property("tier", "gold");
	assert!(sink.is_empty());
	assert!(!analytics.is_ready());
}

#[test]
fn initialize_twice_keeps_first_sink() {
	let analytics = analytics();
	let first: SharedSink = Arc::new(RecordingSink::new());
	let installed = analytics.initialize(|| Arc::clone(&first));

	let mut second_built = false;
	let again = analytics.initialize(|| {
		second_built = true;
		Arc::new(RecordingSink::new())
	});

	assert!(!second_built);
	assert!(Arc::ptr_eq(&installed, &first));
	assert!(Arc::ptr_eq(&again, &first));
}

#[test]
fn empty_event_name_is_a_no_op() {
	let (analytics, sink) = ready();
	analytics.track("", None);
	assert!(analytics.try_track("", None).is_err());
	assert!(sink.is_empty());
}

#[test]
fn default_params_and_caller_override() {
	let (analytics, sink) = ready();
	analytics.set_default_param("app_version", "4.2.0");
	analytics.track(
		"custom",
		Some(&ParameterSet::new().insert(keys::MEDIUM, "web")),
	);

	let (_, params) = &sink.events()[0];
	assert_eq!(params.get_str("app_version"), Some("4.2.0"));
	assert_eq!(params.get_str(keys::MEDIUM), Some("web"));
}

#[test]
fn simple_event_time_becomes_time_param() {
	let (analytics, sink) = ready();
	let at = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
	let event = SimpleEvent::at("level_up", at).with_param("level", 3);
	analytics.track_event(&event);

	let (name, params) = &sink.events()[0];
	assert_eq!(name, "level_up");
	assert_eq!(params.get_i64(keys::TIME), Some(at.timestamp_millis()));
	assert_eq!(params.get_i64("level"), Some(3));
}

#[test]
fn json_lines_sink_writes_one_record_per_call() {
	let analytics = analytics();
	let sink = Arc::new(JsonLinesSink::new(Vec::new()));
	let shared: SharedSink = sink.clone();
	analytics.initialize(|| shared);

	app::logged_in(&analytics, "email", None);
	analytics.set_user_identifier("u-7");
	analytics.dispose();

	let sink = Arc::try_unwrap(sink).ok().expect("sink still shared");
	let output = String::from_utf8(sink.into_inner()).unwrap();
	let lines: Vec<&str> = output.lines().collect();
	assert_eq!(lines.len(), 2);

	let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
	assert_eq!(first["type"], "log_event");
	assert_eq!(first["name"], "login");
	assert_eq!(first["params"]["method"], "email");

	let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
	assert_eq!(second["type"], "set_user_id");
	assert_eq!(second["id"], "u-7");
}

#[test]
fn user_calls_reach_the_sink() {
	let (analytics, sink) = ready();
	analytics.set_user_identifier("u-1");
	analytics.set_user_property("tier", "");
	analytics.set_current_screen("Home", None);

	assert_eq!(
		sink.calls(),
		vec![
			SinkCall::SetUserId {
				id: "u-1".to_string()
			},
			SinkCall::SetUserProperty {
				key: "tier".to_string(),
				value: String::new()
			},
			SinkCall::SetCurrentScreen {
				screen_name: "Home".to_string(),
				screen_class: None
			},
		]
	);
}
