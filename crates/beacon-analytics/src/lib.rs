// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Beacon analytics facade.
//!
//! Applications build one [`Analytics`] context, hand it a [`Sink`] once via
//! [`Analytics::initialize`], and then track events by name or through the
//! typed convenience calls in [`events`]. Every event is enriched with the
//! context's default parameters (`timezone`, `time`, `medium` and anything
//! configured) before it reaches the sink.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use beacon_analytics::events::{app, view};
//! use beacon_analytics::{Analytics, AnalyticsConfig, RecordingSink, SharedSink};
//!
//! let analytics = Analytics::new(AnalyticsConfig::default());
//! let sink = Arc::new(RecordingSink::new());
//! let shared: SharedSink = sink.clone();
//! analytics.initialize(|| shared);
//!
//! app::opened(&analytics, None);
//! view::item(&analytics, view::ViewItem::new("Shoe").category("Footwear"));
//!
//! let events = sink.events();
//! assert_eq!(events[1].0, "view_item");
//! assert_eq!(events[1].1.get_str("item_id"), Some("Shoe"));
//! ```

pub mod config;
pub mod dispatcher;
pub mod environment;
pub mod error;
pub mod events;
pub mod sink;

pub use config::{default_config_path, load_config, AnalyticsConfig};
pub use dispatcher::{Analytics, DispatcherState};
pub use environment::{Environment, FixedEnvironment, SystemEnvironment};
pub use error::{ConfigError, Result};
pub use sink::{JsonLinesSink, NoOpSink, RecordingSink, SharedSink, Sink, SinkCall};

pub use beacon_analytics_core::{
	catalog, keys, merge, CatalogError, EventDescriptor, EventKind, ParamValue, ParameterSet,
	SimpleEvent, TrackError, TrackableEvent,
};
