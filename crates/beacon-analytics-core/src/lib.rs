// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for Beacon analytics.
//!
//! This crate holds the pieces of the analytics facade that carry no state and
//! perform no I/O:
//!
//! - [`ParameterSet`] and [`ParamValue`]: the key-value bundle attached to every event
//! - [`merge`]: last-writer-wins merging of parameter sets
//! - [`EventKind`] and [`EventDescriptor`]: the static catalog of canonical events
//! - [`TrackableEvent`] and [`SimpleEvent`]: events that carry their own time and params
//! - [`TrackError`]: why a track call was dropped

pub mod catalog;
pub mod error;
pub mod event;
pub mod keys;
pub mod params;

pub use catalog::{catalog, EventDescriptor, EventKind};
pub use error::{CatalogError, TrackError};
pub use event::{SimpleEvent, TrackableEvent};
pub use params::{merge, ParamValue, ParameterSet};
