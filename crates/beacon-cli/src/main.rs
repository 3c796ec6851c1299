// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `beacon`: emit analytics events from the command line.
//!
//! Every call the sink receives is printed to stdout as one JSON object per
//! line. Diagnostics go to stderr and follow `RUST_LOG`. An event that cannot
//! be tracked (missing or empty arguments) is an error and exits non-zero.

mod param_args;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use beacon_analytics::events::{app, ecommerce, view};
use beacon_analytics::{
	catalog, load_config, Analytics, EventKind, JsonLinesSink, ParamValue, SharedSink,
};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "beacon", version, about = "Emit analytics events as JSON lines")]
struct Cli {
	/// Config file (default: $XDG_CONFIG_HOME/beacon/analytics.toml)
	#[arg(long, global = true, env = "BEACON_ANALYTICS_CONFIG")]
	config: Option<PathBuf>,

	/// Override the `medium` parameter
	#[arg(long, global = true)]
	medium: Option<String>,

	/// Log every tracked event with its parameters
	#[arg(long, global = true)]
	debug: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Track an event by name
	Track {
		name: String,

		/// Event parameter as key=value (repeatable)
		#[arg(short = 'p', long = "param", value_parser = param_args::parse_param)]
		params: Vec<(String, ParamValue)>,
	},

	/// Track a purchase
	Purchase {
		#[arg(long)]
		value: f64,

		/// Defaults to the configured currency
		#[arg(long)]
		currency: Option<String>,

		#[arg(long)]
		transaction_id: Option<String>,

		#[arg(long)]
		coupon: Option<String>,

		#[arg(short = 'p', long = "param", value_parser = param_args::parse_param)]
		params: Vec<(String, ParamValue)>,
	},

	/// Track an item view
	ViewItem {
		#[arg(long)]
		name: String,

		#[arg(long)]
		category: Option<String>,

		/// Defaults to the item name
		#[arg(long)]
		id: Option<String>,

		#[arg(short = 'p', long = "param", value_parser = param_args::parse_param)]
		params: Vec<(String, ParamValue)>,
	},

	/// Track a login
	Login {
		#[arg(long)]
		method: String,

		#[arg(short = 'p', long = "param", value_parser = param_args::parse_param)]
		params: Vec<(String, ParamValue)>,
	},

	/// Print the canonical event table
	Catalog,
}

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	init_tracing(cli.debug);

	let mut config = load_config(cli.config.as_deref()).context("failed to load analytics config")?;
	if let Some(medium) = cli.medium {
		config.medium = medium;
	}
	if cli.debug {
		config.debug = Some(true);
	}
	config.validate()?;

	let analytics = Analytics::new(config);
	analytics.initialize(|| -> SharedSink { Arc::new(JsonLinesSink::new(std::io::stdout())) });

	let result = run(&analytics, cli.command);
	analytics.dispose();
	debug!("beacon finished");
	result
}

fn run(analytics: &Analytics, command: Command) -> anyhow::Result<()> {
	match command {
		Command::Track { name, params } => {
			let params = param_args::collect(params);
			if let Ok(kind) = name.parse::<EventKind>() {
				kind.descriptor().validate(&params)?;
			}
			analytics.try_track(&name, Some(&params))?;
		}
		Command::Purchase {
			value,
			currency,
			transaction_id,
			coupon,
			params,
		} => {
			let mut purchase = ecommerce::Purchase::new(value).extra(param_args::collect(params));
			purchase.currency = currency;
			purchase.transaction_id = transaction_id;
			purchase.coupon = coupon;
			ecommerce::try_purchase(analytics, purchase)?;
		}
		Command::ViewItem {
			name,
			category,
			id,
			params,
		} => {
			let mut item = view::ViewItem::new(name).extra(param_args::collect(params));
			item.category = category;
			item.id = id;
			view::try_item(analytics, item)?;
		}
		Command::Login { method, params } => {
			app::try_logged_in(analytics, &method, Some(&param_args::collect(params)))?;
		}
		Command::Catalog => print_catalog(),
	}
	Ok(())
}

fn init_tracing(debug: bool) {
	let default_level = if debug { "debug" } else { "info" };
	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();
}

fn print_catalog() {
	for descriptor in catalog() {
		let line = serde_json::json!({
			"name": descriptor.name,
			"required": descriptor.required,
		});
		println!("{line}");
	}
}
