#![forbid(unsafe_code)]

//! Tracing integration tests.
//!
//! Layout spans and events enabled:
//!   cargo test -p gridpack-layout --features tracing --test tracing_tests
//!
//! Without the feature the facade compiles to no-ops:
//!   cargo test -p gridpack-layout --test tracing_tests -- zero_overhead

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use gridpack_layout::{GridPanel, Size, Tile};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured span or event with its fields.
#[derive(Debug, Clone)]
#[allow(dead_code)]
struct Captured {
    kind: &'static str,
    name: String,
    level: tracing::Level,
    fields: HashMap<String, String>,
}

/// A tracing Layer that records spans and events.
struct Capture {
    records: Arc<Mutex<Vec<Captured>>>,
}

/// Visitor that extracts fields.
struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0
            .push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        self.records.lock().unwrap().push(Captured {
            kind: "span",
            name: attrs.metadata().name().to_string(),
            level: *attrs.metadata().level(),
            fields: visitor.0.into_iter().collect(),
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let fields: HashMap<String, String> = visitor.0.into_iter().collect();
        self.records.lock().unwrap().push(Captured {
            kind: "event",
            name: fields.get("message").cloned().unwrap_or_default(),
            level: *event.metadata().level(),
            fields,
        });
    }
}

/// Run a closure under a capturing subscriber.
fn with_capture<F>(f: F) -> Vec<Captured>
where
    F: FnOnce(),
{
    let records = Arc::new(Mutex::new(Vec::new()));
    let layer = Capture {
        records: records.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let out = records.lock().unwrap().clone();
    out
}

fn run_passes() {
    let mut panel = GridPanel::default();
    let mut items: Vec<Tile> = (0..7).map(|_| Tile::new(200.0, 300.0)).collect();
    panel.layout(&mut items, Size::new(690.0, 0.0));
    panel.layout(&mut items, Size::new(690.0, 0.0));
    let _ = panel.set_desired_column_width(-1.0);
}

// ============================================================================
// Tests
// ============================================================================

#[test]
#[cfg(feature = "tracing")]
fn layout_span_per_pass() {
    let records = with_capture(run_passes);
    let spans: Vec<_> = records
        .iter()
        .filter(|r| r.kind == "span" && r.name == "grid_layout")
        .collect();
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].level, tracing::Level::DEBUG);
    assert_eq!(spans[0].fields.get("items").map(String::as_str), Some("7"));
}

#[test]
#[cfg(feature = "tracing")]
fn column_change_logged_once() {
    let records = with_capture(run_passes);
    let changes: Vec<_> = records
        .iter()
        .filter(|r| r.kind == "event" && r.name.contains("column count changed"))
        .collect();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].fields.get("previous").map(String::as_str), Some("0"));
    assert_eq!(changes[0].fields.get("columns").map(String::as_str), Some("3"));
}

#[test]
#[cfg(feature = "tracing")]
fn placement_result_traced() {
    let records = with_capture(run_passes);
    let placements: Vec<_> = records
        .iter()
        .filter(|r| r.kind == "event" && r.name.contains("grid placement complete"))
        .collect();
    assert_eq!(placements.len(), 2);
    assert_eq!(placements[0].level, tracing::Level::TRACE);
    assert_eq!(placements[0].fields.get("height").map(String::as_str), Some("900"));
    assert_eq!(placements[0].fields.get("overflow").map(String::as_str), Some("300"));
}

#[test]
#[cfg(feature = "tracing")]
fn rejected_configuration_warns() {
    let records = with_capture(run_passes);
    let warnings: Vec<_> = records
        .iter()
        .filter(|r| r.kind == "event" && r.level == tracing::Level::WARN)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].fields.get("field").map(String::as_str),
        Some("desired_column_width")
    );
}

#[test]
#[cfg(not(feature = "tracing"))]
fn zero_overhead_without_feature() {
    let records = with_capture(run_passes);
    assert!(records.is_empty(), "facade must not emit: {records:?}");
}
