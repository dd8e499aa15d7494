use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::json;
use waypost::analytics::{
    AnalyticsContext, AnalyticsEvent, CaptureOptions, EventCoalescer, FnSink, MemorySink,
    GATHERED_MARKER, ROOT_EXTENSION, ROUTABLE_EXTENSION_RENDERED_ACTION,
};
use waypost::error::SinkError;

fn gathered_root(route_ref: &str) -> AnalyticsContext {
    AnalyticsContext::new(route_ref, "root", "App").with_element(GATHERED_MARKER)
}

#[test]
fn gathered_navigation_then_click_emits_merged_navigation_first() {
    let sink = MemorySink::new();
    let mut tracker = EventCoalescer::new(Arc::new(sink.clone()));

    tracker.set_context(gathered_root("r1"));
    tracker.record("navigate", "/home", CaptureOptions::default());
    assert!(sink.is_empty());
    assert_eq!(tracker.pending_navigations(), 1);

    tracker.record("click", "button-1", CaptureOptions::default());

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].action, "navigate");
    assert_eq!(events[0].context.plugin_id, "root");
    assert_eq!(events[0].context.route_ref, "r1");
    assert_eq!(events[1].action, "click");
    assert_eq!(events[1].context.route_ref, "r1");
    assert!(events.iter().all(|e| e.context.element.is_none()));
}

#[test]
fn render_marker_only_buffers() {
    let sink = MemorySink::new();
    let mut tracker = EventCoalescer::new(Arc::new(sink.clone()));
    tracker.set_context(AnalyticsContext::new("entity", "catalog", "EntityPage"));

    tracker.record(ROUTABLE_EXTENSION_RENDERED_ACTION, "", CaptureOptions::default());
    tracker.set_context(gathered_root("r1"));
    tracker.record(ROUTABLE_EXTENSION_RENDERED_ACTION, "", CaptureOptions::default());

    assert!(sink.is_empty());
    assert_eq!(tracker.pending_renders(), 2);
}

#[test]
fn newest_render_enriches_flushed_navigation() {
    let sink = MemorySink::new();
    let mut tracker = EventCoalescer::new(Arc::new(sink.clone()));

    tracker.set_context(AnalyticsContext::new("stale", "docs", "TechDocsPage"));
    tracker.record(ROUTABLE_EXTENSION_RENDERED_ACTION, "", CaptureOptions::default());
    tracker.set_context(AnalyticsContext::new("entity", "catalog", "EntityPage"));
    tracker.record(ROUTABLE_EXTENSION_RENDERED_ACTION, "", CaptureOptions::default());

    tracker.set_context(gathered_root("r1").with_extra("source", "sidebar"));
    tracker.record(
        "navigate",
        "/catalog/default/component/api",
        CaptureOptions::default().with_attribute("to", "/catalog/default/component/api"),
    );
    tracker.set_context(AnalyticsContext::new("entity", "catalog", "EntityPage"));
    tracker.record("click", "overview-tab", CaptureOptions::default());

    let events = sink.events();
    assert_eq!(events.len(), 2);
    let nav = &events[0];
    assert_eq!(nav.subject, "/catalog/default/component/api");
    assert_eq!(
        nav.attributes.as_ref().unwrap().get("to"),
        Some(&json!("/catalog/default/component/api"))
    );
    assert_eq!(nav.context.route_ref, "entity");
    assert_eq!(nav.context.plugin_id, "catalog");
    assert_eq!(nav.context.extension, ROOT_EXTENSION);
    assert_eq!(nav.context.extra.get("source"), Some(&json!("sidebar")));
    assert_eq!(events[1].context.extension, "EntityPage");
    assert_eq!(tracker.pending_renders(), 0);
}

#[test]
fn navigate_render_click_emits_enriched_navigation_then_click() {
    let sink = MemorySink::new();
    let mut tracker = EventCoalescer::new(Arc::new(sink.clone()));

    tracker.set_context(gathered_root("r1").with_extra("source", "sidebar"));
    tracker.record("navigate", "/docs/default/component/api", CaptureOptions::default());

    tracker.set_context(AnalyticsContext::new("docs-entity", "techdocs", "TechDocsReaderPage"));
    tracker.record(ROUTABLE_EXTENSION_RENDERED_ACTION, "", CaptureOptions::default());
    assert!(sink.is_empty(), "render marker must neither flush nor emit");
    assert_eq!(tracker.pending_navigations(), 1);

    tracker.record("click", "search-bar", CaptureOptions::default());

    let events = sink.events();
    assert_eq!(events.len(), 2);
    let nav = &events[0];
    assert_eq!(nav.action, "navigate");
    assert_eq!(nav.context.route_ref, "docs-entity");
    assert_eq!(nav.context.plugin_id, "techdocs");
    assert_eq!(nav.context.extension, ROOT_EXTENSION);
    assert_eq!(nav.context.extra.get("source"), Some(&json!("sidebar")));
    assert_eq!(events[1].action, "click");
    assert_eq!(events[1].context.extension, "TechDocsReaderPage");
    assert_eq!((tracker.pending_navigations(), tracker.pending_renders()), (0, 0));
}

#[test]
fn flushed_navigation_without_render_keeps_its_context() {
    let sink = MemorySink::new();
    let mut tracker = EventCoalescer::new(Arc::new(sink.clone()));
    tracker.set_context(gathered_root("r1"));
    tracker.record("navigate", "/home", CaptureOptions::default().with_value(7.0));
    tracker.set_context(AnalyticsContext::new("r2", "search", "SearchPage"));
    tracker.record("search", "query", CaptureOptions::default());

    let events = sink.events();
    assert_eq!(events[0].context, AnalyticsContext::new("r1", "root", "App"));
    assert_eq!(events[0].value, Some(7.0));
    assert_eq!(events[1].context.plugin_id, "search");
}

#[test]
fn sink_failure_is_swallowed_and_stale_navigation_not_reemitted() {
    let calls = Arc::new(AtomicUsize::new(0));
    let delivered: Arc<Mutex<Vec<AnalyticsEvent>>> = Arc::default();
    let sink = {
        let calls = calls.clone();
        let delivered = delivered.clone();
        FnSink::new(move |event: AnalyticsEvent| {
            // The first capture (the flush) fails.
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(SinkError::Rejected("network down".to_string()));
            }
            delivered.lock().push(event);
            Ok(())
        })
    };
    let mut tracker = EventCoalescer::new(Arc::new(sink));

    tracker.set_context(gathered_root("r1"));
    tracker.record("navigate", "/home", CaptureOptions::default());
    tracker.set_context(AnalyticsContext::default());
    tracker.record("click", "a", CaptureOptions::default());
    tracker.record("click", "b", CaptureOptions::default());

    let subjects: Vec<_> = delivered.lock().iter().map(|e| e.subject.clone()).collect();
    assert_eq!(subjects, vec!["a", "b"]);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(tracker.pending_navigations(), 0);
}

#[test]
fn coalescer_can_move_to_a_dedicated_thread() {
    let sink = MemorySink::new();
    let mut tracker = EventCoalescer::new(Arc::new(sink.clone()));
    let handle = std::thread::spawn(move || {
        tracker.set_context(gathered_root("r1"));
        tracker.record("navigate", "/home", CaptureOptions::default());
        tracker.record("click", "x", CaptureOptions::default());
        tracker
    });
    let tracker = handle.join().unwrap();
    assert_eq!(tracker.pending_navigations(), 0);
    assert_eq!(sink.len(), 2);
}
