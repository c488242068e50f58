#![cfg(feature = "cursor")]
//! Integration tests for the events cursors emit on rejected operations.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use actkit::cursor::{CursorError, a, act, b, priority_of};
use rstest::rstest;
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Level, Metadata, Subscriber};

struct DebugCounter {
    events: Arc<AtomicUsize>,
}

impl Subscriber for DebugCounter {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn new_span(&self, _attributes: &Attributes<'_>) -> Id {
        Id::from_u64(1)
    }

    fn record(&self, _span: &Id, _values: &Record<'_>) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event<'_>) {
        if *event.metadata().level() == Level::DEBUG {
            self.events.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn enter(&self, _span: &Id) {}

    fn exit(&self, _span: &Id) {}
}

fn debug_events_of(action: impl FnOnce()) -> usize {
    let events = Arc::new(AtomicUsize::new(0));
    let counter = DebugCounter {
        events: Arc::clone(&events),
    };

    tracing::subscriber::with_default(counter, action);
    events.load(Ordering::SeqCst)
}

// =============================================================================
// Rejections
// =============================================================================

#[rstest]
fn test_priority_queries_log_rejections() {
    let events = debug_events_of(|| {
        assert_eq!(priority_of(&act()), Err(CursorError::ConstantCursorPriority));
        assert_eq!(priority_of(&(a() + b())), Err(CursorError::MulticursorPriority));
    });

    assert_eq!(events, 2);
}

#[rstest]
fn test_exhausted_unpacking_logs_rejection() {
    let events = debug_events_of(|| {
        let mut unpacking = a().unpack();

        assert!(unpacking.try_next().is_ok());
        assert_eq!(unpacking.try_next().unwrap_err(), CursorError::UnpackingExhausted);
    });

    assert_eq!(events, 1);
}

#[rstest]
fn test_accepted_operations_log_nothing_at_debug() {
    let events = debug_events_of(|| {
        assert_eq!(priority_of(&(a() + 1)), Ok(0));
    });

    assert_eq!(events, 0);
}
