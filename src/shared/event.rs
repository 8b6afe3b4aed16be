use chrono::{DateTime, Utc};

// ============================================================================
// Domain Event Abstractions
// ============================================================================
//
// Events represent facts that already happened to an aggregate. Handlers
// react to them synchronously; there is no bus, callers hand the event to
// the handler directly.
//
// ============================================================================

/// Generic Domain Event trait
pub trait DomainEvent: Send + Sync {
    fn event_type(&self) -> &'static str;
    fn occurred_at(&self) -> DateTime<Utc>;
}

/// Reacts to one kind of domain event
pub trait EventHandler<E: DomainEvent>: Send + Sync {
    fn handle(&self, event: &E);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct TestEvent {
        data: String,
        occurred_at: DateTime<Utc>,
    }

    impl DomainEvent for TestEvent {
        fn event_type(&self) -> &'static str {
            "TestEvent"
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            self.occurred_at
        }
    }

    #[derive(Default)]
    struct RecordingHandler {
        seen: Mutex<Vec<String>>,
    }

    impl EventHandler<TestEvent> for RecordingHandler {
        fn handle(&self, event: &TestEvent) {
            self.seen.lock().unwrap().push(event.data.clone());
        }
    }

    #[test]
    fn test_handler_receives_event() {
        let handler = RecordingHandler::default();
        let event = TestEvent {
            data: "payload".to_string(),
            occurred_at: Utc::now(),
        };

        handler.handle(&event);
        handler.handle(&event);

        assert_eq!(event.event_type(), "TestEvent");
        assert_eq!(*handler.seen.lock().unwrap(), vec!["payload", "payload"]);
    }

    #[test]
    fn test_handlers_as_trait_objects() {
        let handlers: Vec<Box<dyn EventHandler<TestEvent>>> = vec![
            Box::new(RecordingHandler::default()),
            Box::new(RecordingHandler::default()),
        ];
        let event = TestEvent {
            data: "fan-out".to_string(),
            occurred_at: Utc::now(),
        };

        for handler in &handlers {
            handler.handle(&event);
        }

        assert!(event.occurred_at() <= Utc::now());
    }
}
