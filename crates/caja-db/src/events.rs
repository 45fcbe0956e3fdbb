//! # Post-Commit Event Bus
//!
//! Fire-and-forget notifications emitted AFTER a service transaction
//! commits. The engine itself never reacts to them; they exist so the
//! surrounding system (label printers, barcode generators) can, without
//! being inside the transaction.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductService::create_product                                         │
//! │       │                                                                 │
//! │       ├── tx: insert product + activity row                             │
//! │       ├── tx.commit()  ← durable from here                              │
//! │       └── bus.emit(ProductCodeAssigned { .. })  ← then, and only then   │
//! │                                                                         │
//! │  A subscriber that reacts to an event can therefore always read the     │
//! │  committed row. A crash between commit and emit loses the event, not    │
//! │  the data; consumers treat events as hints, not as the record.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tokio::sync::broadcast;

/// Events the engine announces after commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A product was created and its business code is final. Consumed by
    /// the (external) QR/barcode generator.
    ProductCodeAssigned { product_id: String, code: String },
}

/// Broadcast bus for [`EngineEvent`]s.
///
/// Cloning the bus clones the sender; every clone reaches the same
/// subscribers. Lagging subscribers lose old events (broadcast semantics);
/// sends with no subscribers are fine and ignored.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<EngineEvent>,
}

impl EventBus {
    /// Creates a new bus. 256 buffered events per subscriber before lag.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(256);
        EventBus { tx }
    }

    /// Subscribes to events emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.tx.subscribe()
    }

    /// Emits an event. Must only be called after the transaction that
    /// produced the event has committed.
    pub fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        EventBus::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_event() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.emit(EngineEvent::ProductCodeAssigned {
            product_id: "p1".to_string(),
            code: "GEN-PROD-001".to_string(),
        });

        let event = rx.recv().await.unwrap();
        assert_eq!(
            event,
            EngineEvent::ProductCodeAssigned {
                product_id: "p1".to_string(),
                code: "GEN-PROD-001".to_string(),
            }
        );
    }

    #[test]
    fn test_emit_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.emit(EngineEvent::ProductCodeAssigned {
            product_id: "p1".to_string(),
            code: "GEN-PROD-001".to_string(),
        });
    }
}
