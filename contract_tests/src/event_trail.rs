//! Coordinator event-trail contracts
//!
//! Hosts persist or display the structured trail; variant names and
//! payload fields must stay stable.

#[cfg(test)]
mod tests {
    use crate::test_helpers::*;
    use field_session::DeactivationReason;
    use page_coordinator::SyncEvent;
    use sync_types::{Severity, SurfaceId};

    #[test]
    fn test_discovery_event_shape() {
        let wire = to_wire(&SyncEvent::ElementsDiscovered { known: 3 });
        assert_eq!(wire["ElementsDiscovered"]["known"], 3);
    }

    #[test]
    fn test_session_events_carry_surface_identity() {
        let surface = SurfaceId::new();
        let wire = to_wire(&SyncEvent::SessionConnected { surface });
        verify_fields(&wire["SessionConnected"], &["surface"]);

        let wire = to_wire(&SyncEvent::SessionDisconnected {
            surface,
            reason: DeactivationReason::RemoteClose,
        });
        verify_fields(&wire["SessionDisconnected"], &["surface", "reason"]);
        assert_eq!(wire["SessionDisconnected"]["reason"], "RemoteClose");
    }

    #[test]
    fn test_count_event_shape() {
        let wire = to_wire(&SyncEvent::CountReported { count: 0 });
        assert_eq!(wire["CountReported"]["count"], 0);
    }

    #[test]
    fn test_deactivation_reason_names_stable() {
        for (reason, name) in [
            (DeactivationReason::LocalRequest, "LocalRequest"),
            (DeactivationReason::RemoteClose, "RemoteClose"),
            (DeactivationReason::ChannelError, "ChannelError"),
            (DeactivationReason::GlobalStop, "GlobalStop"),
        ] {
            assert_eq!(to_wire(&reason), name);
        }
    }

    #[test]
    fn test_severity_names_stable() {
        for (severity, name) in [
            (Severity::Info, "Info"),
            (Severity::Warning, "Warning"),
            (Severity::Error, "Error"),
        ] {
            assert_eq!(to_wire(&severity), name);
        }
    }

    #[test]
    fn test_event_roundtrip() {
        let event = SyncEvent::WaitingEntered;
        let wire = to_wire(&event);
        let back: SyncEvent = serde_json::from_value(wire).unwrap();
        assert_eq!(back, event);
    }
}
