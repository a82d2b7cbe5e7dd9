//! Synchronization Invariants
//!
//! Properties that must hold across every lifecycle path: channel-handle
//! discipline, suppression-flag hygiene, selection delivery, count
//! cardinality, transform resolution order and per-site round-trips.

use editor_channel::ChannelEvent;
use field_session::SessionState;
use site_transforms::{default_table, TransformError, TransformPair, TransformTable};
use sync_types::{PageLocation, Selection};
use tests_sync::{deliver_ready, deliver_wire_frame, page_bootstrap, text_candidate};

/// `Active ⇒ channel held` and `Inactive ⇒ no channel`, at every step
#[test]
fn test_channel_handle_matches_state_through_lifecycle() {
    let mut f = page_bootstrap("example.com");
    let (id, candidate) = text_candidate("x");

    f.coordinator.start(vec![candidate], None);
    let session = f.coordinator.session(id).unwrap();
    assert_eq!(session.state(), SessionState::Connecting);
    assert!(session.has_channel());

    deliver_ready(&mut f, id);
    let session = f.coordinator.session(id).unwrap();
    assert_eq!(session.state(), SessionState::Active);
    assert!(session.has_channel());

    deliver_wire_frame(&mut f, id, r#"{"close":true}"#);
    let session = f.coordinator.session(id).unwrap();
    assert_eq!(session.state(), SessionState::Inactive);
    assert!(!session.has_channel());
}

/// The suppression flag never outlives the turn that set it
///
/// Observable as: a remote apply never blocks the next genuine edit, on
/// both the immediate and the debounced write paths.
#[test]
fn test_suppression_never_sticks() {
    let mut f = page_bootstrap("example.com");
    let (id, candidate) = text_candidate("start");
    f.coordinator.start(vec![candidate], None);
    deliver_ready(&mut f, id);
    let probe = f.connector.last_probe().unwrap();

    for round in 0..3 {
        let remote = format!("remote {}", round);
        deliver_wire_frame(
            &mut f,
            id,
            &format!(
                r#"{{"message":{{"text":"{}","selections":[{{"start":0,"end":0}}]}}}}"#,
                remote
            ),
        );
        let sent = probe.sent_count();

        let local = format!("local {}", round);
        f.coordinator
            .apply_local_edit(id, &local, Selection::caret(local.len()));
        f.coordinator.on_local_change(id);
        assert_eq!(probe.sent_count(), sent + 1, "round {}", round);
        assert_eq!(probe.last_sent().unwrap().text, local);
    }
}

/// Selection is applied on every receive, even when the text is unchanged
#[test]
fn test_selection_applied_without_text_change() {
    let mut f = page_bootstrap("example.com");
    let (id, candidate) = text_candidate("stable");
    f.coordinator.start(vec![candidate], None);
    deliver_ready(&mut f, id);

    for (start, end) in [(0, 0), (2, 4), (6, 6)] {
        deliver_wire_frame(
            &mut f,
            id,
            &format!(
                r#"{{"message":{{"text":"stable","selections":[{{"start":{},"end":{}}}]}}}}"#,
                start, end
            ),
        );
        let session = f.coordinator.session(id).unwrap();
        assert_eq!(session.surface().value(), "stable");
        assert_eq!(session.surface().selection(), Selection::new(start, end));
    }
}

/// The reported count always equals the number of Active sessions
#[test]
fn test_active_count_equals_active_cardinality() {
    let mut f = page_bootstrap("example.com");
    let (id1, c1) = text_candidate("one");
    let (id2, c2) = text_candidate("two");
    let (id3, c3) = text_candidate("three");
    f.coordinator.start(vec![c1, c2, c3], None);

    let count_active = |f: &tests_sync::PageFixture| {
        [id1, id2, id3]
            .iter()
            .filter(|id| f.coordinator.session(**id).unwrap().state() == SessionState::Active)
            .count()
    };

    assert_eq!(f.coordinator.active_count(), count_active(&f));

    f.coordinator.on_focus(id2);
    deliver_ready(&mut f, id2);
    assert_eq!(f.coordinator.active_count(), 1);
    assert_eq!(f.coordinator.active_count(), count_active(&f));

    deliver_wire_frame(&mut f, id2, r#"{"close":true}"#);
    assert_eq!(f.coordinator.active_count(), 0);
    assert_eq!(f.coordinator.active_count(), count_active(&f));
}

/// Overlapping patterns resolve to the first listed entry
#[test]
fn test_overlapping_patterns_resolve_first_listed() {
    fn narrow(text: &str) -> Result<String, TransformError> {
        Ok(format!("narrow:{}", text))
    }
    fn broad(text: &str) -> Result<String, TransformError> {
        Ok(format!("broad:{}", text))
    }
    let identity = TransformPair::identity();
    let table = TransformTable::new()
        .with_rule(
            r"app\.example\.com",
            TransformPair {
                send: narrow,
                receive: identity.receive,
            },
        )
        .unwrap()
        .with_rule(
            r"example\.com",
            TransformPair {
                send: broad,
                receive: identity.receive,
            },
        )
        .unwrap();

    // Both patterns match this host; the first listed wins.
    let pair = table.resolve(&PageLocation::from_host("app.example.com"));
    assert_eq!((pair.send)("x").unwrap(), "narrow:x");
}

/// Per-site baseline regression: plain text round-trips
///
/// Round-trip is not lossless in general, but for text with no
/// site-specific markup `receive(send(x)) == x` must hold for every
/// registered site.
#[test]
fn test_plain_round_trip_per_registered_site() {
    let table = default_table();
    let plain_samples = [
        "",
        "single line",
        "two\nlines",
        "paragraph one\n\nparagraph two",
        "trailing newline\n",
    ];
    for host in ["mail.google.com", "app.slack.com", "docs.google.com"] {
        let pair = table.resolve(&PageLocation::from_host(host));
        for sample in plain_samples {
            let sent = (pair.send)(sample).unwrap();
            let back = (pair.receive)(&sent).unwrap();
            assert_eq!(back, sample, "round-trip broke on {} for {:?}", host, sample);
        }
    }
}

/// Repeated ready signals do not double-activate or double-send
#[test]
fn test_duplicate_ready_is_idempotent() {
    let mut f = page_bootstrap("example.com");
    let (id, candidate) = text_candidate("value");
    f.coordinator.start(vec![candidate], None);
    deliver_ready(&mut f, id);
    let probe = f.connector.last_probe().unwrap();
    assert_eq!(probe.sent_count(), 1);

    f.coordinator.on_channel_event(id, ChannelEvent::Ready, 0);
    assert_eq!(probe.sent_count(), 1);
    assert_eq!(f.coordinator.active_count(), 1);
}
