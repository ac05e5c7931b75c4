use autobus_telemetry::{MetricsSnapshot, TelemetryMetrics, init_tracing, new_connection_id};

#[test]
fn connection_ids_unique() {
    let first = new_connection_id();
    let second = new_connection_id();
    assert!(!first.is_empty());
    assert_ne!(first, second);
}

#[test]
fn metrics_start_empty() {
    let metrics = TelemetryMetrics::new();
    assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
}

#[test]
fn metrics_count_per_instance() {
    let first = TelemetryMetrics::new();
    let second = TelemetryMetrics::new();

    first.record_connection_accepted();
    first.record_frame_received();
    first.record_frame_received();
    first.record_frame_dropped();
    first.record_publish_failure();

    let snapshot = first.snapshot();
    assert_eq!(snapshot.connections_accepted, 1);
    assert_eq!(snapshot.frames_received, 2);
    assert_eq!(snapshot.frames_dropped, 1);
    assert_eq!(snapshot.publish_failure, 1);
    assert_eq!(snapshot.publish_success, 0);
    assert_eq!(second.snapshot(), MetricsSnapshot::default());
}

#[test]
fn init_tracing_is_idempotent() {
    init_tracing("debug");
    init_tracing("info");
}
