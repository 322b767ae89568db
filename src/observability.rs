use std::net::SocketAddr;

use crate::engine::RejectReason;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: total HTTP requests served. Labels: endpoint, status.
pub const REQUESTS_TOTAL: &str = "stayd_requests_total";

/// Histogram: request latency in seconds. Labels: endpoint.
pub const REQUEST_DURATION_SECONDS: &str = "stayd_request_duration_seconds";

/// Counter: booking and extension requests turned down. Labels: reason.
pub const REJECTIONS_TOTAL: &str = "stayd_rejections_total";

// ── USE metrics (resource utilization) ──────────────────────────

/// Gauge: active TCP connections.
pub const CONNECTIONS_ACTIVE: &str = "stayd_connections_active";

/// Counter: total connections accepted.
pub const CONNECTIONS_TOTAL: &str = "stayd_connections_total";

/// Counter: connections rejected due to limit.
pub const CONNECTIONS_REJECTED_TOTAL: &str = "stayd_connections_rejected_total";

/// Gauge: bookings currently held in the store.
pub const BOOKINGS_STORED: &str = "stayd_bookings_stored";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) {
    let Some(port) = port else { return };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .expect("failed to install Prometheus metrics exporter");
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
}

/// Map a rejection reason to a short label for metrics.
pub fn reason_label(reason: &RejectReason) -> &'static str {
    match reason {
        RejectReason::DuplicateUnitBooking => "duplicate_unit_booking",
        RejectReason::GuestAlreadyBooked => "guest_already_booked",
        RejectReason::UnitOccupied => "unit_occupied",
        RejectReason::ExtensionBlocked => "extension_blocked",
    }
}
