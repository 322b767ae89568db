use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use chrono::NaiveDate;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{header, Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde::Deserialize;
use tokio::net::TcpStream;
use tracing::debug;

use crate::engine::{Engine, EngineError};
use crate::limits::MAX_BODY_BYTES;
use crate::model::BookingDraft;
use crate::observability;

/// Serve one accepted TCP connection with HTTP/1 until the peer hangs up.
pub async fn process_connection(socket: TcpStream, engine: Arc<Engine>) -> hyper::Result<()> {
    let io = TokioIo::new(socket);
    let service = service_fn(move |req: Request<Incoming>| {
        let engine = engine.clone();
        async move { Ok::<_, Infallible>(handle_request(&engine, req).await) }
    });
    http1::Builder::new().serve_connection(io, service).await
}

async fn handle_request(engine: &Engine, req: Request<Incoming>) -> Response<Full<Bytes>> {
    let started = Instant::now();
    let path = normalize_path(req.uri().path()).to_string();
    let endpoint = endpoint_label(req.method(), &path);

    let response = match (req.method(), path.as_str()) {
        (&Method::GET, "/" | "/api/v1") => health(),
        (&Method::POST, "/api/v1/booking") => match read_body(req.into_body()).await {
            Ok(body) => create_booking(engine, &body).await,
            Err(resp) => resp,
        },
        (&Method::PUT, "/api/v1/booking/extend") => match read_body(req.into_body()).await {
            Ok(body) => extend_stay(engine, &body).await,
            Err(resp) => resp,
        },
        _ => error_response(StatusCode::NOT_FOUND, "not found"),
    };

    metrics::counter!(
        observability::REQUESTS_TOTAL,
        "endpoint" => endpoint,
        "status" => response.status().as_u16().to_string()
    )
    .increment(1);
    metrics::histogram!(observability::REQUEST_DURATION_SECONDS, "endpoint" => endpoint)
        .record(started.elapsed().as_secs_f64());
    response
}

// ── Request handling ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CreateBookingRequest {
    #[serde(rename = "guestName")]
    guest_name: String,
    #[serde(rename = "unitID")]
    unit_id: String,
    #[serde(rename = "checkInDate")]
    check_in_date: String,
    #[serde(rename = "numberOfNights")]
    number_of_nights: i64,
}

#[derive(Debug, Deserialize)]
struct ExtendStayRequest {
    #[serde(rename = "guestName")]
    guest_name: String,
    #[serde(rename = "unitID")]
    unit_id: String,
    #[serde(rename = "additionalNights")]
    additional_nights: i64,
}

fn health() -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &serde_json::json!({ "message": "OK" }))
}

async fn create_booking(engine: &Engine, body: &[u8]) -> Response<Full<Bytes>> {
    let req: CreateBookingRequest = match serde_json::from_slice(body) {
        Ok(req) => req,
        Err(e) => return bad_request(&format!("invalid booking request: {e}")),
    };
    let Some(check_in) = parse_date(&req.check_in_date) else {
        return bad_request("checkInDate must be a calendar date in YYYY-MM-DD format");
    };
    let Some(nights) = positive_u32(req.number_of_nights) else {
        return bad_request("numberOfNights must be a positive integer");
    };

    let draft = BookingDraft {
        guest_name: req.guest_name,
        unit_id: req.unit_id,
        check_in,
        nights,
    };
    match engine.create_booking(draft).await {
        Ok(booking) => {
            debug!(
                "created booking {} for {} in unit {}",
                booking.id, booking.guest_name, booking.unit_id
            );
            json_response(
                StatusCode::OK,
                &serde_json::json!({
                    "message": "Booking created successfully",
                    "booking": booking,
                }),
            )
        }
        Err(e) => engine_err(e),
    }
}

async fn extend_stay(engine: &Engine, body: &[u8]) -> Response<Full<Bytes>> {
    let req: ExtendStayRequest = match serde_json::from_slice(body) {
        Ok(req) => req,
        Err(e) => return bad_request(&format!("invalid extension request: {e}")),
    };
    let Some(additional_nights) = positive_u32(req.additional_nights) else {
        return bad_request("additionalNights must be a positive integer");
    };

    match engine
        .extend_stay(&req.guest_name, &req.unit_id, additional_nights)
        .await
    {
        Ok(booking) => {
            debug!("extended booking {} to {}", booking.id, booking.check_out);
            json_response(
                StatusCode::OK,
                &serde_json::json!({
                    "message": "Stay extended successfully",
                    "booking": booking,
                }),
            )
        }
        Err(e) => engine_err(e),
    }
}

// ── Plumbing ─────────────────────────────────────────────────────

/// Trailing slashes are insignificant: `/api/v1/booking/extend/` routes the
/// same as `/api/v1/booking/extend`.
fn normalize_path(path: &str) -> &str {
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

/// Map a request to a short label for metrics.
fn endpoint_label(method: &Method, path: &str) -> &'static str {
    match (method, path) {
        (&Method::GET, "/" | "/api/v1") => "healthcheck",
        (&Method::POST, "/api/v1/booking") => "create_booking",
        (&Method::PUT, "/api/v1/booking/extend") => "extend_stay",
        _ => "unmatched",
    }
}

/// Read the whole request body, refusing anything over `MAX_BODY_BYTES`.
async fn read_body(body: Incoming) -> Result<Bytes, Response<Full<Bytes>>> {
    match Limited::new(body, MAX_BODY_BYTES).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.is::<LengthLimitError>() => Err(error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            "request body too large",
        )),
        Err(_) => Err(bad_request("could not read request body")),
    }
}

/// Strictly `YYYY-MM-DD`; anything else is a precondition violation.
fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// JSON numbers arrive as i64; nights fields must be positive and fit a u32.
fn positive_u32(n: i64) -> Option<u32> {
    u32::try_from(n).ok().filter(|&n| n >= 1)
}

/// Map an engine failure to its HTTP shape: 404 for a missing extension
/// target, 400 for everything else, body always `{"error": <message>}`.
fn engine_err(e: EngineError) -> Response<Full<Bytes>> {
    let status = match &e {
        EngineError::NotFound { guest_name, unit_id } => {
            debug!("no booking to extend for guest {guest_name} in unit {unit_id}");
            StatusCode::NOT_FOUND
        }
        EngineError::Rejected(reason) => {
            metrics::counter!(
                observability::REJECTIONS_TOTAL,
                "reason" => observability::reason_label(reason)
            )
            .increment(1);
            StatusCode::BAD_REQUEST
        }
        EngineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
    };
    error_response(status, &e.to_string())
}

fn bad_request(message: &str) -> Response<Full<Bytes>> {
    error_response(StatusCode::BAD_REQUEST, message)
}

fn error_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    json_response(status, &serde_json::json!({ "error": message }))
}

fn json_response(status: StatusCode, body: &serde_json::Value) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .expect("response parts are statically valid")
}
