//! Content negotiation for the Streamable HTTP transport.
//!
//! A client must state up front that it can take either response mode, so
//! the `Accept` header has to name both the JSON and the event-stream media
//! types. Wildcards do not count.

pub const JSON_MEDIA_TYPE: &str = "application/json";
pub const EVENT_STREAM_MEDIA_TYPE: &str = "text/event-stream";

/// Outcome of checking a request's `Accept` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Negotiation {
    Accept,
    Reject,
}

impl Negotiation {
    #[must_use]
    pub fn is_accept(self) -> bool {
        self == Self::Accept
    }
}

/// Decide whether a request with this `Accept` header value may be served.
///
/// Media ranges are comma-separated; matching ignores case, surrounding
/// whitespace and parameters. A range whose quality is `q=0` is treated as
/// refused.
#[must_use]
pub fn negotiate(accept: Option<&str>) -> Negotiation {
    let Some(header) = accept else {
        return Negotiation::Reject;
    };

    let mut json = false;
    let mut event_stream = false;

    for range in header.split(',') {
        let mut parts = range.split(';');
        let media_type = parts.next().unwrap_or_default().trim();
        if parts.any(is_zero_quality) {
            continue;
        }

        if media_type.eq_ignore_ascii_case(JSON_MEDIA_TYPE) {
            json = true;
        } else if media_type.eq_ignore_ascii_case(EVENT_STREAM_MEDIA_TYPE) {
            event_stream = true;
        }
    }

    if json && event_stream {
        Negotiation::Accept
    } else {
        Negotiation::Reject
    }
}

fn is_zero_quality(param: &str) -> bool {
    let Some((key, value)) = param.split_once('=') else {
        return false;
    };
    key.trim().eq_ignore_ascii_case("q")
        && value
            .trim()
            .parse::<f32>()
            .is_ok_and(|q| q <= 0.0)
}
