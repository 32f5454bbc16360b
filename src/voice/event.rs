use axum::{body::Bytes, http::StatusCode};
use serde_json::Value;
use std::fmt::{self, Display, Formatter};

/// Whatever the platform posted. Bodies that are not JSON are kept as text.
#[derive(Debug)]
pub enum EventPayload {
    Json(Value),
    Raw(String),
}

impl EventPayload {
    pub fn parse(body: &[u8]) -> Self {
        match serde_json::from_slice(body) {
            Ok(value) => EventPayload::Json(value),
            Err(_) => EventPayload::Raw(String::from_utf8_lossy(body).into_owned()),
        }
    }
}

impl Display for EventPayload {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            EventPayload::Json(value) => write!(f, "{value}"),
            EventPayload::Raw(text) => f.write_str(text),
        }
    }
}

/// Logs the event and acknowledges it. The sender is not verified.
pub async fn event_handler(body: Bytes) -> StatusCode {
    let payload = EventPayload::parse(&body);

    log::info!("===Event");
    log::info!("{payload}");

    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{LevelFilter, Log, Metadata, Record};
    use std::sync::Mutex;

    static LINES: Mutex<Vec<String>> = Mutex::new(Vec::new());

    struct CapturingLogger;

    impl Log for CapturingLogger {
        fn enabled(&self, _: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            LINES.lock().unwrap().push(record.args().to_string());
        }

        fn flush(&self) {}
    }

    static LOGGER: CapturingLogger = CapturingLogger;

    fn capture_logs() {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Info);
    }

    #[tokio::test]
    async fn handler_logs_the_payload() {
        capture_logs();

        let body = Bytes::from_static(br#"{"uuid":"call-77","status":"answered"}"#);
        let status = event_handler(body).await;
        assert_eq!(status, StatusCode::OK);

        let lines = LINES.lock().unwrap();
        assert!(lines.iter().any(|line| line == "===Event"));
        assert!(lines
            .iter()
            .any(|line| line == r#"{"status":"answered","uuid":"call-77"}"#));
    }

    #[test]
    fn json_payload_is_logged_compactly() {
        let body = br#"{ "status": "ringing", "uuid": "abc-123" }"#;
        let payload = EventPayload::parse(body);

        assert!(matches!(payload, EventPayload::Json(_)));
        assert_eq!(payload.to_string(), r#"{"status":"ringing","uuid":"abc-123"}"#);
    }

    #[test]
    fn non_json_payload_is_kept_as_text() {
        let payload = EventPayload::parse(b"status=answered&uuid=abc");

        assert!(matches!(payload, EventPayload::Raw(_)));
        assert_eq!(payload.to_string(), "status=answered&uuid=abc");
    }

    #[test]
    fn empty_body_is_accepted() {
        assert_eq!(EventPayload::parse(b"").to_string(), "");
    }
}
