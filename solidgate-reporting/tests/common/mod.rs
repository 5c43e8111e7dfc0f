//! Shared fixtures for report client integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::{collections::VecDeque, sync::Mutex};

use chrono::NaiveDate;
use serde_json::Value;
use solidgate_reporting::{
    Channel, DateRange, ReportClient, Result,
    transport::{PostRequest, Transport, TransportResponse},
};

pub const PUBLIC_KEY: &str = "api_pk_7b197";
pub const PRIVATE_KEY: &str = "api_sk_0e3b8";
pub const BASE_URL: &str = "https://reports.example.com/api/v1/";

/// Signature of `{"date_from": "2022-04-01 00:00:00", "date_to": "2022-05-01 00:00:00"}`
/// under the test key pair.
pub const APRIL_SIGNATURE: &str = "ODhmYzI0MmRiYTdmYzJmOWU0NmRlMjg4OTU1ZDBiZDU1ZmUwZmQwYTdiOTAxZmM3ZmJkMWUwZTk2ZDZiZTk2Nzg5MmNhNmM2NGE2ZjhmMmE4N2Y2ZjEyNmUxZjUyZmNlNjJiMzJhNDk5ZTczNTQxZDU4OTI1NmI3YThjOGZhNzQ=";

/// A request as the transport saw it.
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub raw_body: Vec<u8>,
}

impl SentRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    pub fn body(&self) -> Value {
        serde_json::from_slice(&self.raw_body).expect("request body should be JSON")
    }
}

/// Transport that replays queued responses and records every request.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<(u16, Vec<u8>)>>,
    sent: Mutex<Vec<SentRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(self, status: u16, body: &Value) -> Self {
        let body = serde_json::to_vec(body).expect("fixture should serialize");
        self.with_raw(status, body)
    }

    pub fn with_raw(self, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.responses.lock().expect("lock").push_back((status, body.into()));
        self
    }

    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().expect("lock").clone()
    }
}

impl Transport for RecordingTransport {
    async fn post<'a>(&'a self, request: PostRequest<'a>) -> Result<TransportResponse> {
        self.sent.lock().expect("lock").push(SentRequest {
            url: request.url.to_owned(),
            headers: request
                .headers()
                .iter()
                .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
                .collect(),
            raw_body: request.body.to_vec(),
        });

        let (status, body) = self
            .responses
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request to {}", request.url));
        Ok(TransportResponse { status, body })
    }

    fn protocol_name(&self) -> &'static str {
        "recording"
    }
}

pub fn client(transport: RecordingTransport) -> ReportClient<RecordingTransport> {
    let channel = Channel::new("test-shop", PUBLIC_KEY, PRIVATE_KEY);
    ReportClient::with_transport(channel, BASE_URL, transport).expect("valid base URL")
}

/// `2022-04-01 00:00:00` to `2022-05-01 00:00:00`.
pub fn april_2022() -> DateRange {
    let day = |m| {
        NaiveDate::from_ymd_opt(2022, m, 1).and_then(|d| d.and_hms_opt(0, 0, 0)).expect("valid date")
    };
    DateRange::new(day(4), day(5)).expect("ordered range")
}
