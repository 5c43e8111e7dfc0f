//! Solidgate report runner
//!
//! Fetches one report for a date range and writes every record to stdout as
//! one JSON object per line. Credentials and the query come from the
//! environment; see [`settings`] for the variables.
//!
//! ```text
//! SOLIDGATE_PUBLIC_KEY=api_pk_... SOLIDGATE_PRIVATE_KEY=api_sk_... \
//!     REPORT=card_orders DATE_FROM=2022-04-01 DATE_TO=2022-05-01 solidgate-reports
//! ```

#![allow(clippy::multiple_crate_versions, reason = "transitive dependencies from reqwest")]

mod observability;
mod settings;

use std::{
    io::{self, Write},
    process::ExitCode,
};

use futures::{Stream, TryStreamExt};
use serde::Serialize;
use solidgate_reporting::{ReportClient, ReportKind, Result};
use tracing::{error, info};

use crate::{
    observability::{LogFormat, init_observability},
    settings::{RunError, RunSettings},
};

#[tokio::main]
async fn main() -> ExitCode {
    init_observability(LogFormat::from_env());

    let settings = match RunSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "invalid settings");
            return ExitCode::FAILURE;
        }
    };

    match run(settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "report run failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(settings: RunSettings) -> std::result::Result<(), RunError> {
    let RunSettings { channel, kind, range, config } = settings;

    info!(
        channel = channel.name(),
        report = %kind,
        date_from = %range.date_from(),
        date_to = %range.date_to(),
        "starting report run"
    );

    let client = ReportClient::with_config(channel, &config)?;

    let written = match kind {
        ReportKind::CardOrders => write_records(client.card_orders(range)).await?,
        ReportKind::Chargebacks => write_records(client.chargebacks(range)).await?,
        ReportKind::ApmOrders => write_records(client.apm_orders(range)).await?,
        ReportKind::FraudAlerts => write_records(client.fraud_alerts(range)).await?,
        ReportKind::Subscriptions => write_records(client.subscriptions(range)).await?,
        ReportKind::PaypalDisputes => write_records(client.paypal_disputes(range)).await?,
    };

    info!(records = written, report = %kind, "report run finished");
    Ok(())
}

/// Drains `records` to stdout as JSON lines, returning how many were written.
async fn write_records<R: Serialize>(
    records: impl Stream<Item = Result<R>>,
) -> std::result::Result<usize, RunError> {
    futures::pin_mut!(records);

    let mut written = 0;
    while let Some(record) = records.try_next().await? {
        let mut out = io::stdout().lock();
        serde_json::to_writer(&mut out, &record).map_err(io::Error::from)?;
        writeln!(out)?;
        written += 1;
    }
    Ok(written)
}
