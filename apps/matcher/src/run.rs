//! Command bodies. Results go to `out`; the busy label and alerts go to `err`.

use std::io::Write;

use anyhow::Result;

use crate::cli::MatchArgs;
use crate::client::{HttpMatchClient, MatchService};
use crate::form::SubmitOutcome;
use crate::render::{render_recommendations, render_result};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// Runs `matcher match` and returns the process exit status.
pub async fn run_match(
    service: &dyn MatchService,
    args: &MatchArgs,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<u8> {
    let mut form = args.to_form().await?;

    let outcome = form
        .submit(service, |f| {
            writeln!(err, "{}", f.button_label()).ok();
        })
        .await;

    match outcome {
        SubmitOutcome::Scored => {
            let Some(result) = form.result() else {
                return Ok(EXIT_FAILURE);
            };
            if args.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&result.raw)?)?;
                return Ok(EXIT_SUCCESS);
            }
            for line in render_result(Some(result)) {
                writeln!(out, "{line}")?;
            }
            if args.recommendations {
                for line in render_recommendations(Some(result)) {
                    writeln!(out, "{line}")?;
                }
            }
            Ok(EXIT_SUCCESS)
        }
        SubmitOutcome::Alert(message) => {
            writeln!(err, "{message}")?;
            Ok(EXIT_FAILURE)
        }
        SubmitOutcome::Busy => Ok(EXIT_FAILURE),
    }
}

/// Runs `matcher health` and returns the process exit status.
pub async fn run_health(
    client: &HttpMatchClient,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<u8> {
    match client.health().await {
        Ok(health) if health.ok => {
            writeln!(out, "ok: {}", client.api_base())?;
            Ok(EXIT_SUCCESS)
        }
        Ok(_) => {
            writeln!(err, "Scoring service at {} reported not ok", client.api_base())?;
            Ok(EXIT_FAILURE)
        }
        Err(e) => {
            writeln!(err, "{}", e.alert_message())?;
            Ok(EXIT_FAILURE)
        }
    }
}
