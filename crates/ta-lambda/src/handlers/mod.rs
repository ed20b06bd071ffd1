//! Pipeline step handlers.
//!
//! Each handler is one Lambda function in the deployed solution. They share
//! a binary; the handler to run is selected by name.

pub mod common;
pub mod create_views;
pub mod extract_ta_data;
pub mod extract_tag_data;
pub mod get_accounts;
pub mod get_checks;
pub mod get_tags;
pub mod refresh_check;
pub mod start_crawler;
pub mod verify_check_status;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::context::HandlerContext;
use crate::error::PipelineError;

/// Handler names, as configured in each function's `_HANDLER` setting.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerName {
    GetAccounts,
    GetChecks,
    RefreshCheck,
    VerifyCheckStatus,
    ExtractTaData,
    GetTags,
    ExtractTagData,
    StartCrawler,
    CreateViews,
}

fn parse_event<T: DeserializeOwned>(event: Value) -> Result<T> {
    serde_json::from_value(event).context("Invalid invocation event")
}

fn respond<T: Serialize>(output: T) -> Result<Value> {
    serde_json::to_value(output).context("Failed to serialize handler output")
}

async fn run(name: HandlerName, ctx: &HandlerContext, event: Value) -> Result<Value> {
    match name {
        HandlerName::GetAccounts => respond(get_accounts::handle(ctx).await?),
        HandlerName::GetChecks => respond(get_checks::handle(ctx, parse_event(event)?).await?),
        HandlerName::RefreshCheck => {
            respond(refresh_check::handle(ctx, parse_event(event)?).await?)
        }
        HandlerName::VerifyCheckStatus => {
            respond(verify_check_status::handle(ctx, parse_event(event)?).await?)
        }
        HandlerName::ExtractTaData => {
            respond(extract_ta_data::handle(ctx, parse_event(event)?).await?)
        }
        HandlerName::GetTags => respond(get_tags::handle(ctx, parse_event(event)?).await?),
        HandlerName::ExtractTagData => {
            respond(extract_tag_data::handle(ctx, parse_event(event)?).await?)
        }
        HandlerName::StartCrawler => respond(start_crawler::handle(ctx).await?),
        HandlerName::CreateViews => respond(create_views::handle(ctx).await?),
    }
}

/// Run one handler on a raw event.
///
/// The event and any failure are logged with account fields masked; the
/// failure is returned as a [`PipelineError`] for the workflow to retry or
/// catch.
pub async fn dispatch(
    name: HandlerName,
    ctx: &HandlerContext,
    event: Value,
) -> Result<Value, PipelineError> {
    ctx.log.record("Event", &event);
    run(name, ctx, event).await.map_err(|err| {
        let failure = PipelineError::classify(&err, ctx.masker());
        log::error!("{}", failure);
        failure
    })
}
