//! Check command - evaluates the security chain for a synthetic request

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use clap::Args;
use serde::Serialize;

use crate::config::AppConfig;
use crate::domain::{Access, FixedContextLocator};
use crate::infrastructure::{build_application_context, build_security_chain};

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// HTTP method, e.g. GET
    pub method: String,

    /// Request path, e.g. /actuator/health
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub method: String,
    pub path: String,
    pub rule: Option<String>,
    pub access: Access,
}

pub async fn run(args: CheckArgs) -> anyhow::Result<()> {
    let config = super::load_config()?;
    let report = evaluate(&config, &args)?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn evaluate(config: &AppConfig, args: &CheckArgs) -> anyhow::Result<CheckReport> {
    let context = build_application_context(config)?;
    let chain = build_security_chain(config, Arc::new(FixedContextLocator::new(context)));

    let method = Method::from_bytes(args.method.to_uppercase().as_bytes())?;
    let request = Request::builder()
        .method(method.clone())
        .uri(args.path.as_str())
        .body(Body::empty())?;

    let decision = chain.evaluate(&request)?;

    Ok(CheckReport {
        method: method.to_string(),
        path: args.path.clone(),
        rule: decision.rule,
        access: decision.access,
    })
}
