use clap::Args;
use serde_json::Value;
use tracing::info;

use green_credit_core::offers::validation::{validate_offers, OfferBatchInput};
use green_credit_core::offers::OfferPolicy;
use green_credit_core::LoanTerms;

use crate::input;

/// Arguments for offer validation and term correction
#[derive(Args)]
pub struct ValidateOffersArgs {
    /// Path to a JSON/YAML batch: `{"offers": [...], "policy": {...}}` or a bare list of offers
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a JSON/YAML offer policy (overrides any policy in the batch)
    #[arg(long)]
    pub policy: Option<String>,

    /// Override the maximum term in months
    #[arg(long)]
    pub max_term: Option<u32>,
}

pub fn run_validate_offers(args: ValidateOffersArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let raw: Value = input::read_input(args.input.as_deref())?
        .ok_or("--input is required (or pipe a batch on stdin)")?;

    let mut batch = if raw.is_array() {
        OfferBatchInput {
            offers: serde_json::from_value::<Vec<LoanTerms>>(raw)?,
            policy: OfferPolicy::default(),
        }
    } else {
        serde_json::from_value::<OfferBatchInput>(raw)?
    };

    if let Some(ref path) = args.policy {
        batch.policy = input::file::read_document(path)?;
        info!(path = %path, "offer policy loaded");
    }
    if let Some(max_term) = args.max_term {
        batch.policy.max_term_months = max_term;
    }

    let output = validate_offers(&batch)?;
    Ok(serde_json::to_value(output)?)
}
