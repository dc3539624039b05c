use clap::Args;
use serde_json::Value;

use green_credit_core::savings::{calculate_savings, CreditRecord, SavingsInput};

use crate::input;

/// Arguments for savings aggregation
#[derive(Args)]
pub struct SavingsArgs {
    /// Path to a JSON/YAML credit feed: `{"credits": [...]}` or a bare list of credits
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_savings(args: SavingsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let raw: Value = input::read_input(args.input.as_deref())?
        .ok_or("--input is required (or pipe a credit feed on stdin)")?;

    let savings_input = if raw.is_array() {
        SavingsInput {
            credits: serde_json::from_value::<Vec<CreditRecord>>(raw)?,
        }
    } else {
        serde_json::from_value::<SavingsInput>(raw)?
    };

    let output = calculate_savings(&savings_input)?;
    Ok(serde_json::to_value(output)?)
}
