use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

use green_credit_core::amortization::{interest_only_payment, monthly_payment, months_from_payment};
use green_credit_core::offers::analysis::analyze_loan;
use green_credit_core::{with_metadata, CreditCategory, LoanTerms};

use crate::input;

/// Arguments for the forward payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate in percent (6.0 = 6%)
    #[arg(long)]
    pub rate: Decimal,

    /// Number of monthly installments
    #[arg(long)]
    pub months: u32,
}

/// Arguments for the term implied by a fixed payment
#[derive(Args)]
pub struct TermArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate in percent (6.0 = 6%)
    #[arg(long)]
    pub rate: Decimal,

    /// Fixed monthly payment
    #[arg(long)]
    pub payment: Decimal,
}

/// Arguments for full loan analysis
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AnalyzeLoanArgs {
    /// Path to JSON/YAML loan terms (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Number of monthly installments
    #[arg(long)]
    pub months: Option<u32>,

    /// Fixed monthly payment committed by the client
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Expected utility cost after adopting the product
    #[arg(long, default_value = "0")]
    pub reduced_cost: Decimal,

    /// Credit category (electricity, water, transport, other)
    #[arg(long, default_value = "other")]
    pub category: CreditCategory,
}

#[derive(Serialize)]
struct PaymentResult {
    principal: Decimal,
    annual_rate_pct: Decimal,
    term_months: u32,
    monthly_payment: Decimal,
}

#[derive(Serialize)]
struct TermResult {
    principal: Decimal,
    annual_rate_pct: Decimal,
    fixed_monthly_payment: Decimal,
    interest_only_payment: Decimal,
    feasible: bool,
    term_months: Option<u32>,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let result = PaymentResult {
        principal: args.principal,
        annual_rate_pct: args.rate,
        term_months: args.months,
        monthly_payment: monthly_payment(args.principal, args.rate, args.months).round_dp(2),
    };
    let warnings = if args.months == 0 {
        vec!["Zero-month term yields a zero payment".to_string()]
    } else {
        Vec::new()
    };

    let output = with_metadata(
        "Level-payment annuity (monthly compounding)",
        &serde_json::json!({ "rounding": "2dp" }),
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_term(args: TermArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let term = months_from_payment(args.principal, args.rate, args.payment);
    let interest_only = interest_only_payment(args.principal, args.rate);

    let mut warnings = Vec::new();
    if term.is_none() {
        warnings.push(format!(
            "Payment {} never amortizes the loan; it must exceed {}",
            args.payment,
            interest_only.round_dp(2)
        ));
    }

    let result = TermResult {
        principal: args.principal,
        annual_rate_pct: args.rate,
        fixed_monthly_payment: args.payment,
        interest_only_payment: interest_only.round_dp(2),
        feasible: term.is_some(),
        term_months: term,
    };

    let output = with_metadata(
        "Closed-form annuity inversion, rounded up to whole months",
        &serde_json::json!({ "rounding": "ceil" }),
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_analyze_loan(args: AnalyzeLoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms: LoanTerms = match input::read_input(args.input.as_deref())? {
        Some(terms) => terms,
        None => LoanTerms {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_pct: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_months: args.months.ok_or("--months is required (or provide --input)")?,
            fixed_monthly_payment: args
                .payment
                .ok_or("--payment is required (or provide --input)")?,
            reduced_monthly_cost: args.reduced_cost,
            category: args.category,
            description: None,
        },
    };

    let output = analyze_loan(&terms)?;
    Ok(serde_json::to_value(output)?)
}
