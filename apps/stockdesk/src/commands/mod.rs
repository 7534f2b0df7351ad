//! # Commands
//!
//! Command implementations. Each one reads its input, delegates to
//! `stockdesk-core` / `stockdesk-draft`, and writes JSON to the output.

pub mod draft;
pub mod price;

use anyhow::Context;
use serde::Serialize;
use std::io::{Read, Write};
use std::path::Path;
use stockdesk_core::{OrderForm, PricingResult};

/// Reads an order form from a JSON file, or stdin when the path is `-`.
pub fn read_form(path: &Path) -> anyhow::Result<OrderForm> {
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading order form from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading order form from {}", path.display()))?
    };

    serde_json::from_str(&contents).context("order form is not valid JSON")
}

/// Writes a value as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Totals formatted for display next to the numeric amounts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedTotals {
    pub subtotal: String,
    pub discount_amount: String,
    pub shipping_fee: String,
    pub total_amount: String,
}

impl FormattedTotals {
    pub fn new(pricing: &PricingResult, symbol: &str) -> Self {
        FormattedTotals {
            subtotal: pricing.subtotal.format_with(symbol),
            discount_amount: pricing.discount_amount.format_with(symbol),
            shipping_fee: pricing.shipping_fee.format_with(symbol),
            total_amount: pricing.total_amount.format_with(symbol),
        }
    }
}
