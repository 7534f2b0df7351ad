//! `price` and `submit-preview`.

use super::{read_form, write_json, FormattedTotals};
use anyhow::bail;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use stockdesk_core::{CoreError, OrderForm, OrderSubmission, PricingResult, ValidationErrors};
use stockdesk_draft::DeskConfig;
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceReport {
    pub item_count: usize,
    pub total_quantity: u64,
    pub pricing: PricingResult,
    pub formatted: FormattedTotals,
}

impl PriceReport {
    pub fn new(form: &OrderForm, currency_symbol: &str) -> Self {
        let pricing = form.pricing();
        PriceReport {
            item_count: form.item_count(),
            total_quantity: form.total_quantity(),
            formatted: FormattedTotals::new(&pricing, currency_symbol),
            pricing,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FieldMessage {
    pub field: String,
    pub message: String,
}

/// Output of `submit-preview`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SubmitPreview {
    Valid { payload: OrderSubmission },
    Invalid { errors: Vec<FieldMessage> },
}

impl SubmitPreview {
    pub fn from_form(form: &OrderForm) -> anyhow::Result<Self> {
        match form.to_submission() {
            Ok(payload) => Ok(SubmitPreview::Valid { payload }),
            Err(CoreError::InvalidSubmission(errors)) => Ok(Self::invalid(&errors)),
            Err(e) => Err(e.into()),
        }
    }

    fn invalid(errors: &ValidationErrors) -> Self {
        SubmitPreview::Invalid {
            errors: errors
                .iter()
                .map(|e| FieldMessage {
                    field: e.field().to_string(),
                    message: e.to_string(),
                })
                .collect(),
        }
    }
}

pub fn price<W: Write>(file: &Path, config: &DeskConfig, out: &mut W) -> anyhow::Result<()> {
    let form = read_form(file)?;
    let report = PriceReport::new(&form, &config.store.currency_symbol);
    debug!(total = %report.pricing.total_amount, items = report.item_count, "Priced order form");
    write_json(out, &report)
}

/// Prints the payload, or every validation message and fails.
pub fn submit_preview<W: Write>(file: &Path, out: &mut W) -> anyhow::Result<()> {
    let form = read_form(file)?;
    let preview = SubmitPreview::from_form(&form)?;
    write_json(out, &preview)?;

    if let SubmitPreview::Invalid { errors } = &preview {
        warn!(count = errors.len(), "Order form failed validation");
        bail!("order form has {} validation error(s)", errors.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const FORM: &str = r#"{
        "customerId": "cus_42",
        "items": [
            {"productId": "p-1", "productName": "Widget", "quantity": "2", "unitPrice": "100"},
            {"productId": "p-2", "productName": "Gadget", "quantity": 1, "unitPrice": 50}
        ],
        "discount": {"type": "percentage", "value": "10"},
        "shippingFee": 0
    }"#;

    fn write_form(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order.json");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_price_prints_totals() {
        let (_dir, path) = write_form(FORM);
        let mut out = Vec::new();
        price(&path, &DeskConfig::default(), &mut out).unwrap();

        let json: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["itemCount"], 2);
        assert_eq!(json["totalQuantity"], 3);
        assert_eq!(json["pricing"]["subtotal"], 250.0);
        assert_eq!(json["pricing"]["discountAmount"], 25.0);
        assert_eq!(json["pricing"]["totalAmount"], 225.0);
        assert_eq!(json["formatted"]["totalAmount"], "$225.00");
    }

    #[test]
    fn test_price_uses_configured_symbol() {
        let (_dir, path) = write_form(FORM);
        let mut config = DeskConfig::default();
        config.store.currency_symbol = "€".to_string();

        let mut out = Vec::new();
        price(&path, &config, &mut out).unwrap();
        let json: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["formatted"]["subtotal"], "€250.00");
    }

    #[test]
    fn test_submit_preview_valid() {
        let (_dir, path) = write_form(FORM);
        let mut out = Vec::new();
        submit_preview(&path, &mut out).unwrap();

        let json: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["status"], "valid");
        assert_eq!(json["payload"]["customerId"], "cus_42");
        assert_eq!(json["payload"]["totalAmount"], 225.0);
        assert_eq!(json["payload"]["discountType"], "percentage");
    }

    #[test]
    fn test_submit_preview_lists_every_error() {
        let (_dir, path) = write_form(r#"{"customerId": "", "items": []}"#);
        let mut out = Vec::new();
        assert!(submit_preview(&path, &mut out).is_err());

        let json: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["status"], "invalid");
        let fields: Vec<&str> = json["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        assert!(fields.contains(&"customer"));
        assert!(fields.contains(&"items"));
    }
}
