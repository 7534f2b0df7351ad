//! `draft save|show|list|discard`.

use super::{read_form, write_json, FormattedTotals};
use crate::DraftCommand;
use serde::Serialize;
use std::io::Write;
use stockdesk_core::PricingResult;
use stockdesk_draft::{DeskConfig, Draft, DraftError, DraftStore, DraftSummary};
use tracing::info;

/// A draft together with totals recomputed from its form.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftView {
    #[serde(flatten)]
    pub draft: Draft,
    pub pricing: PricingResult,
    pub formatted: FormattedTotals,
}

impl DraftView {
    pub fn new(draft: Draft, currency_symbol: &str) -> Self {
        let pricing = draft.form.pricing();
        DraftView {
            formatted: FormattedTotals::new(&pricing, currency_symbol),
            pricing,
            draft,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DraftList {
    pub dir: String,
    pub drafts: Vec<DraftSummary>,
}

pub fn execute<W: Write>(command: DraftCommand, config: &DeskConfig, out: &mut W) -> anyhow::Result<()> {
    let store = DraftStore::from_config(config)?;
    let symbol = config.store.currency_symbol.as_str();

    match command {
        DraftCommand::Save { file, id } => {
            let form = read_form(&file)?;
            let draft = store.save(id.as_deref(), &form)?;
            info!(id = %draft.id, "Draft saved");
            write_json(out, &DraftView::new(draft, symbol))
        }
        DraftCommand::Show { id } => {
            let draft = store.load(&id)?.ok_or(DraftError::NotFound(id))?;
            write_json(out, &DraftView::new(draft, symbol))
        }
        DraftCommand::List => {
            let drafts = store.list()?;
            write_json(
                out,
                &DraftList {
                    dir: store.dir().display().to_string(),
                    drafts,
                },
            )
        }
        DraftCommand::Discard { id } => {
            if !store.discard(&id)? {
                return Err(DraftError::NotFound(id).into());
            }
            info!(%id, "Draft discarded");
            writeln!(out, "discarded {}", id)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::path::PathBuf;

    struct Fixture {
        _dir: tempfile::TempDir,
        config: DeskConfig,
        form_path: PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let mut config = DeskConfig::default();
        config.drafts.dir = Some(dir.path().join("drafts"));

        let form_path = dir.path().join("order.json");
        std::fs::write(
            &form_path,
            r#"{
                "customerId": "cus_7",
                "items": [{"productId": "p-1", "productName": "Widget", "quantity": 3, "unitPrice": 20}],
                "discount": {"type": "fixed", "value": 5},
                "shippingFee": "2.50"
            }"#,
        )
        .unwrap();

        Fixture {
            _dir: dir,
            config,
            form_path,
        }
    }

    fn run(fx: &Fixture, command: DraftCommand) -> anyhow::Result<String> {
        let mut out = Vec::new();
        execute(command, &fx.config, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_save_show_list_discard() {
        let fx = fixture();

        let saved = run(
            &fx,
            DraftCommand::Save {
                file: fx.form_path.clone(),
                id: Some("walk-in".into()),
            },
        )
        .unwrap();
        let saved: Value = serde_json::from_str(&saved).unwrap();
        assert_eq!(saved["id"], "walk-in");
        assert_eq!(saved["pricing"]["totalAmount"], 57.5);
        assert_eq!(saved["formatted"]["totalAmount"], "$57.50");

        let shown: Value =
            serde_json::from_str(&run(&fx, DraftCommand::Show { id: "walk-in".into() }).unwrap()).unwrap();
        assert_eq!(shown["form"]["customerId"], "cus_7");

        let listed: Value = serde_json::from_str(&run(&fx, DraftCommand::List).unwrap()).unwrap();
        assert_eq!(listed["drafts"].as_array().unwrap().len(), 1);
        assert_eq!(listed["drafts"][0]["itemCount"], 1);
        assert_eq!(listed["drafts"][0]["totalAmount"], 57.5);

        let discarded = run(&fx, DraftCommand::Discard { id: "walk-in".into() }).unwrap();
        assert_eq!(discarded.trim(), "discarded walk-in");
    }

    #[test]
    fn test_missing_draft_is_not_found() {
        let fx = fixture();
        for command in [
            DraftCommand::Show { id: "ghost".into() },
            DraftCommand::Discard { id: "ghost".into() },
        ] {
            let err = run(&fx, command).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<DraftError>(),
                Some(DraftError::NotFound(id)) if id == "ghost"
            ));
        }
    }

    #[test]
    fn test_invalid_id_is_rejected() {
        let fx = fixture();
        let result = run(
            &fx,
            DraftCommand::Save {
                file: fx.form_path.clone(),
                id: Some("../etc".into()),
            },
        );
        assert!(result.is_err());
    }
}
