//! # StockDesk CLI Entry Point
//!
//! The setup lives in `lib.rs` for testability.

fn main() -> anyhow::Result<()> {
    stockdesk_app::run()
}
