//! Utils

use clap::Parser;

/// Arguments for the basket demo
#[derive(Debug, Parser)]
pub struct ExampleArgs {
    /// Fixture set to load ranges & orders from
    #[clap(short, long, default_value = "apparel")]
    pub fixture: String,

    /// Selector to price variants with, e.g. a price list name
    #[clap(short, long)]
    pub selector: Option<String>,

    /// Discount rate to apply to order totals, e.g. `0.1` for 10% off
    #[clap(short, long)]
    pub discount: Option<String>,
}
