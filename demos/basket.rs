//! Basket Example
//!
//! Loads a fixture set and prints the price range of every item range and the
//! total of every order.
//!
//! Use `-f` to load a fixture set by name
//! Use `-s` to price variants with a selector, e.g. `wholesale`
//! Use `-d` to apply a discount rate to order totals

use anyhow::Result;
use clap::Parser;
use pricewise::{
    fixtures::Fixture,
    pricing::{discounted, parse_amount},
    utils::ExampleArgs,
};
use tracing_subscriber::EnvFilter;

/// Basket Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = ExampleArgs::parse();
    let fixture = Fixture::from_set(&args.fixture)?;
    let rate = args.discount.as_deref().map(parse_amount).transpose()?;

    println!("Ranges");

    for key in fixture.range_keys() {
        let range = fixture.range(key)?;
        let (low, high) = match args.selector.as_deref() {
            Some(selector) => range.price_range(selector)?,
            None => range.price_range(&())?,
        };

        println!("  {key}: {low} .. {high}");
    }

    println!("Orders");

    for key in fixture.order_keys() {
        let total = fixture.order(key)?.total(&())?;

        match rate {
            Some(rate) => println!("  {key}: {total} ({} after discount)", discounted(&total, rate)?),
            None => println!("  {key}: {total}"),
        }
    }

    Ok(())
}
