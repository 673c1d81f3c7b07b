//! Arithmetic properties checked over a spread of sample amounts.

use rust_decimal::{Decimal, RoundingStrategy};
use testresult::TestResult;

use pricewise::prelude::*;

const AMOUNTS: [i64; 8] = [0, 1, 99, 100, 1_050, 12_345, -250, 999_999];

fn multi(usd: i64, eur: i64) -> Result<Price, PriceError> {
    Price::from_minor([("usd", usd), ("eur", eur)])
}

#[test]
fn decimal_round_trip_rounds_to_two_places() -> TestResult {
    for input in ["0", "0.005", "1.234", "1.235", "-1.235", "99.999", "12345.6"] {
        let decimal = parse_amount(input)?;
        let expected = decimal.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        assert_eq!(
            price_to_decimal(price_to_int(decimal)?),
            format!("{expected:.2}"),
            "round trip of {input}"
        );
    }

    Ok(())
}

#[test]
fn mul_matches_rounded_product() -> TestResult {
    let multipliers = [
        Decimal::ZERO,
        Decimal::ONE,
        Decimal::new(3, 0),
        Decimal::new(15, 1),
        Decimal::new(333, 3),
    ];

    for amount in AMOUNTS {
        let price = multi(amount, amount / 2)?;

        for multiplier in multipliers {
            let product = mul(&price, multiplier)?;

            for code in ["usd", "eur"] {
                let expected = (Decimal::from(price.value(code)?) * multiplier)
                    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

                assert_eq!(
                    Decimal::from(product.value(code)?),
                    expected,
                    "{amount} x {multiplier}"
                );
            }
        }
    }

    Ok(())
}

#[test]
fn sum_min_max_agree_with_each_price() -> TestResult {
    let prices = AMOUNTS
        .iter()
        .map(|&amount| multi(amount, 1_000 - amount))
        .collect::<Result<Vec<_>, _>>()?;

    let total = sum(&prices)?;
    let lowest = min(&prices)?;
    let highest = max(&prices)?;

    for code in ["usd", "eur"] {
        let expected = prices
            .iter()
            .map(|price| price.value(code))
            .sum::<Result<i64, _>>()?;

        assert_eq!(total.value(code)?, expected);

        for price in &prices {
            assert!(lowest.value(code)? <= price.value(code)?);
            assert!(price.value(code)? <= highest.value(code)?);
        }
    }

    Ok(())
}

#[test]
fn first_price_decides_currencies() -> TestResult {
    let first = Price::from_minor([("usd", 100)])?;
    let second = multi(200, 300)?;

    let total = sum([&first, &second])?;

    assert_eq!(total.currencies().count(), 1);
    assert_eq!(total.value("usd")?, 300);

    Ok(())
}
