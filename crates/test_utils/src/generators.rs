//! Property-based test data generators

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{Amount, CURRENCY_SCALE};
use domain_finance::CollectionType;

/// Strategy producing valid monetary amounts between one cent and ten million
pub fn amount_strategy() -> impl Strategy<Value = Amount> {
    (1i64..1_000_000_000i64).prop_map(|minor| {
        Amount::new(Decimal::new(minor, CURRENCY_SCALE)).expect("cent values are valid amounts")
    })
}

/// Strategy producing raw cent-precision decimals, including invalid ones
pub fn raw_decimal_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000i64..1_000_000_000i64, 0u32..4u32)
        .prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

/// Strategy producing either collection type
pub fn collection_type_strategy() -> impl Strategy<Value = CollectionType> {
    prop_oneof![
        Just(CollectionType::Subscription),
        Just(CollectionType::AdPayment),
    ]
}
