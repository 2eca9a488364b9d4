//! Pre-built test data for common entities

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Amount, UserId};
use domain_finance::{Agent, Business, InMemoryStore};

/// Deterministic timestamps for ledger ordering tests
pub struct TimeFixtures;

impl TimeFixtures {
    /// A fixed base instant (2024-03-01T00:00:00Z)
    pub fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
    }

    /// `base` shifted forward by whole seconds
    pub fn at(secs: i64) -> DateTime<Utc> {
        Self::base() + chrono::Duration::seconds(secs)
    }
}

/// Well-known monetary values
pub struct AmountFixtures;

impl AmountFixtures {
    pub fn subscription_fee() -> Amount {
        Amount::new(dec!(120.00)).unwrap()
    }

    pub fn ad_fee() -> Amount {
        Amount::new(dec!(45.50)).unwrap()
    }

    pub fn one_cent() -> Decimal {
        dec!(0.01)
    }
}

/// An in-memory store seeded with one agent and one business
///
/// Most scenario tests need exactly this: a valid agent to collect and a
/// valid business to collect from.
pub fn seeded_store() -> (Arc<InMemoryStore>, Agent, Business) {
    let store = Arc::new(InMemoryStore::new());
    let agent = Agent::new("EMP-0042", UserId::new());
    let business = Business::new("Cedar Cafe");
    store.add_agent(agent.clone());
    store.add_business(business.clone());
    (store, agent, business)
}
