//! Integration tests for the finance domain

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{AgentId, Amount, BusinessId, DebtId, SettlementId, UserId};
use domain_finance::{
    Agent, AgentDebt, Business, CollectionType, DateRange, EntryKind, FinanceError,
    FinanceService, InMemoryStore, Settlement,
};

fn amount(value: Decimal) -> Amount {
    Amount::new(value).unwrap()
}

fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

/// Store seeded with one agent and one business, plus the service over it.
fn setup() -> (Arc<InMemoryStore>, FinanceService, Agent, Business) {
    let store = Arc::new(InMemoryStore::new());
    let agent = Agent::new("EMP-0042", UserId::new());
    let business = Business::new("Cedar Cafe");
    store.add_agent(agent.clone());
    store.add_business(business.clone());

    let service = FinanceService::new(store.clone());
    (store, service, agent, business)
}

fn fixture_debt(agent_id: AgentId, business: &Business, value: Decimal, at: DateTime<Utc>) -> AgentDebt {
    AgentDebt {
        id: DebtId::new_v7(),
        agent_id,
        business_id: business.id,
        business_name: business.name.clone(),
        amount: value,
        collection_type: CollectionType::Subscription,
        created_at: at,
    }
}

fn fixture_settlement(agent_id: AgentId, value: Decimal, at: DateTime<Utc>) -> Settlement {
    Settlement {
        id: SettlementId::new_v7(),
        agent_id,
        accountant_id: UserId::new(),
        amount: value,
        notes: None,
        created_at: at,
    }
}

// ============================================================================
// Debt recording
// ============================================================================

mod record_collection_tests {
    use super::*;

    #[tokio::test]
    async fn test_records_debt_with_business_name() {
        let (_, service, agent, business) = setup();

        let debt = service
            .record_collection(
                agent.id,
                business.id,
                amount(dec!(120.50)),
                CollectionType::Subscription,
            )
            .await
            .unwrap();

        assert_eq!(debt.agent_id, agent.id);
        assert_eq!(debt.business_id, business.id);
        assert_eq!(debt.business_name, "Cedar Cafe");
        assert_eq!(debt.amount, dec!(120.50));
        assert_eq!(debt.collection_type, CollectionType::Subscription);
    }

    #[tokio::test]
    async fn test_unknown_agent_writes_nothing() {
        let (store, service, _, business) = setup();

        let result = service
            .record_collection(
                AgentId::new(),
                business.id,
                amount(dec!(10.00)),
                CollectionType::AdPayment,
            )
            .await;

        assert!(matches!(result, Err(FinanceError::AgentNotFound(_))));
        assert_eq!(store.debt_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_business_writes_nothing() {
        let (store, service, agent, _) = setup();

        let result = service
            .record_collection(
                agent.id,
                BusinessId::new(),
                amount(dec!(10.00)),
                CollectionType::AdPayment,
            )
            .await;

        assert!(matches!(result, Err(FinanceError::BusinessNotFound(_))));
        assert_eq!(store.debt_count(), 0);
    }
}

// ============================================================================
// Settlement processing
// ============================================================================

mod process_settlement_tests {
    use super::*;

    #[tokio::test]
    async fn test_settlement_reduces_balance() {
        let (_, service, agent, business) = setup();
        let accountant = UserId::new();

        service
            .record_collection(agent.id, business.id, amount(dec!(100.00)), CollectionType::Subscription)
            .await
            .unwrap();

        let settlement = service
            .process_settlement(agent.id, accountant, amount(dec!(40.00)), Some("cash drop".into()))
            .await
            .unwrap();

        assert_eq!(settlement.accountant_id, accountant);
        assert_eq!(settlement.amount, dec!(40.00));
        assert_eq!(settlement.notes.as_deref(), Some("cash drop"));

        let summary = service.agent_debt(agent.id).await.unwrap();
        assert_eq!(summary.current_balance, dec!(60.00));
    }

    #[tokio::test]
    async fn test_exact_balance_settles_to_zero() {
        let (_, service, agent, business) = setup();

        service
            .record_collection(agent.id, business.id, amount(dec!(75.25)), CollectionType::AdPayment)
            .await
            .unwrap();

        service
            .process_settlement(agent.id, UserId::new(), amount(dec!(75.25)), None)
            .await
            .unwrap();

        let summary = service.agent_debt(agent.id).await.unwrap();
        assert_eq!(summary.current_balance, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_one_cent_over_is_rejected() {
        let (store, service, agent, business) = setup();

        service
            .record_collection(agent.id, business.id, amount(dec!(75.25)), CollectionType::AdPayment)
            .await
            .unwrap();

        let result = service
            .process_settlement(agent.id, UserId::new(), amount(dec!(75.26)), None)
            .await;

        match result {
            Err(FinanceError::SettlementExceedsBalance {
                requested,
                available,
            }) => {
                assert_eq!(requested, dec!(75.26));
                assert_eq!(available, dec!(75.25));
            }
            other => panic!("expected SettlementExceedsBalance, got {other:?}"),
        }
        assert_eq!(store.settlement_count(), 0);
    }

    #[tokio::test]
    async fn test_settling_with_no_debt_is_rejected() {
        let (_, service, agent, _) = setup();

        let result = service
            .process_settlement(agent.id, UserId::new(), amount(dec!(0.01)), None)
            .await;

        assert!(matches!(
            result,
            Err(FinanceError::SettlementExceedsBalance { .. })
        ));
    }

    #[tokio::test]
    async fn test_unknown_agent_writes_nothing() {
        let (store, service, _, _) = setup();

        let result = service
            .process_settlement(AgentId::new(), UserId::new(), amount(dec!(5.00)), None)
            .await;

        assert!(matches!(result, Err(FinanceError::AgentNotFound(_))));
        assert_eq!(store.settlement_count(), 0);
    }

    #[tokio::test]
    async fn test_balance_never_goes_negative_over_sequence() {
        let (_, service, agent, business) = setup();

        service
            .record_collection(agent.id, business.id, amount(dec!(50.00)), CollectionType::Subscription)
            .await
            .unwrap();
        service
            .process_settlement(agent.id, UserId::new(), amount(dec!(30.00)), None)
            .await
            .unwrap();
        service
            .record_collection(agent.id, business.id, amount(dec!(10.00)), CollectionType::AdPayment)
            .await
            .unwrap();

        // Balance is 30; anything above must fail, 30 must pass.
        assert!(service
            .process_settlement(agent.id, UserId::new(), amount(dec!(30.01)), None)
            .await
            .is_err());
        service
            .process_settlement(agent.id, UserId::new(), amount(dec!(30.00)), None)
            .await
            .unwrap();

        let summary = service.agent_debt(agent.id).await.unwrap();
        assert_eq!(summary.current_balance, Decimal::ZERO);
        assert!(summary.current_balance >= Decimal::ZERO);
    }
}

// ============================================================================
// Balance calculator
// ============================================================================

mod agent_debt_tests {
    use super::*;

    #[tokio::test]
    async fn test_summary_aggregates_both_tables() {
        let (_, service, agent, business) = setup();

        service
            .record_collection(agent.id, business.id, amount(dec!(100.00)), CollectionType::Subscription)
            .await
            .unwrap();
        service
            .record_collection(agent.id, business.id, amount(dec!(50.00)), CollectionType::AdPayment)
            .await
            .unwrap();
        service
            .process_settlement(agent.id, UserId::new(), amount(dec!(30.00)), None)
            .await
            .unwrap();

        let summary = service.agent_debt(agent.id).await.unwrap();
        assert_eq!(summary.total_debt, dec!(150.00));
        assert_eq!(summary.debt_count, 2);
        assert_eq!(summary.total_settlements, dec!(30.00));
        assert_eq!(summary.current_balance, dec!(120.00));
    }

    #[tokio::test]
    async fn test_agent_without_records_has_zero_summary() {
        let (_, service, agent, _) = setup();

        let summary = service.agent_debt(agent.id).await.unwrap();
        assert_eq!(summary.total_debt, Decimal::ZERO);
        assert_eq!(summary.debt_count, 0);
        assert_eq!(summary.current_balance, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_repeated_reads_are_identical() {
        let (_, service, agent, business) = setup();

        service
            .record_collection(agent.id, business.id, amount(dec!(42.00)), CollectionType::Subscription)
            .await
            .unwrap();

        let first = service.agent_debt(agent.id).await.unwrap();
        let second = service.agent_debt(agent.id).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_unknown_agent_is_not_found() {
        let (_, service, _, _) = setup();

        let result = service.agent_debt(AgentId::new()).await;
        assert!(matches!(result, Err(FinanceError::AgentNotFound(_))));
    }
}

// ============================================================================
// Ledger builder
// ============================================================================

mod agent_ledger_tests {
    use super::*;

    #[tokio::test]
    async fn test_running_balance_over_merged_history() {
        let (store, service, agent, business) = setup();

        store.push_debt(fixture_debt(agent.id, &business, dec!(100), ts(1)));
        store.push_settlement(fixture_settlement(agent.id, dec!(30), ts(2)));
        store.push_debt(fixture_debt(agent.id, &business, dec!(50), ts(3)));

        let ledger = service
            .agent_ledger(agent.id, DateRange::unbounded())
            .await
            .unwrap();

        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger[0].kind, EntryKind::Debt);
        assert_eq!(ledger[0].balance, dec!(100));
        assert_eq!(ledger[1].kind, EntryKind::Settlement);
        assert_eq!(ledger[1].balance, dec!(70));
        assert_eq!(ledger[2].kind, EntryKind::Debt);
        assert_eq!(ledger[2].balance, dec!(120));
    }

    #[tokio::test]
    async fn test_windowed_ledger_restarts_balance() {
        let (store, service, agent, business) = setup();

        store.push_debt(fixture_debt(agent.id, &business, dec!(100), ts(1)));
        store.push_settlement(fixture_settlement(agent.id, dec!(30), ts(2)));
        store.push_debt(fixture_debt(agent.id, &business, dec!(50), ts(3)));

        let ledger = service
            .agent_ledger(agent.id, DateRange::starting_at(ts(2)))
            .await
            .unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger[0].kind, EntryKind::Settlement);
        assert_eq!(ledger[0].balance, dec!(-30));
        assert_eq!(ledger[1].kind, EntryKind::Debt);
        assert_eq!(ledger[1].balance, dec!(20));
    }

    #[tokio::test]
    async fn test_range_bounds_are_inclusive_on_both_sides() {
        let (store, service, agent, business) = setup();

        store.push_debt(fixture_debt(agent.id, &business, dec!(10), ts(1)));
        store.push_debt(fixture_debt(agent.id, &business, dec!(20), ts(2)));
        store.push_debt(fixture_debt(agent.id, &business, dec!(30), ts(3)));

        let ledger = service
            .agent_ledger(agent.id, DateRange::between(ts(1), ts(2)))
            .await
            .unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger[1].balance, dec!(30));
    }

    #[tokio::test]
    async fn test_ledger_ignores_other_agents() {
        let (store, service, agent, business) = setup();
        let other = Agent::new("EMP-0099", UserId::new());
        store.add_agent(other.clone());

        store.push_debt(fixture_debt(agent.id, &business, dec!(10), ts(1)));
        store.push_debt(fixture_debt(other.id, &business, dec!(99), ts(1)));

        let ledger = service
            .agent_ledger(agent.id, DateRange::unbounded())
            .await
            .unwrap();

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].amount, dec!(10));
    }

    #[tokio::test]
    async fn test_debt_entries_carry_business_name() {
        let (store, service, agent, business) = setup();
        store.push_debt(fixture_debt(agent.id, &business, dec!(10), ts(1)));

        let ledger = service
            .agent_ledger(agent.id, DateRange::unbounded())
            .await
            .unwrap();

        assert_eq!(ledger[0].business_name.as_deref(), Some("Cedar Cafe"));
        assert_eq!(ledger[0].collection_type, Some(CollectionType::Subscription));
        assert!(ledger[0].accountant_id.is_none());
    }

    #[tokio::test]
    async fn test_unknown_agent_is_not_found() {
        let (_, service, _, _) = setup();

        let result = service.agent_ledger(AgentId::new(), DateRange::unbounded()).await;
        assert!(matches!(result, Err(FinanceError::AgentNotFound(_))));
    }
}

// ============================================================================
// Concurrency
// ============================================================================

mod concurrency_tests {
    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_full_balance_settlements_admit_one_winner() {
        let (store, service, agent, business) = setup();

        service
            .record_collection(agent.id, business.id, amount(dec!(500.00)), CollectionType::Subscription)
            .await
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let service = service.clone();
            let agent_id = agent.id;
            handles.push(tokio::spawn(async move {
                service
                    .process_settlement(agent_id, UserId::new(), amount(dec!(500.00)), None)
                    .await
            }));
        }

        let mut successes = 0;
        let mut rejections = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(FinanceError::SettlementExceedsBalance { .. }) => rejections += 1,
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(rejections, 7);
        assert_eq!(store.settlement_count(), 1);

        let summary = service.agent_debt(agent.id).await.unwrap();
        assert_eq!(summary.current_balance, Decimal::ZERO);
    }
}
