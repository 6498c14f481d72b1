//! Security Hardening Tests
//!
//! Adversarial testing of the engine boundary:
//! - Relayed callers
//! - Oracle impersonation
//! - Replayed and unknown callbacks
//! - Hostile and misbehaving assets
//! - Failed payouts
//! - Fuzz testing (proptest)
//! - Upgrade path (ABI freeze)

use custody_draw::errors::{FulfillError, IntakeError, OracleError, PullError};
use custody_draw::mocks::{MockChain, MockMultiToken, MockNft, MockOracle, MockToken, ProbeBehavior};
use custody_draw::{CallContext, DrawOutcome, Engine, EngineConfig, CONTRACT_ABI_VERSION};
use types::asset::AssetKind;
use types::errors::CallError;
use types::ids::{Address, RequestId};
use types::numeric::{Amount, RandomWord};

// ═══════════════════════════════════════════════════════════════════
// Caller Identity Tests
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_relayed_pull_rejected_before_any_call() {
    let mut h = Harness::new();
    let alice = Address::new();
    let relay = Address::new();
    let token = h.funded_token(relay, 500);

    let result = h.engine.pull(
        &CallContext::relayed(alice, relay),
        &mut h.chain,
        &mut h.oracle,
        token,
        500,
        0,
    );

    assert!(matches!(result, Err(PullError::RelayedCaller { .. })));
    assert_eq!(h.chain.token(&token).unwrap().balance(relay), 500);
    assert_eq!(h.oracle.pending_count(), 0, "No randomness may be requested");
    assert!(h.engine.events().is_empty());
}

#[test]
fn test_fulfill_by_depositor_rejected() {
    let mut h = Harness::new();
    let alice = Address::new();
    let token = h.funded_token(alice, 100);
    let request_id = h.pull(alice, token, 100).unwrap();

    // The depositor tries to resolve their own draw with a winning word.
    let result = h.engine.fulfill(
        &CallContext::direct(alice),
        &mut h.chain,
        request_id,
        &[RandomWord::from_u64(1)],
    );

    assert_eq!(result, Err(FulfillError::NotOracle { caller: alice }));
    assert!(h.engine.is_active(&alice));
    assert_eq!(h.engine.depositor_of(&request_id), Some(alice));
}

#[test]
fn test_fulfill_by_null_caller_rejected() {
    let mut h = Harness::new();
    let result = h.engine.fulfill(
        &CallContext::direct(Address::NULL),
        &mut h.chain,
        RequestId::new(1),
        &[RandomWord::from_u64(1)],
    );
    assert!(matches!(result, Err(FulfillError::NotOracle { .. })));
}

#[test]
fn test_randomness_requested_by_engine_with_configured_parameters() {
    let mut h = Harness::new();
    let alice = Address::new();
    let token = h.funded_token(alice, 100);
    let request_id = h.pull(alice, token, 100).unwrap();

    let (requester, request) = h.oracle.pending_request(&request_id).unwrap();
    assert_eq!(*requester, h.engine.address());
    assert_eq!(request, &h.engine.config().request);
}

// ═══════════════════════════════════════════════════════════════════
// Single-Flight Tests
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_second_pull_while_active_rejected() {
    let mut h = Harness::new();
    let alice = Address::new();
    let token = h.funded_token(alice, 1000);
    let nft = h.owned_nft(alice, 3);

    h.pull(alice, token, 400).unwrap();
    let err = h.pull_item(alice, nft, 1, 3).unwrap_err();

    assert_eq!(err, PullError::AlreadyActive { depositor: alice });
    assert_eq!(h.chain.nft(&nft).unwrap().owner(3), Some(alice));
    assert_eq!(h.engine.active_count(), 1);
    assert_eq!(h.oracle.pending_count(), 1);
}

#[test]
fn test_stuck_obligation_blocks_depositor() {
    let mut h = Harness::new();
    let alice = Address::new();
    let token = h.funded_token(alice, 1000);
    let request_id = h.pull(alice, token, 1000).unwrap();

    h.chain.token_mut(&token).unwrap().freeze();
    let err = h.resolve(request_id, 1).unwrap_err();
    assert!(matches!(err, FulfillError::Payout { .. }));

    // The obligation stays active and no retry path exists.
    h.chain.token_mut(&token).unwrap().set_frozen(false);
    h.chain.token_mut(&token).unwrap().mint(alice, 10);
    h.chain.token_mut(&token).unwrap().approve(alice, h.engine.address(), 10);
    assert_eq!(
        h.pull(alice, token, 10),
        Err(PullError::AlreadyActive { depositor: alice })
    );
}

// ═══════════════════════════════════════════════════════════════════
// Exactly-Once Resolution Tests
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_replayed_callback_rejected() {
    let mut h = Harness::new();
    let alice = Address::new();
    let token = h.funded_token(alice, 1000);
    let request_id = h.pull(alice, token, 1000).unwrap();

    h.resolve(request_id, 2).unwrap();
    let replay = h.resolve(request_id, 2);

    assert_eq!(replay, Err(FulfillError::UnknownRequest { request_id }));
    assert_eq!(h.chain.token(&token).unwrap().balance(alice), 1000);
    assert_eq!(h.engine.events().len(), 2, "Pulled and one DrawResolved");
}

#[test]
fn test_replay_after_forfeit_cannot_reclaim() {
    let mut h = Harness::new();
    let alice = Address::new();
    let token = h.funded_token(alice, 1000);
    let request_id = h.pull(alice, token, 1000).unwrap();

    h.resolve(request_id, 6).unwrap();
    assert!(h.resolve(request_id, 1).is_err());
    assert_eq!(h.chain.token(&token).unwrap().balance(h.engine.address()), 1000);
    assert_eq!(h.chain.token(&token).unwrap().balance(alice), 0);
}

#[test]
fn test_callback_for_never_issued_id() {
    let mut h = Harness::new();
    let result = h.resolve(RequestId::new(999), 1);
    assert_eq!(
        result,
        Err(FulfillError::UnknownRequest {
            request_id: RequestId::new(999)
        })
    );
}

#[test]
fn test_empty_random_values_leave_request_outstanding() {
    let mut h = Harness::new();
    let alice = Address::new();
    let token = h.funded_token(alice, 10);
    let request_id = h.pull(alice, token, 10).unwrap();

    let oracle = h.oracle.address();
    let result = h
        .engine
        .fulfill(&CallContext::direct(oracle), &mut h.chain, request_id, &[]);
    assert_eq!(result, Err(FulfillError::NoRandomValues { request_id }));

    // A later well-formed callback still resolves it.
    assert!(h.resolve(request_id, 4).is_ok());
}

#[test]
fn test_extra_random_values_ignored() {
    let mut h = Harness::new();
    let alice = Address::new();
    let token = h.funded_token(alice, 10);
    let request_id = h.pull(alice, token, 10).unwrap();

    let oracle = h.oracle.address();
    let words = [RandomWord::from_u64(12), RandomWord::from_u64(1)];
    let resolution = h
        .engine
        .fulfill(&CallContext::direct(oracle), &mut h.chain, request_id, &words)
        .unwrap();
    assert_eq!(resolution.outcome, DrawOutcome::Forfeited);
}

// ═══════════════════════════════════════════════════════════════════
// Hostile Asset Tests
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_reverting_probe_falls_back_to_fungible() {
    let mut h = Harness::new();
    let alice = Address::new();
    let mut token = MockToken::new().with_probe(ProbeBehavior::Reverts);
    token.mint(alice, 100);
    token.approve(alice, h.engine.address(), 100);
    let token = h.chain.deploy_token(token);

    let request_id = h.pull(alice, token, 100).unwrap();
    assert_eq!(h.engine.obligation_of(&alice).unwrap().kind, AssetKind::Fungible);
    assert_eq!(h.engine.depositor_of(&request_id), Some(alice));
}

#[test]
fn test_token_lying_about_interfaces_cannot_be_pulled() {
    let mut h = Harness::new();
    let alice = Address::new();
    let mut token = MockToken::new().with_probe(ProbeBehavior::Answers(true));
    token.mint(alice, 100);
    token.approve(alice, h.engine.address(), 100);
    let token = h.chain.deploy_token(token);

    let err = h.pull(alice, token, 100).unwrap_err();
    assert!(matches!(
        err,
        PullError::Intake(IntakeError::Call(CallError::NotImplemented { .. }))
    ));
    assert_eq!(h.chain.token(&token).unwrap().balance(alice), 100);
    assert!(!h.engine.is_active(&alice));
}

#[test]
fn test_token_reporting_false_rejected() {
    let mut h = Harness::new();
    let alice = Address::new();
    let token = h.funded_token(alice, 100);
    h.chain.token_mut(&token).unwrap().set_report_failure(true);

    assert_eq!(
        h.pull(alice, token, 100),
        Err(PullError::Intake(IntakeError::TransferRejected))
    );
}

#[test]
fn test_full_fee_token_records_nothing() {
    let mut h = Harness::new();
    let alice = Address::new();
    let mut token = MockToken::new().with_fee_bps(10_000);
    token.mint(alice, 100);
    token.approve(alice, h.engine.address(), 100);
    let token = h.chain.deploy_token(token);

    let err = h.pull(alice, token, 100).unwrap_err();
    assert!(matches!(
        err,
        PullError::Intake(IntakeError::NothingReceived { .. })
    ));
    assert_eq!(h.chain.token(&token).unwrap().balance(alice), 100, "Fee burn reverted");
    assert_eq!(h.oracle.pending_count(), 0);
}

#[test]
fn test_phantom_nft_transfer_detected() {
    let mut h = Harness::new();
    let alice = Address::new();
    let mut nft = MockNft::new().with_phantom_transfers();
    nft.mint(alice, 8);
    nft.set_approval_for_all(alice, h.engine.address(), true);
    let nft = h.chain.deploy_nft(nft);

    let err = h.pull_item(alice, nft, 1, 8).unwrap_err();
    assert_eq!(
        err,
        PullError::Intake(IntakeError::OwnershipNotReceived { item_id: 8 })
    );
}

#[test]
fn test_phantom_multi_token_transfer_detected() {
    let mut h = Harness::new();
    let alice = Address::new();
    let mut multi = MockMultiToken::new().with_phantom_transfers();
    multi.mint(alice, 3, 10);
    multi.set_approval_for_all(alice, h.engine.address(), true);
    let multi = h.chain.deploy_multi(multi);

    let err = h.pull_item(alice, multi, 10, 3).unwrap_err();
    assert_eq!(
        err,
        PullError::Intake(IntakeError::ItemsNotReceived { item_id: 3, expected: 10, received: 0 })
    );
    assert!(!h.engine.is_active(&alice));
    assert_eq!(h.engine.held_item_quantity(&multi, 3), 0);
    assert_eq!(h.engine.outstanding_requests(), 0);
    assert_eq!(h.chain.multi(&multi).unwrap().balance(alice, 3), 10);
}

#[test]
fn test_pull_of_someone_elses_item_rejected() {
    let mut h = Harness::new();
    let alice = Address::new();
    let mallory = Address::new();
    let nft = h.owned_nft(alice, 1);

    let err = h.pull_item(mallory, nft, 1, 1).unwrap_err();
    assert!(matches!(err, PullError::Intake(IntakeError::Call(_))));
    assert_eq!(h.chain.nft(&nft).unwrap().owner(1), Some(alice));
}

#[test]
fn test_multi_token_over_balance_rejected() {
    let mut h = Harness::new();
    let alice = Address::new();
    let multi = h.owned_multi(alice, 4, 10);

    let err = h.pull_item(alice, multi, 11, 4).unwrap_err();
    assert!(matches!(err, PullError::Intake(IntakeError::Call(_))));
    assert_eq!(h.chain.multi(&multi).unwrap().balance(alice, 4), 10);
}

// ═══════════════════════════════════════════════════════════════════
// Atomicity Tests
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_oracle_unavailable_reverts_nft_intake() {
    let mut h = Harness::new();
    let alice = Address::new();
    let nft = h.owned_nft(alice, 5);
    h.oracle.set_unavailable(true);

    let err = h.pull_item(alice, nft, 1, 5).unwrap_err();
    assert_eq!(err, PullError::Oracle(OracleError::Unavailable));
    assert_eq!(h.chain.nft(&nft).unwrap().owner(5), Some(alice));
    assert!(h.engine.events().is_empty());
}

#[test]
fn test_oracle_rejection_reverts_multi_intake() {
    let mut h = Harness::new();
    let alice = Address::new();
    let multi = h.owned_multi(alice, 2, 50);
    h.oracle.reject_next();

    assert!(h.pull_item(alice, multi, 20, 2).is_err());
    assert_eq!(h.chain.multi(&multi).unwrap().balance(alice, 2), 50);
    assert_eq!(h.chain.multi(&multi).unwrap().balance(h.engine.address(), 2), 0);
}

#[test]
fn test_failed_payout_leaves_custody_intact() {
    let mut h = Harness::new();
    let alice = Address::new();
    let multi = h.owned_multi(alice, 2, 50);
    let request_id = h.pull_item(alice, multi, 20, 2).unwrap();
    h.chain.multi_mut(&multi).unwrap().freeze();

    let err = h.resolve(request_id, 3).unwrap_err();
    assert!(matches!(err, FulfillError::Payout { depositor, .. } if depositor == alice));
    assert_eq!(h.chain.multi(&multi).unwrap().balance(h.engine.address(), 2), 20);
    assert_eq!(h.engine.held_item_quantity(&multi, 2), 20);
    assert_eq!(h.engine.depositor_of(&request_id), Some(alice));
}

// ═══════════════════════════════════════════════════════════════════
// Test Upgrade Path (ABI Freeze)
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_contract_abi_version_frozen() {
    assert_eq!(CONTRACT_ABI_VERSION, "1.0.0");
}

// ═══════════════════════════════════════════════════════════════════
// Fuzz Tests (Proptest)
// ═══════════════════════════════════════════════════════════════════

mod fuzz {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for deposit amounts
    fn deposit_amount() -> impl Strategy<Value = Amount> {
        1u128..=1_000_000_000u128
    }

    proptest! {
        /// Invariant: every unit ends up either back with its depositor or
        /// in engine custody, never anywhere else.
        #[test]
        fn fuzz_conservation(
            draws in prop::collection::vec((deposit_amount(), any::<u64>()), 1..20),
        ) {
            let mut h = Harness::new();
            let mut token = MockToken::new();
            let depositors: Vec<Address> = draws.iter().map(|_| Address::new()).collect();
            for (who, (amount, _)) in depositors.iter().zip(&draws) {
                token.mint(*who, *amount);
                token.approve(*who, h.engine.address(), *amount);
            }
            let asset = h.chain.deploy_token(token);

            let mut request_ids = Vec::new();
            for (who, (amount, _)) in depositors.iter().zip(&draws) {
                request_ids.push(h.pull(*who, asset, *amount).unwrap());
            }

            let mut forfeited: Amount = 0;
            for (request_id, (amount, value)) in request_ids.iter().zip(&draws).rev() {
                let resolution = h.resolve(*request_id, *value).unwrap();
                if resolution.outcome == DrawOutcome::Forfeited {
                    forfeited += amount;
                }
            }

            let token = h.chain.token(&asset).unwrap();
            prop_assert_eq!(token.balance(h.engine.address()), forfeited);
            for (who, (amount, value)) in depositors.iter().zip(&draws) {
                let expected = if value % 6 == 0 { 0 } else { *amount };
                prop_assert_eq!(token.balance(*who), expected);
            }
            prop_assert_eq!(h.engine.active_count(), 0);
            prop_assert_eq!(h.engine.held_quantity(&asset), 0);
        }

        /// Invariant: a depositor never holds two obligations, and every
        /// active obligation has exactly one outstanding request.
        #[test]
        fn fuzz_single_flight(
            ops in prop::collection::vec((0usize..4, any::<bool>(), 1u128..100), 1..40),
        ) {
            let mut h = Harness::new();
            let depositors: Vec<Address> = (0..4).map(|_| Address::new()).collect();
            let mut token = MockToken::new();
            for who in &depositors {
                token.mint(*who, 1_000_000);
                token.approve(*who, h.engine.address(), 1_000_000);
            }
            let token = h.chain.deploy_token(token);

            for (index, resolve, amount) in ops {
                let who = depositors[index];
                if resolve {
                    let pending = h.oracle.pending_ids();
                    if let Some(request_id) = pending.first() {
                        h.resolve(*request_id, amount as u64).unwrap();
                    }
                } else {
                    let was_active = h.engine.is_active(&who);
                    let result = h.pull(who, token, amount);
                    prop_assert_eq!(result.is_err(), was_active);
                }
                prop_assert_eq!(h.engine.active_count(), h.engine.outstanding_requests());
                prop_assert_eq!(h.engine.active_count(), h.oracle.pending_count());
            }
        }

        /// Invariant: each request id resolves at most once, whatever words
        /// are replayed afterwards.
        #[test]
        fn fuzz_exactly_once(first in any::<u64>(), replays in prop::collection::vec(any::<u64>(), 1..5)) {
            let mut h = Harness::new();
            let alice = Address::new();
            let token = h.funded_token(alice, 1000);
            let request_id = h.pull(alice, token, 1000).unwrap();

            prop_assert!(h.resolve(request_id, first).is_ok());
            let after_first = h.chain.token(&token).unwrap().balance(alice);
            for value in replays {
                prop_assert_eq!(
                    h.resolve(request_id, value),
                    Err(FulfillError::UnknownRequest { request_id })
                );
            }
            prop_assert_eq!(h.chain.token(&token).unwrap().balance(alice), after_first);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════

struct Harness {
    chain: MockChain,
    oracle: MockOracle,
    engine: Engine,
}

impl Harness {
    fn new() -> Self {
        let oracle = MockOracle::new();
        let engine = Engine::new(Address::new(), EngineConfig::new(oracle.address())).unwrap();
        Self {
            chain: MockChain::new(),
            oracle,
            engine,
        }
    }

    fn funded_token(&mut self, holder: Address, amount: Amount) -> Address {
        let mut token = MockToken::new();
        token.mint(holder, amount);
        token.approve(holder, self.engine.address(), amount);
        self.chain.deploy_token(token)
    }

    fn owned_nft(&mut self, holder: Address, item_id: u128) -> Address {
        let mut nft = MockNft::new();
        nft.mint(holder, item_id);
        nft.set_approval_for_all(holder, self.engine.address(), true);
        self.chain.deploy_nft(nft)
    }

    fn owned_multi(&mut self, holder: Address, item_id: u128, amount: Amount) -> Address {
        let mut multi = MockMultiToken::new();
        multi.mint(holder, item_id, amount);
        multi.set_approval_for_all(holder, self.engine.address(), true);
        self.chain.deploy_multi(multi)
    }

    fn pull(&mut self, who: Address, asset: Address, amount: Amount) -> Result<RequestId, PullError> {
        self.pull_item(who, asset, amount, 0)
    }

    fn pull_item(
        &mut self,
        who: Address,
        asset: Address,
        amount: Amount,
        item_id: u128,
    ) -> Result<RequestId, PullError> {
        self.engine
            .pull(
                &CallContext::direct(who),
                &mut self.chain,
                &mut self.oracle,
                asset,
                amount,
                item_id,
            )
            .map(|receipt| receipt.request_id)
    }

    fn resolve(
        &mut self,
        request_id: RequestId,
        value: u64,
    ) -> Result<custody_draw::DrawResolution, FulfillError> {
        self.oracle.fulfill(
            &mut self.engine,
            &mut self.chain,
            request_id,
            &[RandomWord::from_u64(value)],
        )
    }
}
