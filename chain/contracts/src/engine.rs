//! Engine: deposit, draw and resolve
//!
//! `pull` classifies an arbitrary asset, takes it into custody, requests
//! randomness and records the obligation. `fulfill`, called later by the
//! oracle, returns or forfeits the custody and clears the obligation.
//!
//! Both operations are atomic. The engine writes its own tables only after
//! every external call has succeeded, and rolls asset-side effects back
//! through the host checkpoint when a later step fails.

use tracing::{error, info, warn};
use types::asset::{AssetKind, InterfaceId};
use types::ids::{Address, RequestId};
use types::numeric::{Amount, ItemId, RandomWord};

use crate::asset::{AssetBook, ItemReceiver};
use crate::classifier;
use crate::config::EngineConfig;
use crate::custody::{self, CustodyReceiver};
use crate::errors::{ConfigError, FulfillError, PullError};
use crate::events::{ContractEvent, DrawResolved, Pulled};
use crate::ledger::{CustodyLedger, Obligation, RequestTracker};
use crate::oracle::RandomnessOracle;
use crate::resolver::{self, DrawResolution};
use crate::security::{CallContext, OracleGate};

/// What a successful `pull` committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullReceipt {
    pub request_id: RequestId,
    pub depositor: Address,
    pub asset: Address,
    pub kind: AssetKind,
    /// Quantity recorded in custody
    pub quantity: Amount,
    pub item_id: ItemId,
}

/// Probabilistic custody engine.
///
/// State is two keyed tables: depositor → obligation and
/// request id → depositor. Nothing else is durable; config is fixed at
/// construction and the event log is output.
#[derive(Debug)]
pub struct Engine {
    address: Address,
    config: EngineConfig,
    oracle_gate: OracleGate,
    ledger: CustodyLedger,
    tracker: RequestTracker,
    /// Emitted events log (append-only)
    events: Vec<ContractEvent>,
}

impl Engine {
    /// Create an engine deployed at `address`.
    pub fn new(address: Address, config: EngineConfig) -> Result<Self, ConfigError> {
        if address.is_null() {
            return Err(ConfigError::NullEngine);
        }
        config.validate()?;
        Ok(Self {
            address,
            oracle_gate: OracleGate::new(config.oracle),
            config,
            ledger: CustodyLedger::new(),
            tracker: RequestTracker::new(),
            events: Vec::new(),
        })
    }

    // ───────────────────────── Pull ─────────────────────────

    /// Deposit an asset and request a draw.
    ///
    /// `amount` must be positive for every kind; unique-id assets always
    /// record a quantity of 1. `item_id` is ignored for fungible assets.
    pub fn pull<B: AssetBook, O: RandomnessOracle>(
        &mut self,
        ctx: &CallContext,
        assets: &mut B,
        oracle: &mut O,
        asset: Address,
        amount: Amount,
        item_id: ItemId,
    ) -> Result<PullReceipt, PullError> {
        if let Err(err) = self.check_pull(ctx, asset, amount) {
            warn!(depositor = %ctx.sender, %asset, amount = %amount, error = %err, "pull rejected");
            return Err(err);
        }

        let depositor = ctx.sender;
        let checkpoint = assets.checkpoint();
        let receipt = match self.take_custody(assets, oracle, depositor, asset, amount, item_id) {
            Ok(receipt) => receipt,
            Err(err) => {
                assets.revert(checkpoint);
                warn!(%depositor, %asset, amount = %amount, error = %err, "pull aborted");
                return Err(err);
            }
        };

        let opened = self.ledger.open(
            depositor,
            Obligation {
                asset,
                quantity: receipt.quantity,
                item_id,
                kind: receipt.kind,
            },
        );
        let tracked = self.tracker.track(receipt.request_id, depositor);
        // check_pull and take_custody rule out both collisions
        debug_assert!(opened, "obligation already active for {depositor}");
        debug_assert!(tracked, "request {} already tracked", receipt.request_id);

        self.events.push(ContractEvent::Pulled(Pulled {
            depositor,
            request_id: receipt.request_id,
            asset,
            amount: receipt.quantity,
            item_id,
            kind: receipt.kind,
        }));
        info!(
            %depositor,
            request_id = %receipt.request_id,
            %asset,
            kind = %receipt.kind,
            quantity = %receipt.quantity,
            "custody taken, draw requested"
        );
        Ok(receipt)
    }

    /// Checks that must pass before any external call.
    fn check_pull(&self, ctx: &CallContext, asset: Address, amount: Amount) -> Result<(), PullError> {
        if !ctx.is_direct() {
            return Err(PullError::RelayedCaller {
                origin: ctx.origin,
                sender: ctx.sender,
            });
        }
        if asset.is_null() {
            return Err(PullError::InvalidInput {
                reason: "asset reference must not be null",
            });
        }
        if amount == 0 {
            return Err(PullError::InvalidInput {
                reason: "amount must be positive",
            });
        }
        if self.ledger.is_active(&ctx.sender) {
            return Err(PullError::AlreadyActive {
                depositor: ctx.sender,
            });
        }
        Ok(())
    }

    /// Classify, intake and request randomness. Touches no engine state.
    fn take_custody<B: AssetBook, O: RandomnessOracle>(
        &self,
        assets: &mut B,
        oracle: &mut O,
        depositor: Address,
        asset: Address,
        amount: Amount,
        item_id: ItemId,
    ) -> Result<PullReceipt, PullError> {
        let kind = classifier::classify(assets, asset);
        let quantity = custody::receive(
            assets,
            self.address,
            depositor,
            asset,
            kind,
            amount,
            item_id,
            self,
        )?;

        let request_id = oracle.request_random(self.address, &self.config.request)?;
        if self.tracker.contains(&request_id) {
            return Err(PullError::DuplicateRequest { request_id });
        }

        Ok(PullReceipt {
            request_id,
            depositor,
            asset,
            kind,
            quantity,
            item_id,
        })
    }

    // ───────────────────────── Fulfill ─────────────────────────

    /// Oracle callback: resolve the draw for `request_id`.
    ///
    /// A second call with the same id fails with `UnknownRequest`. A failed
    /// return transfer leaves the obligation active; it is not retried.
    pub fn fulfill<B: AssetBook>(
        &mut self,
        ctx: &CallContext,
        assets: &mut B,
        request_id: RequestId,
        random_values: &[RandomWord],
    ) -> Result<DrawResolution, FulfillError> {
        if !self.oracle_gate.is_oracle(&ctx.sender) {
            warn!(
                caller = %ctx.sender,
                oracle = %self.oracle_gate.oracle(),
                %request_id,
                "fulfill from non-oracle rejected"
            );
            return Err(FulfillError::NotOracle { caller: ctx.sender });
        }

        let resolution = resolver::resolve(
            &mut self.ledger,
            &mut self.tracker,
            assets,
            self.address,
            request_id,
            random_values,
        );

        match resolution {
            Ok(resolution) => {
                self.events.push(ContractEvent::DrawResolved(DrawResolved {
                    depositor: resolution.depositor,
                    request_id,
                    roll: resolution.roll,
                    outcome: resolution.outcome,
                }));
                info!(
                    depositor = %resolution.depositor,
                    %request_id,
                    roll = resolution.roll,
                    outcome = ?resolution.outcome,
                    "draw resolved"
                );
                Ok(resolution)
            }
            Err(err @ FulfillError::UnknownRequest { .. }) => {
                error!(%request_id, "oracle called back with unknown request id");
                Err(err)
            }
            Err(err) => {
                warn!(%request_id, error = %err, "draw resolution failed, obligation left active");
                Err(err)
            }
        }
    }

    // ───────────────────────── Queries ─────────────────────────

    pub fn address(&self) -> Address {
        self.address
    }

    /// Interfaces the engine advertises to callers probing it.
    pub fn supports_interface(&self, interface: InterfaceId) -> bool {
        interface == InterfaceId::INTROSPECTION || interface == InterfaceId::MULTI_TOKEN_RECEIVER
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Active obligation of `depositor`, if any.
    pub fn obligation_of(&self, depositor: &Address) -> Option<&Obligation> {
        self.ledger.get(depositor)
    }

    pub fn is_active(&self, depositor: &Address) -> bool {
        self.ledger.is_active(depositor)
    }

    /// Depositor waiting on `request_id`, if outstanding.
    pub fn depositor_of(&self, request_id: &RequestId) -> Option<Address> {
        self.tracker.depositor_of(request_id)
    }

    /// Total quantity of `asset` recorded across active obligations.
    pub fn held_quantity(&self, asset: &Address) -> Amount {
        self.ledger.held_quantity(asset)
    }

    pub fn held_item_quantity(&self, asset: &Address, item_id: ItemId) -> Amount {
        self.ledger.held_item_quantity(asset, item_id)
    }

    pub fn active_count(&self) -> usize {
        self.ledger.len()
    }

    pub fn outstanding_requests(&self) -> usize {
        self.tracker.len()
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[ContractEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<ContractEvent> {
        std::mem::take(&mut self.events)
    }
}

impl ItemReceiver for Engine {
    fn on_item_received(
        &self,
        operator: Address,
        from: Address,
        item_id: ItemId,
        amount: Amount,
        data: &[u8],
    ) -> [u8; 4] {
        CustodyReceiver.on_item_received(operator, from, item_id, amount, data)
    }

    fn on_batch_received(
        &self,
        operator: Address,
        from: Address,
        item_ids: &[ItemId],
        amounts: &[Amount],
        data: &[u8],
    ) -> [u8; 4] {
        CustodyReceiver.on_batch_received(operator, from, item_ids, amounts, data)
    }
}
