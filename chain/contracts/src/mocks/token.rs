use std::collections::HashMap;

use types::asset::InterfaceId;
use types::errors::CallError;
use types::ids::Address;
use types::numeric::Amount;

use crate::asset::Asset;

use super::ProbeBehavior;

const BPS_DENOMINATOR: Amount = 10_000;

/// Fungible token with allowances and an optional burn-on-transfer fee.
#[derive(Debug, Clone, Default)]
pub struct MockToken {
    balances: HashMap<Address, Amount>,
    allowances: HashMap<(Address, Address), Amount>,
    total_supply: Amount,
    /// Fee burned from every transfer, in basis points
    fee_bps: u32,
    probe: ProbeBehavior,
    frozen: bool,
    /// Report `false` instead of moving funds
    report_failure: bool,
}

impl MockToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fee_bps(mut self, fee_bps: u32) -> Self {
        self.fee_bps = fee_bps;
        self
    }

    pub fn with_probe(mut self, probe: ProbeBehavior) -> Self {
        self.probe = probe;
        self
    }

    pub fn mint(&mut self, to: Address, amount: Amount) {
        *self.balances.entry(to).or_insert(0) += amount;
        self.total_supply += amount;
    }

    /// Set `spender`'s allowance over `owner`'s balance.
    pub fn approve(&mut self, owner: Address, spender: Address, amount: Amount) {
        self.allowances.insert((owner, spender), amount);
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> Amount {
        self.allowances.get(&(owner, spender)).copied().unwrap_or(0)
    }

    pub fn balance(&self, holder: Address) -> Amount {
        self.balances.get(&holder).copied().unwrap_or(0)
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    pub fn fee_bps(&self) -> u32 {
        self.fee_bps
    }

    /// Make every transfer revert.
    pub fn freeze(&mut self) {
        self.set_frozen(true);
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    /// Make every transfer return `false` without moving funds.
    pub fn set_report_failure(&mut self, report_failure: bool) {
        self.report_failure = report_failure;
    }

    fn move_funds(&mut self, from: Address, to: Address, amount: Amount) -> Result<(), CallError> {
        let balance = self.balance(from);
        if balance < amount {
            return Err(CallError::reverted("insufficient balance"));
        }
        let fee = amount * self.fee_bps as Amount / BPS_DENOMINATOR;
        self.balances.insert(from, balance - amount);
        *self.balances.entry(to).or_insert(0) += amount - fee;
        self.total_supply -= fee;
        Ok(())
    }
}

impl Asset for MockToken {
    fn supports_interface(&self, interface: InterfaceId) -> Result<bool, CallError> {
        self.probe.answer(interface)
    }

    fn balance_of(&self, holder: Address) -> Result<Amount, CallError> {
        Ok(self.balance(holder))
    }

    fn transfer(&mut self, caller: Address, to: Address, amount: Amount) -> Result<bool, CallError> {
        if self.frozen {
            return Err(CallError::reverted("token frozen"));
        }
        if self.report_failure {
            return Ok(false);
        }
        self.move_funds(caller, to, amount)?;
        Ok(true)
    }

    fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<bool, CallError> {
        if self.frozen {
            return Err(CallError::reverted("token frozen"));
        }
        if self.report_failure {
            return Ok(false);
        }
        let allowance = self.allowance(from, caller);
        if allowance < amount {
            return Err(CallError::reverted("insufficient allowance"));
        }
        self.move_funds(from, to, amount)?;
        self.allowances.insert((from, caller), allowance - amount);
        Ok(true)
    }
}
