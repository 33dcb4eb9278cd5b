use soroban_sdk::{contracttype, Address};

/// Immutable sale parameters, fixed at initialization.
#[derive(Clone)]
#[contracttype]
pub struct SaleConfig {
    /// Token units delivered per payment unit.
    pub rate: i128,
    pub opening_time: u64,
    pub closing_time: u64,
    /// Destination for accepted payments.
    pub wallet: Address,
    /// Asset purchases are paid in.
    pub payment_token: Address,
    /// Asset being sold.
    pub token: Address,
    /// Holder of the supply the sale draws from, via allowance.
    pub token_wallet: Address,
    /// Vesting holder contract purchases are credited into.
    pub vesting: Address,
    pub vest_cliff_duration: u64,
    pub vest_duration: u64,
}

#[contracttype]
pub enum DataKey {
    Config,
    TotalRaised,
    Finalized,
    /// Cumulative tokens credited per purchaser, for observability only.
    Credit(Address),
    /// Purchaser -> vesting holder identity, set at most once.
    Holder(Address),
}
