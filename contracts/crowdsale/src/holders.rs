use soroban_sdk::{contractclient, Address, Env};

/// The slice of the vesting contract's surface the engine drives: lazy holder
/// creation on first purchase and top-ups on every purchase.
#[contractclient(name = "VestingClient")]
pub trait VestingHolders {
    fn create_holder(
        env: Env,
        beneficiary: Address,
        start_time: u64,
        cliff_duration: u64,
        duration: u64,
    );

    fn credit(env: Env, beneficiary: Address, amount: i128);
}
