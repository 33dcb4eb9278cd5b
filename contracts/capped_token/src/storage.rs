use crate::types::{AllowanceKey, AllowanceValue, DataKey, TokenMetadata};
use soroban_sdk::{Address, Env};

pub fn has_metadata(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Metadata)
}

pub fn get_metadata(env: &Env) -> Option<TokenMetadata> {
    env.storage().instance().get(&DataKey::Metadata)
}

pub fn set_metadata(env: &Env, metadata: &TokenMetadata) {
    env.storage().instance().set(&DataKey::Metadata, metadata);
}

pub fn get_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
}

pub fn get_cap(env: &Env) -> i128 {
    env.storage().instance().get(&DataKey::Cap).unwrap_or(0)
}

pub fn set_cap(env: &Env, cap: i128) {
    env.storage().instance().set(&DataKey::Cap, &cap);
}

pub fn get_total_supply(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

pub fn set_total_supply(env: &Env, supply: i128) {
    env.storage().instance().set(&DataKey::TotalSupply, &supply);
}

pub fn is_minter(env: &Env, addr: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Minter(addr.clone()))
        .unwrap_or(false)
}

pub fn set_minter(env: &Env, addr: &Address, allowed: bool) {
    if allowed {
        env.storage()
            .persistent()
            .set(&DataKey::Minter(addr.clone()), &true);
    } else {
        env.storage()
            .persistent()
            .remove(&DataKey::Minter(addr.clone()));
    }
}

pub fn get_balance(env: &Env, addr: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(addr.clone()))
        .unwrap_or(0)
}

pub fn set_balance(env: &Env, addr: &Address, amount: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::Balance(addr.clone()), &amount);
}

// Allowances live in temporary storage; an entry past its expiration ledger
// reads as zero even if the ledger has not evicted it yet.
pub fn get_allowance(env: &Env, from: &Address, spender: &Address) -> i128 {
    let key = DataKey::Allowance(AllowanceKey {
        from: from.clone(),
        spender: spender.clone(),
    });
    match env.storage().temporary().get::<_, AllowanceValue>(&key) {
        Some(value) if value.expiration_ledger >= env.ledger().sequence() => value.amount,
        _ => 0,
    }
}

pub fn set_allowance(env: &Env, from: &Address, spender: &Address, value: &AllowanceValue) {
    let key = DataKey::Allowance(AllowanceKey {
        from: from.clone(),
        spender: spender.clone(),
    });
    env.storage().temporary().set(&key, value);
}

pub fn get_allowance_value(
    env: &Env,
    from: &Address,
    spender: &Address,
) -> Option<AllowanceValue> {
    let key = DataKey::Allowance(AllowanceKey {
        from: from.clone(),
        spender: spender.clone(),
    });
    env.storage().temporary().get(&key)
}
