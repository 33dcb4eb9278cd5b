use crate::errors::Error;
use crate::types::{DataKey, SaleConfig};
use soroban_sdk::{Address, Env};

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn config(env: &Env) -> Result<SaleConfig, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn set_config(env: &Env, config: &SaleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn total_raised(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalRaised)
        .unwrap_or(0)
}

pub fn set_total_raised(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::TotalRaised, &amount);
}

pub fn is_finalized(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Finalized)
        .unwrap_or(false)
}

pub fn set_finalized(env: &Env) {
    env.storage().instance().set(&DataKey::Finalized, &true);
}

pub fn credit(env: &Env, purchaser: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Credit(purchaser.clone()))
        .unwrap_or(0)
}

pub fn set_credit(env: &Env, purchaser: &Address, amount: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::Credit(purchaser.clone()), &amount);
}

pub fn holder(env: &Env, purchaser: &Address) -> Option<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Holder(purchaser.clone()))
}

pub fn set_holder(env: &Env, purchaser: &Address, holder: &Address) {
    env.storage()
        .persistent()
        .set(&DataKey::Holder(purchaser.clone()), holder);
}
