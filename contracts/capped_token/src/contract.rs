use crate::errors::Error;
use crate::storage;
use crate::types::{AllowanceValue, TokenMetadata};
use soroban_sdk::token::TokenInterface;
use soroban_sdk::{
    contract, contractimpl, contractmeta, panic_with_error, symbol_short, token, Address, Env,
    String,
};

contractmeta!(
    key = "Description",
    val = "Capped mintable token with role-restricted minting"
);

#[contract]
pub struct CappedToken;

fn check_nonnegative(env: &Env, amount: i128) {
    if amount < 0 {
        panic_with_error!(env, Error::InvalidAmount);
    }
}

fn read_admin(env: &Env) -> Address {
    match storage::get_admin(env) {
        Some(admin) => admin,
        None => panic_with_error!(env, Error::NotInitialized),
    }
}

fn spend_balance(env: &Env, addr: &Address, amount: i128) {
    let balance = storage::get_balance(env, addr);
    if balance < amount {
        panic_with_error!(env, Error::InsufficientBalance);
    }
    storage::set_balance(env, addr, balance - amount);
}

fn receive_balance(env: &Env, addr: &Address, amount: i128) {
    let balance = storage::get_balance(env, addr);
    storage::set_balance(env, addr, balance + amount);
}

fn spend_allowance(env: &Env, from: &Address, spender: &Address, amount: i128) {
    let allowance = storage::get_allowance(env, from, spender);
    if allowance < amount {
        panic_with_error!(env, Error::InsufficientAllowance);
    }
    // Keep the original expiration on the reduced entry.
    let expiration_ledger = storage::get_allowance_value(env, from, spender)
        .map(|v| v.expiration_ledger)
        .unwrap_or(0);
    storage::set_allowance(
        env,
        from,
        spender,
        &AllowanceValue {
            amount: allowance - amount,
            expiration_ledger,
        },
    );
}

fn burn_supply(env: &Env, from: &Address, amount: i128) {
    spend_balance(env, from, amount);
    storage::set_total_supply(env, storage::get_total_supply(env) - amount);
    env.events()
        .publish((symbol_short!("burn"), from.clone()), amount);
}

#[contractimpl]
impl CappedToken {
    pub fn initialize(
        env: Env,
        admin: Address,
        decimal: u32,
        name: String,
        symbol: String,
        cap: i128,
    ) {
        if storage::has_metadata(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        if cap <= 0 {
            panic_with_error!(&env, Error::InvalidCap);
        }

        storage::set_metadata(
            &env,
            &TokenMetadata {
                decimal,
                name,
                symbol,
            },
        );
        storage::set_admin(&env, &admin);
        storage::set_cap(&env, cap);
        storage::set_total_supply(&env, 0);
        // The admin mints by default; further minters are added explicitly.
        storage::set_minter(&env, &admin, true);

        env.events()
            .publish((symbol_short!("init"),), (admin, cap));
    }

    /// Mint new tokens, bounded by the fixed supply cap.
    pub fn mint(env: Env, minter: Address, to: Address, amount: i128) {
        minter.require_auth();
        check_nonnegative(&env, amount);

        if !storage::has_metadata(&env) {
            panic_with_error!(&env, Error::NotInitialized);
        }
        if !storage::is_minter(&env, &minter) {
            panic_with_error!(&env, Error::NotAuthorized);
        }

        let supply = storage::get_total_supply(&env);
        let new_supply = match supply.checked_add(amount) {
            Some(s) => s,
            None => panic_with_error!(&env, Error::CapExceeded),
        };
        if new_supply > storage::get_cap(&env) {
            panic_with_error!(&env, Error::CapExceeded);
        }

        storage::set_total_supply(&env, new_supply);
        receive_balance(&env, &to, amount);

        env.events()
            .publish((symbol_short!("mint"), minter, to), amount);
    }

    pub fn add_minter(env: Env, minter: Address) {
        let admin = read_admin(&env);
        admin.require_auth();
        storage::set_minter(&env, &minter, true);
        env.events().publish((symbol_short!("minter"),), (minter, true));
    }

    pub fn remove_minter(env: Env, minter: Address) {
        let admin = read_admin(&env);
        admin.require_auth();
        storage::set_minter(&env, &minter, false);
        env.events()
            .publish((symbol_short!("minter"),), (minter, false));
    }

    pub fn is_minter(env: Env, addr: Address) -> bool {
        storage::is_minter(&env, &addr)
    }

    pub fn total_supply(env: Env) -> i128 {
        storage::get_total_supply(&env)
    }

    pub fn cap(env: Env) -> i128 {
        storage::get_cap(&env)
    }
}

#[contractimpl]
impl token::Interface for CappedToken {
    fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        storage::get_allowance(&env, &from, &spender)
    }

    fn approve(env: Env, from: Address, spender: Address, amount: i128, expiration_ledger: u32) {
        from.require_auth();
        check_nonnegative(&env, amount);

        if amount > 0 && expiration_ledger < env.ledger().sequence() {
            panic_with_error!(&env, Error::InvalidExpiration);
        }

        storage::set_allowance(
            &env,
            &from,
            &spender,
            &AllowanceValue {
                amount,
                expiration_ledger,
            },
        );
        env.events().publish(
            (symbol_short!("approve"), from, spender),
            (amount, expiration_ledger),
        );
    }

    fn balance(env: Env, id: Address) -> i128 {
        storage::get_balance(&env, &id)
    }

    fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        check_nonnegative(&env, amount);
        spend_balance(&env, &from, amount);
        receive_balance(&env, &to, amount);
        env.events()
            .publish((symbol_short!("transfer"), from, to), amount);
    }

    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128) {
        spender.require_auth();
        check_nonnegative(&env, amount);
        spend_allowance(&env, &from, &spender, amount);
        spend_balance(&env, &from, amount);
        receive_balance(&env, &to, amount);
        env.events()
            .publish((symbol_short!("transfer"), from, to), amount);
    }

    fn burn(env: Env, from: Address, amount: i128) {
        from.require_auth();
        check_nonnegative(&env, amount);
        burn_supply(&env, &from, amount);
    }

    fn burn_from(env: Env, spender: Address, from: Address, amount: i128) {
        spender.require_auth();
        check_nonnegative(&env, amount);
        spend_allowance(&env, &from, &spender, amount);
        burn_supply(&env, &from, amount);
    }

    fn decimals(env: Env) -> u32 {
        match storage::get_metadata(&env) {
            Some(metadata) => metadata.decimal,
            None => panic_with_error!(&env, Error::NotInitialized),
        }
    }

    fn name(env: Env) -> String {
        match storage::get_metadata(&env) {
            Some(metadata) => metadata.name,
            None => panic_with_error!(&env, Error::NotInitialized),
        }
    }

    fn symbol(env: Env) -> String {
        match storage::get_metadata(&env) {
            Some(metadata) => metadata.symbol,
            None => panic_with_error!(&env, Error::NotInitialized),
        }
    }
}
