use crate::errors::Error;
use crate::holders::VestingClient;
use crate::storage;
use crate::types::SaleConfig;
use soroban_sdk::{contract, contractimpl, contractmeta, token, Address, Env};

// Metadata that is added on to every WASM custom section
contractmeta!(
    key = "Description",
    val = "Time-windowed token sale drawing on a supply-wallet allowance, with per-purchaser vesting"
);

#[contract]
pub struct Crowdsale;

fn now(env: &Env) -> u64 {
    env.ledger().timestamp()
}

fn window_open(config: &SaleConfig, t: u64) -> bool {
    t >= config.opening_time && t <= config.closing_time
}

fn live_allowance(env: &Env, config: &SaleConfig) -> i128 {
    token::Client::new(env, &config.token)
        .allowance(&config.token_wallet, &env.current_contract_address())
}

fn process_purchase(
    env: &Env,
    purchaser: Address,
    beneficiary: Address,
    amount: i128,
) -> Result<i128, Error> {
    purchaser.require_auth();

    let config = storage::config(env)?;
    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }
    if !window_open(&config, now(env)) {
        return Err(Error::SaleNotOpen);
    }

    let tokens = amount.checked_mul(config.rate).ok_or(Error::Overflow)?;

    // The allowance is the single shared counter every purchase contends
    // for; surface exhaustion explicitly instead of trapping inside the
    // token contract.
    if live_allowance(env, &config) < tokens {
        return Err(Error::InsufficientAllowance);
    }

    // Lazy holder creation: one per purchaser, reused on repeat buys.
    let vesting = VestingClient::new(env, &config.vesting);
    if storage::holder(env, &purchaser).is_none() {
        vesting.create_holder(
            &purchaser,
            &now(env),
            &config.vest_cliff_duration,
            &config.vest_duration,
        );
        storage::set_holder(env, &purchaser, &config.vesting);
    }

    // Custody: draw on the token wallet's allowance into the holder.
    token::Client::new(env, &config.token).transfer_from(
        &env.current_contract_address(),
        &config.token_wallet,
        &config.vesting,
        &tokens,
    );
    vesting.credit(&purchaser, &tokens);

    let raised = storage::total_raised(env)
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    storage::set_total_raised(env, raised);
    let credit = storage::credit(env, &purchaser)
        .checked_add(tokens)
        .ok_or(Error::Overflow)?;
    storage::set_credit(env, &purchaser, credit);

    // Forward the payment. If this traps, the substrate reverts the whole
    // purchase, token movement and bookkeeping included.
    token::Client::new(env, &config.payment_token).transfer(
        &purchaser,
        &config.wallet,
        &amount,
    );

    env.events().publish(
        ("tokens_purchased",),
        (purchaser, beneficiary, amount, tokens),
    );
    Ok(tokens)
}

#[contractimpl]
impl Crowdsale {
    /// Fix the sale parameters. All of them are immutable afterwards; the
    /// only state the sale mutates later is purchase bookkeeping and the
    /// one-shot finalized flag.
    pub fn initialize(
        env: Env,
        opening_time: u64,
        closing_time: u64,
        rate: i128,
        wallet: Address,
        payment_token: Address,
        token: Address,
        token_wallet: Address,
        vesting: Address,
        vest_cliff_duration: u64,
        vest_duration: u64,
    ) -> Result<(), Error> {
        if storage::has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }
        if rate <= 0 {
            return Err(Error::InvalidRate);
        }
        if closing_time <= opening_time {
            return Err(Error::InvalidTimeRange);
        }
        if opening_time < now(&env) {
            return Err(Error::OpeningInPast);
        }
        if vest_cliff_duration > vest_duration {
            return Err(Error::InvalidVestingPeriods);
        }

        let config = SaleConfig {
            rate,
            opening_time,
            closing_time,
            wallet: wallet.clone(),
            payment_token,
            token: token.clone(),
            token_wallet: token_wallet.clone(),
            vesting,
            vest_cliff_duration,
            vest_duration,
        };
        storage::set_config(&env, &config);
        storage::set_total_raised(&env, 0);

        env.events().publish(
            ("sale_initialized",),
            (token, token_wallet, wallet, rate, opening_time, closing_time),
        );
        Ok(())
    }

    /// True iff the current time is inside the sale window. The instant equal
    /// to the closing time is still open.
    pub fn is_open(env: Env) -> Result<bool, Error> {
        let config = storage::config(&env)?;
        Ok(window_open(&config, now(&env)))
    }

    /// True iff the window is strictly behind us. Not the complement of
    /// `is_open`: before opening, both are false.
    pub fn has_closed(env: Env) -> Result<bool, Error> {
        let config = storage::config(&env)?;
        Ok(now(&env) > config.closing_time)
    }

    /// Purchase on behalf of a named beneficiary. Payment is drawn from the
    /// purchaser; tokens are credited to the purchaser's vesting holder.
    pub fn buy_tokens(
        env: Env,
        purchaser: Address,
        beneficiary: Address,
        amount: i128,
    ) -> Result<i128, Error> {
        process_purchase(&env, purchaser, beneficiary, amount)
    }

    /// Direct purchase: the caller is both purchaser and beneficiary.
    pub fn buy(env: Env, purchaser: Address, amount: i128) -> Result<i128, Error> {
        process_purchase(&env, purchaser.clone(), purchaser, amount)
    }

    /// One-shot terminal transition, callable by anyone once the window has
    /// closed. Unsold allowance simply remains unspent at the token wallet;
    /// the emitted event reports how much that is.
    pub fn finalize(env: Env) -> Result<(), Error> {
        let config = storage::config(&env)?;
        if storage::is_finalized(&env) {
            return Err(Error::AlreadyFinalized);
        }
        if now(&env) <= config.closing_time {
            return Err(Error::SaleNotClosed);
        }

        storage::set_finalized(&env);

        let unsold = live_allowance(&env, &config);
        env.events()
            .publish(("sale_finalized",), (storage::total_raised(&env), unsold));
        Ok(())
    }

    pub fn is_finalized(env: Env) -> bool {
        storage::is_finalized(&env)
    }

    pub fn total_raised(env: Env) -> i128 {
        storage::total_raised(&env)
    }

    /// Allowance still available to draw from the token wallet. A live read,
    /// so revocations or top-ups by the wallet are reflected immediately.
    pub fn remaining_tokens(env: Env) -> Result<i128, Error> {
        let config = storage::config(&env)?;
        Ok(live_allowance(&env, &config))
    }

    /// Cumulative tokens credited to a purchaser across all purchases. Gross
    /// purchased amount, not what the holder has released so far.
    pub fn balance_of(env: Env, purchaser: Address) -> i128 {
        storage::credit(&env, &purchaser)
    }

    /// The purchaser's vesting holder, once their first purchase created it.
    pub fn vesting_holder(env: Env, purchaser: Address) -> Option<Address> {
        storage::holder(&env, &purchaser)
    }

    pub fn token_wallet(env: Env) -> Result<Address, Error> {
        Ok(storage::config(&env)?.token_wallet)
    }

    pub fn wallet(env: Env) -> Result<Address, Error> {
        Ok(storage::config(&env)?.wallet)
    }

    pub fn get_config(env: Env) -> Result<SaleConfig, Error> {
        storage::config(&env)
    }
}
