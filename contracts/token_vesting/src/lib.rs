#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, contractmeta, contracttype, token, Address, Env,
};


contractmeta!(
    key = "Description",
    val = "Per-beneficiary linear vesting holders funded by a token sale"
);

#[derive(Clone)]
#[contracttype]
pub struct VestingConfig {
    pub funder: Address,
    pub token: Address,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct VestingSchedule {
    pub start_time: u64,
    pub cliff_duration: u64,
    pub duration: u64,
    pub total_amount: i128,
    pub released_amount: i128,
}

#[contracttype]
pub enum DataKey {
    Config,
    Schedule(Address),
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidSchedule = 3,
    HolderExists = 4,
    NoSuchHolder = 5,
    InvalidAmount = 6,
    NothingDue = 7,
    Overflow = 8,
}

#[contract]
pub struct TokenVesting;

fn read_config(env: &Env) -> Result<VestingConfig, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

fn read_schedule(env: &Env, beneficiary: &Address) -> Result<VestingSchedule, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Schedule(beneficiary.clone()))
        .ok_or(Error::NoSuchHolder)
}

fn write_schedule(env: &Env, beneficiary: &Address, schedule: &VestingSchedule) {
    env.storage()
        .persistent()
        .set(&DataKey::Schedule(beneficiary.clone()), schedule);
}

fn vested_at(schedule: &VestingSchedule, now: u64) -> Result<i128, Error> {
    let cliff_end = schedule
        .start_time
        .checked_add(schedule.cliff_duration)
        .ok_or(Error::Overflow)?;
    if now < cliff_end {
        return Ok(0);
    }
    let elapsed = now.saturating_sub(schedule.start_time);
    if elapsed >= schedule.duration {
        return Ok(schedule.total_amount);
    }
    let vested = schedule
        .total_amount
        .checked_mul(elapsed as i128)
        .ok_or(Error::Overflow)?
        / schedule.duration as i128;
    Ok(vested)
}

#[contractimpl]
impl TokenVesting {
    /// Bind the contract to the sale engine that funds it and the vested asset.
    pub fn initialize(env: Env, funder: Address, token: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Config) {
            return Err(Error::AlreadyInitialized);
        }
        env.storage()
            .instance()
            .set(&DataKey::Config, &VestingConfig { funder, token });
        Ok(())
    }

    /// Create an empty holder for a beneficiary. At most one per beneficiary;
    /// only the funder may create holders.
    pub fn create_holder(
        env: Env,
        beneficiary: Address,
        start_time: u64,
        cliff_duration: u64,
        duration: u64,
    ) -> Result<(), Error> {
        let config = read_config(&env)?;
        config.funder.require_auth();

        if duration == 0 || cliff_duration > duration {
            return Err(Error::InvalidSchedule);
        }
        if env
            .storage()
            .persistent()
            .has(&DataKey::Schedule(beneficiary.clone()))
        {
            return Err(Error::HolderExists);
        }

        let schedule = VestingSchedule {
            start_time,
            cliff_duration,
            duration,
            total_amount: 0,
            released_amount: 0,
        };
        write_schedule(&env, &beneficiary, &schedule);

        env.events().publish(
            ("holder_created",),
            (beneficiary, start_time, cliff_duration, duration),
        );
        Ok(())
    }

    /// Credit tokens to an existing holder. The funder moves the tokens into
    /// this contract's balance within the same invocation.
    pub fn credit(env: Env, beneficiary: Address, amount: i128) -> Result<(), Error> {
        let config = read_config(&env)?;
        config.funder.require_auth();

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let mut schedule = read_schedule(&env, &beneficiary)?;
        schedule.total_amount = schedule
            .total_amount
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        write_schedule(&env, &beneficiary, &schedule);

        env.events()
            .publish(("holder_credited",), (beneficiary, amount));
        Ok(())
    }

    /// Release whatever has vested so far to the beneficiary.
    pub fn release(env: Env, beneficiary: Address) -> Result<i128, Error> {
        beneficiary.require_auth();

        let config = read_config(&env)?;
        let mut schedule = read_schedule(&env, &beneficiary)?;

        let vested = vested_at(&schedule, env.ledger().timestamp())?;
        let due = vested - schedule.released_amount;
        if due <= 0 {
            return Err(Error::NothingDue);
        }

        schedule.released_amount += due;
        write_schedule(&env, &beneficiary, &schedule);

        token::Client::new(&env, &config.token).transfer(
            &env.current_contract_address(),
            &beneficiary,
            &due,
        );

        env.events().publish(("released",), (beneficiary, due));
        Ok(due)
    }

    pub fn schedule(env: Env, beneficiary: Address) -> Option<VestingSchedule> {
        env.storage()
            .persistent()
            .get(&DataKey::Schedule(beneficiary))
    }

    pub fn vested(env: Env, beneficiary: Address) -> Result<i128, Error> {
        let schedule = read_schedule(&env, &beneficiary)?;
        vested_at(&schedule, env.ledger().timestamp())
    }

    pub fn releasable(env: Env, beneficiary: Address) -> Result<i128, Error> {
        let schedule = read_schedule(&env, &beneficiary)?;
        let vested = vested_at(&schedule, env.ledger().timestamp())?;
        Ok(vested - schedule.released_amount)
    }
}
