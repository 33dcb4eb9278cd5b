use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidRate = 3,
    InvalidTimeRange = 4,
    OpeningInPast = 5,
    InvalidVestingPeriods = 6,
    InvalidAmount = 7,
    SaleNotOpen = 8,
    Overflow = 9,
    InsufficientAllowance = 10,
    SaleNotClosed = 11,
    AlreadyFinalized = 12,
}
