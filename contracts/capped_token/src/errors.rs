use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAuthorized = 3,
    InvalidAmount = 4,
    InvalidCap = 5,
    CapExceeded = 6,
    InsufficientBalance = 7,
    InsufficientAllowance = 8,
    InvalidExpiration = 9,
}
