#![no_std]

mod contract;
mod errors;
mod storage;
mod types;


pub use contract::{CappedToken, CappedTokenClient};
pub use errors::Error;
pub use types::TokenMetadata;
