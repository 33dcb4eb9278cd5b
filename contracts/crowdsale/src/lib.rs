#![no_std]

mod contract;
mod errors;
mod holders;
mod storage;
mod types;


pub use contract::{Crowdsale, CrowdsaleClient};
pub use errors::Error;
pub use holders::VestingHolders;
pub use types::SaleConfig;
