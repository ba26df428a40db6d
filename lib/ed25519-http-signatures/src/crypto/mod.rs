//!
//! Common cryptographic operations
//!

mod account;
mod algorithm;
mod sign;
mod verify;

pub use self::account::Account;
pub use self::algorithm::Algorithm;
pub use self::sign::sign;
pub use self::verify::verify;
