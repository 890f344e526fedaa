pub mod distributor;
pub mod round_ledger;
pub mod sale;

pub use distributor::*;
pub use round_ledger::*;
pub use sale::*;
