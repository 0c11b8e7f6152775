mod category;
mod filter;
pub mod ledger;
mod money;
mod transaction;

pub use category::*;
pub use filter::*;
pub use money::*;
pub use transaction::*;
