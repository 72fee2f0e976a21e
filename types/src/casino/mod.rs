mod constants;
mod game;
mod history;
mod ledger;

pub use constants::*;
pub use game::*;
pub use history::*;
pub use ledger::*;
