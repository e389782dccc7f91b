pub mod fighter;
pub mod loot;
pub mod run_state;

pub use fighter::*;
pub use loot::*;
pub use run_state::*;
