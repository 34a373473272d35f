pub mod locks;
pub mod plans;
pub mod vesting_state;

pub use locks::*;
pub use plans::*;
pub use vesting_state::*;
