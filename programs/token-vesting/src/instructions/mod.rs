pub mod initialize;
pub mod set_admin;
pub mod add_plan;
pub mod set_revoked;
pub mod lock;
pub mod release;
pub mod queries;

pub use initialize::*;
pub use set_admin::*;
pub use add_plan::*;
pub use set_revoked::*;
pub use lock::*;
pub use release::*;
pub use queries::*;
