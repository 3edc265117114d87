pub mod estimate;
pub mod session;
pub mod tier;

pub use estimate::*;
pub use session::*;
pub use tier::*;
