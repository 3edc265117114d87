pub mod components;
pub mod edge_filter;
pub mod highlight;
pub mod memo;
pub mod traversal;

pub use components::*;
pub use edge_filter::*;
pub use highlight::*;
pub use memo::*;
pub use traversal::*;
