// Order sizing and execution
pub mod order_manager;
pub mod sizer;

pub use order_manager::OrderManager;
pub use sizer::{precision_from_min_size, size_order, FALLBACK_PRECISION};
