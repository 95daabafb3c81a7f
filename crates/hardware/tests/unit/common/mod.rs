/// Address range arithmetic.
pub mod addr_range;
