


/// System registration and validation.
pub mod system;
