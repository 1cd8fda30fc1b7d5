pub mod pseudo_random;
pub mod system;
pub mod traits;
