pub mod disease;
pub mod enums;

pub use disease::Disease;
