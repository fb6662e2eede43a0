pub mod item;
pub mod payment;
pub mod rental;

pub use item::*;
pub use payment::*;
pub use rental::*;
