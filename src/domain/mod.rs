mod clock;
mod expense;
mod money;

pub use clock::*;
pub use expense::*;
pub use money::*;
