pub mod config;
pub mod constants;
pub mod drag;
pub mod field;
pub mod proximity;
pub mod ticker;

pub use config::*;
pub use drag::*;
pub use field::*;
pub use proximity::*;
pub use ticker::*;
