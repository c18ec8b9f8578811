pub mod drag;
pub mod pointer;
