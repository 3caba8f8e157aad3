mod ctx;
pub use ctx::*;
