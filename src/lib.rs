pub mod picker;
pub mod session;
