pub mod catalogue;
pub mod presenter;
