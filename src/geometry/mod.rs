pub(crate) mod error;
pub(crate) mod filter;
pub(crate) mod region;
