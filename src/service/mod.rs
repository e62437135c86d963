pub(crate) mod error;
pub(crate) mod inventory;
pub(crate) mod loader;
pub(crate) mod series;
pub(crate) mod xml;
