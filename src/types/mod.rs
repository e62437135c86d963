pub(crate) mod data_kind;
pub(crate) mod month;
pub(crate) mod observation;
pub(crate) mod record;
pub(crate) mod station;
