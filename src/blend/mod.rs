pub(crate) mod equations;
pub(crate) mod mode;
