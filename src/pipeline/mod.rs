pub(crate) mod builder;
pub(crate) mod exec;
pub(crate) mod program;
pub(crate) mod stage;
