pub(crate) mod email;
pub(crate) mod endpoint;
pub(crate) mod form;
pub(crate) mod store;
