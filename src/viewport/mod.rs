pub(crate) mod dispatcher;
pub(crate) mod events;
