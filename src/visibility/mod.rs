pub(crate) mod dom;
pub(crate) mod intersection;
pub(crate) mod observer;
pub(crate) mod selector;
