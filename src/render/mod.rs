pub(crate) mod canvas;
pub(crate) mod crop;
pub(crate) mod encode;
