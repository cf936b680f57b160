pub(crate) mod linebox;
pub(crate) mod measure;
