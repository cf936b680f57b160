pub(crate) mod shaper;
