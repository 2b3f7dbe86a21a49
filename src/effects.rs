pub(crate) mod aging;
