pub(crate) mod elements;
pub(crate) mod inline;
pub(crate) mod parse;
