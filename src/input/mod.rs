pub(crate) mod fs;
pub(crate) mod source;
pub(crate) mod user;
