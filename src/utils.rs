pub mod date;
pub mod sql;
#[cfg(test)]
pub(crate) mod fixtures;
