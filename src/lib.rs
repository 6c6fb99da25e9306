//! pokebrowse library exports

pub mod catalog;
pub mod core;
pub mod shell;

#[cfg(test)]
pub mod test_support;
