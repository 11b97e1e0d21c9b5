pub mod candidates;
pub mod entry;
pub mod links;
pub mod sort_key;

#[cfg(test)]
pub(crate) mod tests;
