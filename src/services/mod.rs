pub mod aggregate;
pub mod client;
pub mod favorites;
pub mod roster;

#[cfg(test)]
pub(crate) mod testing;
