pub mod handlers;
pub mod service;
pub mod store;

#[cfg(test)]
pub mod testing;
