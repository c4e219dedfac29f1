pub mod deadline;
pub mod error;
pub mod extract;
pub mod lookup;
pub mod preprocess;
pub mod state;
pub mod storage;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;
