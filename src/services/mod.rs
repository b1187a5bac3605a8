pub mod fetch;
pub use fetch::ModelFetchService;
