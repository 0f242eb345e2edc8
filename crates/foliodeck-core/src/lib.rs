// Paging and filtering logic lives here - the brain of the operation
pub mod collection;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod providers;
pub mod trigger;

pub use collection::{CollectionItem, PagedCollection};
pub use config::Config;
pub use controller::{FetchState, ListController, PageRequest};
pub use error::Error;
pub use filter::Filter;
pub use trigger::LoadTrigger;

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
