//! The demo application: option selection plus a list of random numbers.

pub mod actions;
pub mod catalog;
pub mod intent;
pub mod reducer;
pub mod source;
pub mod state;
pub mod views;

pub use actions::{AppAction, AppStore, NUMBERS_PER_REQUEST};
pub use catalog::{CatalogError, Channel, OptionCatalog, Os, Product, CATALOG};
pub use intent::AppIntent;
pub use reducer::AppReducer;
pub use source::{FetchError, HttpSource, NumberSource, SimulatedSource};
pub use state::{AppState, RandomNumber};
pub use views::{query_string, query_view, server_params, ServerParams};
