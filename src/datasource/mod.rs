//! DataSource subsystem
//!
//! Decouples query execution strategy from the rest of the system. Every
//! backend implements [`DataSource`]; which one a service is bound to is
//! decided by ordinary wiring at process start.
//!
//! - [`InMemoryDataSource`]: a collection held in process memory
//! - [`PushdownDataSource`]: a [`NativeStore`] that evaluates some operators
//!   itself, with the remainder applied after fetching

mod errors;
mod memory;
mod pushdown;
mod traits;

pub use errors::{DataSourceError, DataSourceResult};
pub use memory::InMemoryDataSource;
pub use pushdown::{FilterSplit, NativeStore, PushdownDataSource};
pub use traits::{Capabilities, DataSource, OP_GET_BY_ID, OP_GET_COUNT};
