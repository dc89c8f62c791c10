/// Database Module
///
/// The database layer is split into two concerns:
/// - **Connection Management** (`connection.rs`): opens one connection per call
///   and guarantees it is released when the call ends
/// - **Schema** (`schema.rs`): catalog lookup and creation of the employee table
///
/// All database operations use the standardized `StaffError` type for consistent error propagation.
pub mod connection;
pub mod schema;

pub use connection::*;
pub use schema::*;
