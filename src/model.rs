//! Wire types exchanged with the dashboard backends.
//!
//! Every payload uses camelCase JSON. Timestamps are RFC 3339 strings decoded into
//! [`OffsetDateTime`](time::OffsetDateTime).

pub mod alert;
pub mod auth;
pub mod envelope;
pub mod market;
pub mod portfolio;
pub mod ws;

pub use alert::*;
pub use auth::*;
pub use envelope::*;
pub use market::*;
pub use portfolio::*;
pub use ws::*;
