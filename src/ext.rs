//! Extension contracts implemented by the host application.

pub mod redirect;

pub use redirect::*;
