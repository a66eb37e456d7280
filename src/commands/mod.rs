//! Command implementations for the jdkup CLI
//!
//! - **query**: catalog browsing (`list-remote`, `search`)
//! - **install**: installing and removing releases
//! - **list**: installed releases (`list`, `home`)

pub mod install;
pub mod list;
pub mod query;

pub use install::{install, uninstall};
pub use list::{home, list};
pub use query::{list_remote, search};
