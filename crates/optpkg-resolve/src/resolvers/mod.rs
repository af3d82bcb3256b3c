//! Built-in resolver strategies.

mod command;
mod location;
mod url;

pub use command::{CommandResolver, EXTENSION_NAME_ENV};
pub use location::LocationResolver;
pub use url::{UrlDestination, UrlResolver};
