pub mod domain;
pub mod error;
pub mod filter;
pub mod resolver;

pub use domain::*;
pub use error::CoreError;
pub use filter::{register, FilterRegistry, FilterSet, FILTER_NAME};
pub use resolver::{gravatar, resolve, AvatarResolver, DigestOutcome, DigestSource};
