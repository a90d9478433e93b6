mod cache_map;
mod cancel;
mod error;
mod rate_limit;
mod request;
mod retry;
mod sender;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use self::cache_map::*;
pub use self::cancel::*;
pub use self::error::*;
pub use self::rate_limit::*;
pub use self::request::*;
pub use self::retry::*;
pub use self::sender::*;
pub use self::transport::*;
