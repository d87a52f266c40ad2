mod error;
mod pool;
mod request;

pub use error::PoolError;
pub use pool::RequestPool;
pub use request::Request;
