mod error;
mod lock;
mod mutex;
mod status;
#[cfg(test)]
mod tests;

pub use error::*;
pub use lock::*;
pub use status::*;
