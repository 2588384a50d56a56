mod alphabet;
mod codec;
mod error;
mod formatter;

pub use alphabet::ALPHABET;
pub use codec::*;
pub use error::*;
pub use formatter::*;
