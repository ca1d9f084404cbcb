pub mod adapt;
mod error;
mod file;
mod read;

pub use adapt::{bind, subject_last};
pub use error::{Error, Result};
pub use file::{LazyFile, LazyFileBuilder};
pub use read::Encoding;
