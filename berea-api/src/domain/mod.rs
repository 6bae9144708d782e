pub mod chat;
mod documents;
mod source;

pub use documents::*;
pub use source::*;
