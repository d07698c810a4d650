//! Form state module

mod form_state;
mod touched;
mod values;

pub use form_state::*;
pub use touched::*;
pub use values::*;
