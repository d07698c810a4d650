//! Submission transport seam

mod target;
mod traits;

pub use target::{Method, SubmitTarget};
pub use traits::Transport;

#[cfg(test)]
pub use traits::MockTransport;
