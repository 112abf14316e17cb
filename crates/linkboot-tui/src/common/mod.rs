mod session;
pub mod text;

pub use session::{SessionId, SessionSeq};
