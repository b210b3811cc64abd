//! Molt Common - wire protocol and error taxonomy shared by the molt
//! client and the moltd update server.

pub mod error;
pub mod protocol;

pub use error::*;
pub use protocol::*;
