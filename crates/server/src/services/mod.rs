//! Internal services for the StorePulse server.

pub mod password;
