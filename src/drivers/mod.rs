//! Hardware drivers — peripheral init and the pump relay.

pub mod hw_init;
pub mod relay;
