pub mod cache;
pub mod consts;
pub mod decaying_set;
pub mod detection;
pub mod error;
pub mod frame;
pub mod io;
pub mod kernel;
pub mod pipeline;
pub mod ring_buffer;
pub mod statistics;
