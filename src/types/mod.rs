mod client_info;
mod device_type;

pub use client_info::*;
pub use device_type::*;
