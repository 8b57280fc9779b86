pub mod access_time;

pub use access_time::access_time_middleware;
