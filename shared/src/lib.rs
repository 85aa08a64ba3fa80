pub mod collection;
pub mod constants;
pub mod controller;
pub mod dates;
pub mod error;
pub mod filter;
pub mod render;
pub mod resource;
pub mod session;
pub mod storage;
pub mod transport;
pub mod types;
pub mod validate;
