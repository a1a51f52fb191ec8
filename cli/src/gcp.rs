pub mod address;
pub mod api;
pub mod auth;
pub mod toolchain;
