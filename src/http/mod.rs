pub mod client;
pub mod method;
pub mod response;
