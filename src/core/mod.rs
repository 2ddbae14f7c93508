pub mod amount;
pub mod catalog;
pub mod resolve;
pub mod scan;
pub mod session;
pub mod submit;
