pub mod credentials;
pub mod guard;
pub mod session;
pub mod storage;
