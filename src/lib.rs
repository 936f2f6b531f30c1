//! # portal
//!
//! Client core for the account portal: registration, login/logout, password
//! reset, and a signed-in home page.
//!
//! The crate holds everything except rendering:
//! - `session`: the stored session id, the sole authentication signal
//! - `net`: HTTP gateway with an interceptor chain and the account calls
//! - `routing`: route table, navigation guard, and navigation driver
//! - `auth`: login/logout flows that own the stored session
//! - `validate`: form checks mirroring the server's field rules
//!
//! Everything runs on a single cooperative thread; shared pieces are held
//! in `Rc` and mutated through `RefCell`.

pub mod auth;
pub mod config;
pub mod net;
pub mod notify;
pub mod routing;
pub mod session;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_support;
