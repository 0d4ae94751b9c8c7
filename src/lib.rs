//! Request routing for a FastCGI responder.
//!
//! A [`routing::Router`] is built from chained `get`/`post`/`put`/`del`/`all`
//! calls below a base path. For each request the routes are tried in the
//! order they were registered and the first one that matches produces the
//! response; no later route is consulted.

pub mod config;
pub mod connection;
pub mod handlers;
pub mod request;
pub mod response;
pub mod routing;
pub mod server;
