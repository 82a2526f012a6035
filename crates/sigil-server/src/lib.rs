//! HTTP server for Sigil.
//!
//! Wires the authentication core ([`sigil_auth`]) and the database
//! plumbing ([`sigil_db_postgres`]) into a runnable service.

pub mod config;
pub mod handlers;
pub mod observability;
pub mod server;

pub use config::AppConfig;
pub use server::Server;
