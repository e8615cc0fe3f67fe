//! Shared pieces of the NCO role search client: wire types, the HTTP search
//! client, configuration, platform paths and the theme preference store.

pub mod client;
pub mod config;
pub mod error;
pub mod platform;
pub mod prefs;
pub mod record;
