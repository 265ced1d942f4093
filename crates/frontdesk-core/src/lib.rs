//! Core types and trait definitions for the front-desk visitor log.
//!
//! This crate is deliberately free of database and filesystem code. The
//! storage crates implement the traits in [`store`]; the binary wires them
//! into a [`lifecycle::FrontDesk`].

pub mod availability;
pub mod badge;
pub mod error;
pub mod history;
pub mod lifecycle;
pub mod outcome;
pub mod registry;
pub mod store;
pub mod time;
pub mod visitor;

pub use error::{Error, Result, ValidationError};
pub use outcome::Outcome;
