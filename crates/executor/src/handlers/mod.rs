//! Command handlers, one module per concern.

pub mod contact;
pub mod db;
