//! Broker intake: scripted mortgage-broking intake chat with an advice gate.

pub mod config;
pub mod error;
pub mod intake;
pub mod web;
