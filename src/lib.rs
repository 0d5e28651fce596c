//! Arena Bot - per-tick decision engine for an arena game bot
//!
//! Each tick the engine hands over a world snapshot and gets back an ordered
//! batch of actions:
//! - resolve self and update the persistent bot state
//! - pick the nearest opponent
//! - compose weapon switch, shoot, move (and optional save) actions
//!
//! The `http` module exposes the lifecycle of one or more bots to the engine.

pub mod app;
pub mod bot;
pub mod config;
pub mod http;
pub mod protocol;
pub mod util;
