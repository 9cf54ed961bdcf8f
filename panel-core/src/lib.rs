//! # panel-core
//!
//! Core types and traits for the panel bot: [`Bot`], [`Handler`], message and user types,
//! secret masking and tracing initialization. Transport-agnostic; used by handler-chain and panelbot.

pub mod bot;
pub mod error;
pub mod logger;
pub mod mask;
pub mod types;

pub use bot::Bot;
pub use error::{BotError, Result};
pub use logger::init_tracing;
pub use mask::mask_secret;
pub use types::{
    Chat, Handler, HandlerResponse, Message, MessageDirection, ToCoreMessage, ToCoreUser, User,
};
