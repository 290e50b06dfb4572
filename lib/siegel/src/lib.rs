#![doc = include_str!("../README.md")]

pub use self::{
    cookie::{seal_identifier, unseal_identifier},
    envelope::Sealer,
    error::Error,
    key::KeyMaterial,
    random::alphanumeric,
    state::Challenge,
};

mod cookie;
mod envelope;
mod error;
mod key;
mod payload;
mod random;
mod state;

/// Length of the random nonce inside a [`Challenge`], in characters
pub const NONCE_LEN: usize = 32;
