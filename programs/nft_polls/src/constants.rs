use anchor_lang::prelude::*;

#[constant]
pub const POLL_SEED: &[u8] = b"poll";

#[constant]
pub const VOTE_SEED: &[u8] = b"vote";

/// Every key part fed to the address deriver is a raw 32-byte public key.
pub const IDENTIFIER_LEN: usize = 32;
