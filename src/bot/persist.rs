//! Save payload codec for [`BotState`]
//!
//! Layout (100 bytes, little endian):
//! - `0..2`   magic `AB`
//! - `2`      format version
//! - `3`      flags: bit 0 weapon switch issued, bit 1 first tick present
//! - `4..12`  first tick
//! - `12`     enemy name length
//! - `13..`   enemy name, UTF-8, zero padded

use crate::protocol::{SavePayload, SAVE_LEN};

use super::tracker::BotState;

const MAGIC: [u8; 2] = *b"AB";
const VERSION: u8 = 1;
const FLAG_WEAPON_SWITCHED: u8 = 0b01;
const FLAG_FIRST_TICK: u8 = 0b10;
const NAME_OFFSET: usize = 13;
const MAX_NAME_LEN: usize = SAVE_LEN - NAME_OFFSET;

/// Encode the persistent part of a bot state
pub fn encode(state: &BotState) -> SavePayload {
    let mut buf = [0u8; SAVE_LEN];
    buf[0..2].copy_from_slice(&MAGIC);
    buf[2] = VERSION;

    let mut flags = 0;
    if state.weapon_switch_issued {
        flags |= FLAG_WEAPON_SWITCHED;
    }
    if let Some(tick) = state.first_tick {
        flags |= FLAG_FIRST_TICK;
        buf[4..12].copy_from_slice(&tick.to_le_bytes());
    }
    buf[3] = flags;

    if let Some(name) = state.last_enemy.as_deref() {
        let name = truncate_utf8(name, MAX_NAME_LEN);
        buf[12] = name.len() as u8;
        buf[NAME_OFFSET..NAME_OFFSET + name.len()].copy_from_slice(name.as_bytes());
    }

    SavePayload::new(buf)
}

/// Decode a payload previously produced by [`encode`]
pub fn decode(payload: &SavePayload) -> Result<BotState, SaveError> {
    let buf = payload.as_bytes();

    if buf[0..2] != MAGIC {
        return Err(SaveError::BadMagic);
    }
    if buf[2] != VERSION {
        return Err(SaveError::UnsupportedVersion(buf[2]));
    }

    let flags = buf[3];
    let first_tick = if flags & FLAG_FIRST_TICK != 0 {
        let mut tick = [0u8; 8];
        tick.copy_from_slice(&buf[4..12]);
        Some(u64::from_le_bytes(tick))
    } else {
        None
    };

    let name_len = buf[12] as usize;
    if name_len > MAX_NAME_LEN {
        return Err(SaveError::NameOverrun(name_len));
    }
    let last_enemy = if name_len == 0 {
        None
    } else {
        let name = std::str::from_utf8(&buf[NAME_OFFSET..NAME_OFFSET + name_len])
            .map_err(|_| SaveError::InvalidName)?;
        Some(name.to_string())
    };

    Ok(BotState {
        weapon_switch_issued: flags & FLAG_WEAPON_SWITCHED != 0,
        last_enemy,
        first_tick,
        last_self_position: None,
        last_save: Some(payload.clone()),
    })
}

fn truncate_utf8(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Save payload decoding errors
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum SaveError {
    #[error("Save payload was not written by this bot")]
    BadMagic,

    #[error("Unsupported save format version: {0}")]
    UnsupportedVersion(u8),

    #[error("Enemy name length {0} exceeds payload")]
    NameOverrun(usize),

    #[error("Enemy name is not valid UTF-8")]
    InvalidName,
}
