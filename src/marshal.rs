//! Conversion of message value objects into `h2napi` C structs.
//!
//! A [`Marshaled`] payload owns every NUL-terminated string its raw struct
//! points to, so the raw struct stays valid for as long as the payload is
//! alive. Payloads are built right before a native call and dropped right
//! after it.

use std::ffi::CString;
use std::os::raw::{c_char, c_int};

use crate::ffi::{
    self, h2n_action_message, h2n_hh_message, h2n_seat_info, h2n_start_hand_message,
    h2n_street_message,
};
use crate::{
    ApiError, HandActionMessage, HandHistoryMessage, HandStartMessage, Result, SeatInfo,
    StreetMessage,
};

/// Raw C struct plus the string buffers it borrows.
pub struct Marshaled<T> {
    raw: T,
    // Heap buffers of a CString never move, so pointers into them survive
    // moves of the Vec and of this struct.
    _strings: Vec<CString>,
}

impl<T> Marshaled<T> {
    pub fn raw(&self) -> &T {
        &self.raw
    }

    pub fn raw_mut(&mut self) -> &mut T {
        &mut self.raw
    }
}

/// Convert one string field to a C string, rejecting interior NUL bytes.
pub fn c_string(field: &'static str, value: &str) -> Result<CString> {
    CString::new(value).map_err(|source| ApiError::InvalidString { field, source })
}

#[derive(Default)]
struct StringArena {
    strings: Vec<CString>,
}

impl StringArena {
    fn alloc(&mut self, field: &'static str, value: &str) -> Result<*const c_char> {
        let owned = c_string(field, value)?;
        let ptr = owned.as_ptr();
        self.strings.push(owned);
        Ok(ptr)
    }

    fn finish<T>(self, raw: T) -> Marshaled<T> {
        Marshaled { raw, _strings: self.strings }
    }
}

fn flag(value: bool) -> c_int {
    c_int::from(value)
}

pub fn hand_history(msg: &HandHistoryMessage) -> Result<Marshaled<h2n_hh_message>> {
    msg.validate()?;
    let mut arena = StringArena::default();
    let raw = h2n_hh_message {
        room: msg.room.wire(),
        is_zoom: flag(msg.is_zoom),
        gameid: msg.game_number as f64,
        format: msg.format.wire(),
        hh_formatted: arena.alloc("hand_history", &msg.hand_history)?,
        hh_original: arena.alloc("original_hand_history", &msg.original_hand_history)?,
    };
    Ok(arena.finish(raw))
}

fn seat(arena: &mut StringArena, seat: &SeatInfo) -> Result<h2n_seat_info> {
    Ok(h2n_seat_info {
        seat_idx: seat.seat_index as c_int,
        nickname: arena.alloc("nickname", &seat.nickname)?,
        player_id: arena.alloc("player_id", &seat.player_id)?,
        stack: seat.initial_stack,
        pocket_cards: arena.alloc("pocket_cards", &seat.pocket_cards)?,
        is_dealer: flag(seat.is_dealer),
        is_posted_sb: flag(seat.is_posted_small_blind),
        is_posted_bb: flag(seat.is_posted_big_blind),
        is_posted_sb_outofqueue: flag(seat.is_posted_small_blind_out_of_queue),
        is_posted_bb_outofqueue: flag(seat.is_posted_big_blind_out_of_queue),
        is_posted_straddle: flag(seat.is_posted_straddle),
        is_hero: flag(seat.is_hero),
        is_sitting_out: flag(seat.is_sitting_out),
    })
}

pub fn hand_start(msg: &HandStartMessage) -> Result<Marshaled<h2n_start_hand_message>> {
    msg.validate()?;
    let mut arena = StringArena::default();

    let mut seats = [h2n_seat_info::EMPTY; ffi::H2N_MAX_SEATS];
    for (slot, info) in seats.iter_mut().zip(&msg.seats) {
        *slot = seat(&mut arena, info)?;
    }

    let raw = h2n_start_hand_message {
        room: msg.room.wire(),
        gameid: msg.game_number as f64,
        table_name: arena.alloc("table_name", &msg.table_name)?,
        table_hwnd: msg.table_window,
        max_players: msg.table_size as c_int,
        is_tourney: flag(msg.is_tourney),
        is_omaha: flag(msg.is_omaha),
        is_limit: flag(msg.is_limit),
        is_zoom: flag(msg.is_zoom),
        is_cap: flag(msg.is_cap),
        is_potlimit: flag(msg.is_pot_limit),
        is_shortdeck: flag(msg.is_short_deck),
        is_omahafive: flag(msg.is_omaha_five),
        currency: msg.currency.wire(),
        sb: msg.small_blind,
        bb: msg.big_blind,
        ante: msg.ante,
        straddle: msg.straddle,
        seats,
        seats_num: msg.seats.len() as c_int,
    };
    Ok(arena.finish(raw))
}

pub fn action(msg: &HandActionMessage) -> Result<Marshaled<h2n_action_message>> {
    msg.validate()?;
    let raw = h2n_action_message {
        gameid: msg.game_number as f64,
        seat_idx: msg.seat_index as c_int,
        r#type: msg.action.wire(),
        amount: msg.amount,
        is_allin: flag(msg.is_all_in),
        pot: msg.pot,
    };
    Ok(StringArena::default().finish(raw))
}

pub fn street(msg: &StreetMessage) -> Result<Marshaled<h2n_street_message>> {
    msg.validate()?;
    let mut arena = StringArena::default();
    let raw = h2n_street_message {
        gameid: msg.game_number as f64,
        r#type: msg.street.wire(),
        board: arena.alloc("board", &msg.board)?,
        pot: msg.pot,
    };
    Ok(arena.finish(raw))
}
