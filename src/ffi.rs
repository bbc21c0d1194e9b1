//! C-ABI declarations mirroring `h2napi.h`.
//!
//! Struct layouts, constants and exported function signatures match the
//! header shipped with the Hand2Note API library exactly. Nothing in here
//! owns memory: string pointers are borrowed for the duration of one call
//! (see [`crate::marshal`]).

#![allow(non_camel_case_types)]

use std::os::raw::{c_char, c_int};
use std::ptr;

// Hand history text formats
pub const H2N_HHFMT_ORIGINAL: c_int = 0;
pub const H2N_HHFMT_STARS: c_int = 1;
pub const H2N_HHFMT_PACIFIC: c_int = 2;
pub const H2N_HHFMT_WPN: c_int = 3;

// Rooms
pub const H2N_ROOM_UNRECOGNIZED: c_int = 0;
pub const H2N_ROOM_BAAZI: c_int = 1;
pub const H2N_ROOM_CHECKRAISE: c_int = 2;
pub const H2N_ROOM_BETSENSE: c_int = 3;
pub const H2N_ROOM_MONKEYBET: c_int = 4;
pub const H2N_ROOM_FULPOT: c_int = 5;
pub const H2N_ROOM_MICROGAMING: c_int = 7;
pub const H2N_ROOM_WINAMAX: c_int = 9;
pub const H2N_ROOM_POKERSTARS: c_int = 10;
pub const H2N_ROOM_PARTYPOKER: c_int = 11;
pub const H2N_ROOM_DOLLARO: c_int = 12;
pub const H2N_ROOM_IPOKER: c_int = 13;
pub const H2N_ROOM_PACIFIC: c_int = 14;
pub const H2N_ROOM_WINNINGPOKERNETWORK: c_int = 15;
pub const H2N_ROOM_GGNET: c_int = 16;
pub const H2N_ROOM_ENETPOKER: c_int = 17;
pub const H2N_ROOM_KLASPOKER: c_int = 18;
pub const H2N_ROOM_POKERWORLD: c_int = 19;
pub const H2N_ROOM_OURGAME: c_int = 20;
pub const H2N_ROOM_BETONLINE: c_int = 21;
pub const H2N_ROOM_BIGBETGE: c_int = 22;
pub const H2N_ROOM_BLUFFONLINE: c_int = 23;
pub const H2N_ROOM_BLUFFDADDY: c_int = 24;
pub const H2N_ROOM_COLOMBIAPOKERLIVE: c_int = 25;
pub const H2N_ROOM_EUROPEBETCOM: c_int = 26;
pub const H2N_ROOM_FTRPOKER: c_int = 27;
pub const H2N_ROOM_POKERGDFPLAY: c_int = 28;
pub const H2N_ROOM_HIGHROLLERS: c_int = 29;
pub const H2N_ROOM_ITALYLIVEPOKER: c_int = 30;
pub const H2N_ROOM_POKERMANIA: c_int = 31;
pub const H2N_ROOM_POKERMIRA: c_int = 32;
pub const H2N_ROOM_POKERDOM: c_int = 33;
pub const H2N_ROOM_POKERMATCH: c_int = 34;
pub const H2N_ROOM_REDARGENTINADEPOKER: c_int = 35;
pub const H2N_ROOM_SEKABETCOM: c_int = 36;
pub const H2N_ROOM_SEKABET: c_int = 37;
pub const H2N_ROOM_SPARTANPOKERCOM: c_int = 38;
pub const H2N_ROOM_SPORTSBETTING: c_int = 39;
pub const H2N_ROOM_TIGERGAMING: c_int = 40;
pub const H2N_ROOM_VENEZUELAPOKERLIVE: c_int = 41;
pub const H2N_ROOM_XMASTER: c_int = 42;
pub const H2N_ROOM_POKERGRANT: c_int = 43;
pub const H2N_ROOM_GRANDPOKEREU: c_int = 44;
pub const H2N_ROOM_REVOLUTIONBETS: c_int = 45;
pub const H2N_ROOM_VBET: c_int = 46;
pub const H2N_ROOM_WIN2DAY: c_int = 47;
pub const H2N_ROOM_WWIN: c_int = 48;
pub const H2N_ROOM_POKERMASTER: c_int = 49;
pub const H2N_ROOM_PLANETWIN365: c_int = 50;
pub const H2N_ROOM_ACONCAGUAPOKER: c_int = 51;
pub const H2N_ROOM_BRASILPOKERLIVE: c_int = 52;
pub const H2N_ROOM_SURPOKERDELASAMERICAS: c_int = 53;
pub const H2N_ROOM_CHILEPOKERLIVE: c_int = 54;
pub const H2N_ROOM_BOLIVIAPOKERLIVE: c_int = 55;
pub const H2N_ROOM_COSTARICAPOKERLIVE: c_int = 56;
pub const H2N_ROOM_GUARANIPOKERLIVE: c_int = 57;
pub const H2N_ROOM_MEXICOPOKERLIVE: c_int = 58;
pub const H2N_ROOM_PERUPOKERLIVE: c_int = 59;
pub const H2N_ROOM_PPPOKER: c_int = 60;
pub const H2N_ROOM_POKERKINGDOM: c_int = 61;
pub const H2N_ROOM_POKERKING: c_int = 62;
pub const H2N_ROOM_FISHPOKERS: c_int = 63;
pub const H2N_ROOM_OHPOKER: c_int = 64;
pub const H2N_ROOM_ONEPS: c_int = 65;
pub const H2N_ROOM_POKERCLANS: c_int = 66;
pub const H2N_ROOM_KKPOKER: c_int = 67;

// Currencies
pub const H2N_CURRENCY_UNDEFINED: c_int = 0;
pub const H2N_CURRENCY_DOLLAR: c_int = 1;
pub const H2N_CURRENCY_EURO: c_int = 2;
pub const H2N_CURRENCY_POUND: c_int = 3;
pub const H2N_CURRENCY_PLAYMONEY: c_int = 4;
pub const H2N_CURRENCY_POINTS: c_int = 5;
pub const H2N_CURRENCY_CHIPS: c_int = 6;
pub const H2N_CURRENCY_YUAN: c_int = 7;
pub const H2N_CURRENCY_INDIANRUPEE: c_int = 8;
pub const H2N_CURRENCY_HRYVNIA: c_int = 9;
pub const H2N_CURRENCY_ROUBLE: c_int = 10;
pub const H2N_CURRENCY_GEORGIANLARI: c_int = 11;

// Actions
pub const H2N_ACTION_FOLD: c_int = 0;
pub const H2N_ACTION_CALL: c_int = 1;
pub const H2N_ACTION_RAISE: c_int = 2;
pub const H2N_ACTION_CHECK: c_int = 3;
pub const H2N_ACTION_BET: c_int = 4;

// Streets, valued by the number of visible board cards
pub const H2N_STREET_PREFLOP: c_int = 0;
pub const H2N_STREET_FLOP: c_int = 3;
pub const H2N_STREET_TURN: c_int = 4;
pub const H2N_STREET_RIVER: c_int = 5;

// Commands
pub const H2N_COMMAND_CLOSEHUD: c_int = 0;
pub const H2N_COMMAND_REOPENTABLE: c_int = 3;
pub const H2N_COMMAND_RESTARTEMULATOR: c_int = 4;

/// Fixed capacity of the seat array in [`h2n_start_hand_message`].
pub const H2N_MAX_SEATS: usize = 10;

/// Completed hand history (`h2n_hh_message`).
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct h2n_hh_message {
    pub room: c_int,
    pub is_zoom: c_int,
    pub gameid: f64,
    pub format: c_int,
    pub hh_formatted: *const c_char,
    pub hh_original: *const c_char,
}

/// One seat of a hand start (`h2n_seat_info`).
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct h2n_seat_info {
    pub seat_idx: c_int,
    pub nickname: *const c_char,
    pub player_id: *const c_char,
    pub stack: f64,
    pub pocket_cards: *const c_char,
    pub is_dealer: c_int,
    pub is_posted_sb: c_int,
    pub is_posted_bb: c_int,
    pub is_posted_sb_outofqueue: c_int,
    pub is_posted_bb_outofqueue: c_int,
    pub is_posted_straddle: c_int,
    pub is_hero: c_int,
    pub is_sitting_out: c_int,
}

impl h2n_seat_info {
    /// Unused slot of the fixed seat array.
    pub const EMPTY: Self = Self {
        seat_idx: 0,
        nickname: ptr::null(),
        player_id: ptr::null(),
        stack: 0.0,
        pocket_cards: ptr::null(),
        is_dealer: 0,
        is_posted_sb: 0,
        is_posted_bb: 0,
        is_posted_sb_outofqueue: 0,
        is_posted_bb_outofqueue: 0,
        is_posted_straddle: 0,
        is_hero: 0,
        is_sitting_out: 0,
    };
}

/// Hand start snapshot (`h2n_start_hand_message`).
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct h2n_start_hand_message {
    pub room: c_int,
    pub gameid: f64,

    pub table_name: *const c_char,
    pub table_hwnd: c_int,

    pub max_players: c_int,

    pub is_tourney: c_int,
    pub is_omaha: c_int,
    pub is_limit: c_int,
    pub is_zoom: c_int,
    pub is_cap: c_int,
    pub is_potlimit: c_int,
    pub is_shortdeck: c_int,
    pub is_omahafive: c_int,

    pub currency: c_int,

    pub sb: f64,
    pub bb: f64,
    pub ante: f64,
    pub straddle: f64,

    pub seats: [h2n_seat_info; H2N_MAX_SEATS],
    pub seats_num: c_int,
}

/// In-hand action (`h2n_action_message`).
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct h2n_action_message {
    pub gameid: f64,
    pub seat_idx: c_int,
    pub r#type: c_int,
    pub amount: f64,
    pub is_allin: c_int,
    pub pot: f64,
}

/// Street change with the visible board (`h2n_street_message`).
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct h2n_street_message {
    pub gameid: f64,
    pub r#type: c_int,
    pub board: *const c_char,
    pub pot: f64,
}

// Exported function signatures
pub type h2n_is_running = unsafe extern "C" fn() -> c_int;
pub type h2n_make_table_name =
    unsafe extern "C" fn(room: c_int, original_name: *const c_char) -> *mut c_char;
pub type h2n_free_cstring = unsafe extern "C" fn(str: *mut c_char);
pub type h2n_send_handhistory = unsafe extern "C" fn(msg: *mut h2n_hh_message) -> c_int;
pub type h2n_send_hand_start = unsafe extern "C" fn(msg: *mut h2n_start_hand_message) -> c_int;
pub type h2n_send_action = unsafe extern "C" fn(msg: *mut h2n_action_message) -> c_int;
pub type h2n_send_street = unsafe extern "C" fn(msg: *mut h2n_street_message) -> c_int;
pub type h2n_send_json = unsafe extern "C" fn(json_str: *const c_char) -> c_int;
pub type h2n_send_command =
    unsafe extern "C" fn(table_hwnd: c_int, room_id: c_int, cmd: c_int) -> c_int;

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{align_of, offset_of, size_of};

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn struct_layouts_match_header() {
        assert_eq!(size_of::<h2n_hh_message>(), 40);
        assert_eq!(offset_of!(h2n_hh_message, gameid), 8);
        assert_eq!(offset_of!(h2n_hh_message, hh_formatted), 24);

        assert_eq!(size_of::<h2n_seat_info>(), 72);
        assert_eq!(offset_of!(h2n_seat_info, stack), 24);
        assert_eq!(offset_of!(h2n_seat_info, is_sitting_out), 68);

        assert_eq!(offset_of!(h2n_start_hand_message, table_name), 16);
        assert_eq!(offset_of!(h2n_start_hand_message, currency), 64);
        assert_eq!(offset_of!(h2n_start_hand_message, sb), 72);
        assert_eq!(offset_of!(h2n_start_hand_message, seats), 104);
        assert_eq!(offset_of!(h2n_start_hand_message, seats_num), 824);
        assert_eq!(size_of::<h2n_start_hand_message>(), 832);

        assert_eq!(size_of::<h2n_action_message>(), 40);
        assert_eq!(offset_of!(h2n_action_message, pot), 32);

        assert_eq!(size_of::<h2n_street_message>(), 32);
        assert_eq!(offset_of!(h2n_street_message, board), 16);

        assert_eq!(align_of::<h2n_start_hand_message>(), 8);
    }

    #[test]
    fn street_values_count_board_cards() {
        assert_eq!(H2N_STREET_PREFLOP, 0);
        assert_eq!(H2N_STREET_FLOP, 3);
        assert_eq!(H2N_STREET_TURN, 4);
        assert_eq!(H2N_STREET_RIVER, 5);
    }

    #[test]
    fn empty_seat_is_zeroed() {
        let seat = h2n_seat_info::EMPTY;
        assert!(seat.nickname.is_null());
        assert!(seat.player_id.is_null());
        assert!(seat.pocket_cards.is_null());
        assert_eq!(seat.is_hero, 0);
    }
}
