//! Hand start snapshot

use serde::{Deserialize, Serialize};

use super::{SeatInfo, validate_amount, validate_game_number};
use crate::ffi::H2N_MAX_SEATS;
use crate::{ApiError, Currency, Result, Room};

/// Setup of a hand at the moment it begins: stakes, game flags and seats.
///
/// Followed by [`crate::HandActionMessage`] and [`crate::StreetMessage`]
/// updates for the same `game_number` while the hand is played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(default)]
pub struct HandStartMessage {
    pub room: Room,
    pub game_number: u64,
    /// Room-defining table name, see [`crate::Hand2Note::make_table_name`]
    pub table_name: String,
    /// Window handle (HWND) the HUD attaches to
    pub table_window: i32,
    /// Table max players: 2-max, 6-max, 9-max...
    pub table_size: u32,
    pub is_tourney: bool,
    pub is_omaha: bool,
    /// Fixed limit
    pub is_limit: bool,
    /// Zoom, fast-fold or boost pool
    pub is_zoom: bool,
    pub is_cap: bool,
    pub is_pot_limit: bool,
    pub is_short_deck: bool,
    pub is_omaha_five: bool,
    pub currency: Currency,
    pub small_blind: f64,
    pub big_blind: f64,
    pub ante: f64,
    /// Always set when there is a straddle
    pub straddle: f64,
    /// At most ten seats
    pub seats: Vec<SeatInfo>,
}

impl Default for HandStartMessage {
    fn default() -> Self {
        Self {
            room: Room::default(),
            game_number: 0,
            table_name: String::new(),
            table_window: 0,
            table_size: H2N_MAX_SEATS as u32,
            is_tourney: false,
            is_omaha: false,
            is_limit: false,
            is_zoom: false,
            is_cap: false,
            is_pot_limit: false,
            is_short_deck: false,
            is_omaha_five: false,
            currency: Currency::default(),
            small_blind: 0.0,
            big_blind: 0.0,
            ante: 0.0,
            straddle: 0.0,
            seats: Vec::new(),
        }
    }
}

impl HandStartMessage {
    pub fn new(room: Room, game_number: u64) -> Self {
        Self { room, game_number, ..Self::default() }
    }

    /// The hero seat, if one is flagged.
    pub fn hero(&self) -> Option<&SeatInfo> {
        self.seats.iter().find(|s| s.is_hero)
    }

    /// The dealer seat, if one is flagged.
    pub fn dealer(&self) -> Option<&SeatInfo> {
        self.seats.iter().find(|s| s.is_dealer)
    }

    /// Check the message can be delivered.
    ///
    /// The seat list is never truncated: more than ten seats is an error.
    pub fn validate(&self) -> Result<()> {
        if self.seats.len() > H2N_MAX_SEATS {
            return Err(ApiError::TooManySeats { count: self.seats.len(), max: H2N_MAX_SEATS });
        }
        if self.table_name.is_empty() {
            return Err(ApiError::missing_field("HandStartMessage", "table_name"));
        }
        if self.table_size == 0 || self.table_size as usize > H2N_MAX_SEATS {
            return Err(ApiError::invalid_field(
                "table_size",
                format!("{} is outside 1..={H2N_MAX_SEATS}", self.table_size),
            ));
        }
        validate_game_number(self.game_number)?;
        validate_amount("small_blind", self.small_blind)?;
        validate_amount("big_blind", self.big_blind)?;
        validate_amount("ante", self.ante)?;
        validate_amount("straddle", self.straddle)?;

        let mut taken = [false; H2N_MAX_SEATS];
        for seat in &self.seats {
            if seat.seat_index >= self.table_size {
                return Err(ApiError::invalid_field(
                    "seat_index",
                    format!("seat {} on a {}-max table", seat.seat_index, self.table_size),
                ));
            }
            let slot = &mut taken[seat.seat_index as usize];
            if *slot {
                return Err(ApiError::invalid_field(
                    "seat_index",
                    format!("seat {} listed twice", seat.seat_index),
                ));
            }
            *slot = true;
            if !seat.is_identified() {
                return Err(ApiError::missing_field("SeatInfo", "nickname"));
            }
            validate_amount("initial_stack", seat.initial_stack)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn nine_max() -> HandStartMessage {
        HandStartMessage {
            table_name: "FSHP1829312".into(),
            table_size: 9,
            currency: Currency::Yuan,
            small_blind: 0.25,
            big_blind: 0.5,
            ante: 0.25,
            seats: vec![
                SeatInfo::new(0, "无能为力", 109.54),
                SeatInfo::new(2, "张琳", 168.45),
                SeatInfo::new(3, "天天大水上", 59.26),
                SeatInfo::new(4, "安排！", 48.14),
                SeatInfo::new(6, "木樽", 247.19).dealer(),
                SeatInfo::new(7, "德州小丑王", 53.82).hero(),
            ],
            ..HandStartMessage::new(Room::FishPokers, 2416948123)
        }
    }

    #[test]
    fn well_formed_hand_validates() {
        let msg = nine_max();
        assert!(msg.validate().is_ok());
        assert_eq!(msg.hero().map(|s| s.seat_index), Some(7));
        assert_eq!(msg.dealer().map(|s| s.seat_index), Some(6));
    }

    #[test]
    fn eleven_seats_are_rejected_not_truncated() {
        let mut msg = nine_max();
        msg.table_size = 10;
        msg.seats = (0..11).map(|i| SeatInfo::new(i % 10, format!("p{i}"), 100.0)).collect();
        match msg.validate() {
            Err(ApiError::TooManySeats { count, max }) => {
                assert_eq!(count, 11);
                assert_eq!(max, 10);
            }
            other => panic!("expected TooManySeats, got {other:?}"),
        }
    }

    #[test]
    fn missing_table_name_is_rejected() {
        let mut msg = nine_max();
        msg.table_name.clear();
        assert!(matches!(msg.validate(), Err(ApiError::MissingField { field: "table_name", .. })));
    }

    #[test]
    fn seat_outside_table_is_rejected() {
        let mut msg = nine_max();
        msg.seats.push(SeatInfo::new(9, "late", 10.0));
        assert!(matches!(msg.validate(), Err(ApiError::InvalidField { field: "seat_index", .. })));
    }

    #[test]
    fn duplicate_seat_is_rejected() {
        let mut msg = nine_max();
        msg.seats.push(SeatInfo::new(2, "again", 10.0));
        assert!(matches!(msg.validate(), Err(ApiError::InvalidField { field: "seat_index", .. })));
    }

    #[test]
    fn anonymous_seat_is_rejected() {
        let mut msg = nine_max();
        msg.seats.push(SeatInfo { seat_index: 8, ..SeatInfo::default() });
        assert!(matches!(msg.validate(), Err(ApiError::MissingField { message: "SeatInfo", .. })));
    }

    #[test]
    fn table_size_bounds() {
        let mut msg = nine_max();
        msg.seats.clear();
        msg.table_size = 0;
        assert!(msg.validate().is_err());
        msg.table_size = 11;
        assert!(msg.validate().is_err());
        msg.table_size = 2;
        assert!(msg.validate().is_ok());
    }

    #[test]
    fn default_table_is_ten_max_dollars() {
        let msg = HandStartMessage::default();
        assert_eq!(msg.table_size, 10);
        assert_eq!(msg.currency, Currency::Dollar);
        assert_eq!(msg.straddle, 0.0);
        assert!(!msg.is_cap && !msg.is_limit && !msg.is_omaha && !msg.is_pot_limit);
        assert!(!msg.is_tourney && !msg.is_zoom);
    }

    proptest! {
        #[test]
        fn seat_count_over_capacity_always_fails(extra in 1usize..20) {
            let mut msg = nine_max();
            msg.seats = (0..H2N_MAX_SEATS + extra)
                .map(|i| SeatInfo::new(i as u32, format!("p{i}"), 1.0))
                .collect();
            let is_too_many = matches!(msg.validate(), Err(ApiError::TooManySeats { .. }));
            prop_assert!(is_too_many);
        }

        #[test]
        fn distinct_in_range_seats_always_pass(
            table_size in 2u32..=10,
            picks in prop::collection::btree_set(0u32..10, 0..10)
        ) {
            let mut msg = nine_max();
            msg.table_size = table_size;
            msg.seats = picks
                .into_iter()
                .filter(|i| *i < table_size)
                .map(|i| SeatInfo::new(i, format!("p{i}"), 50.0))
                .collect();
            prop_assert!(msg.validate().is_ok());
        }
    }
}
