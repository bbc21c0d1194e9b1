//! Seat records of a hand start

use serde::{Deserialize, Serialize};

/// One occupied seat at the moment a hand starts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(default)]
pub struct SeatInfo {
    /// Seat index in `0..table_size`; seat 0 sits at six o'clock
    pub seat_index: u32,
    /// Visible nickname (on Chinese rooms, the nickname as displayed)
    pub nickname: String,
    /// Room-side player id; fill it in when available, else leave empty
    pub player_id: String,
    /// Stack before blinds and antes
    pub initial_stack: f64,
    /// Pocket cards such as `6sKcTdAh`; may be empty even for the hero
    pub pocket_cards: String,
    pub is_dealer: bool,
    pub is_posted_small_blind: bool,
    pub is_posted_big_blind: bool,
    /// Dead small blind
    pub is_posted_small_blind_out_of_queue: bool,
    /// Entry bet
    pub is_posted_big_blind_out_of_queue: bool,
    pub is_posted_straddle: bool,
    /// Hero seat; HUDs are arranged around the preferred seat from it
    pub is_hero: bool,
    pub is_sitting_out: bool,
}

impl SeatInfo {
    pub fn new(seat_index: u32, nickname: impl Into<String>, initial_stack: f64) -> Self {
        Self { seat_index, nickname: nickname.into(), initial_stack, ..Self::default() }
    }

    pub fn with_player_id(mut self, player_id: impl Into<String>) -> Self {
        self.player_id = player_id.into();
        self
    }

    pub fn with_pocket_cards(mut self, cards: impl Into<String>) -> Self {
        self.pocket_cards = cards.into();
        self
    }

    pub fn hero(mut self) -> Self {
        self.is_hero = true;
        self
    }

    pub fn dealer(mut self) -> Self {
        self.is_dealer = true;
        self
    }

    /// Whether the seat can be attributed to a player.
    pub fn is_identified(&self) -> bool {
        !self.nickname.is_empty() || !self.player_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_seat_has_no_flags() {
        let seat = SeatInfo::new(3, "张琳", 168.45);
        assert!(!seat.is_dealer && !seat.is_hero && !seat.is_posted_small_blind);
        assert!(!seat.is_posted_big_blind && !seat.is_posted_straddle && !seat.is_sitting_out);
        assert!(seat.pocket_cards.is_empty());
        assert!(seat.is_identified());
    }

    #[test]
    fn player_id_alone_identifies_a_seat() {
        let seat = SeatInfo { player_id: "10234".into(), ..SeatInfo::default() };
        assert!(seat.is_identified());
        assert!(!SeatInfo::default().is_identified());
    }

    #[test]
    fn builder_helpers_set_flags() {
        let seat = SeatInfo::new(7, "木樽", 247.19).dealer().hero().with_pocket_cards("AhKd");
        assert!(seat.is_dealer);
        assert!(seat.is_hero);
        assert_eq!(seat.pocket_cards, "AhKd");
    }
}
