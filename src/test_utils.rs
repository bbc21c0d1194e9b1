//! Test doubles for the native API and the liveness monitor.
//!
//! [`MockTracker`] stands in for `h2napi.dll`: it decodes every raw struct it
//! receives back into owned messages, so tests can assert on exactly what
//! would have crossed the C boundary.

#![cfg(any(test, feature = "benchmark"))]

use std::collections::VecDeque;
use std::ffi::CStr;
use std::os::raw::c_char;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use crate::monitor::Transition;
use crate::{
    Action, Currency, HandActionMessage, HandHistoryFormat, HandHistoryMessage,
    HandStartMessage, LivenessProbe, Result, Room, SeatInfo, Street, StreetMessage, TrackerApi,
    ffi,
};

/// A message as received by [`MockTracker`].
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    HandHistory(HandHistoryMessage),
    HandStart(HandStartMessage),
    Action(HandActionMessage),
    Street(StreetMessage),
    Json(String),
    Command { table_window: i32, room: i32, command: i32 },
}

/// In-memory [`TrackerApi`] recording every delivery.
#[derive(Debug, Default)]
pub struct MockTracker {
    running: AtomicBool,
    result_code: AtomicI32,
    deliveries: Mutex<Vec<Delivery>>,
}

impl MockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn running() -> Self {
        let mock = Self::default();
        mock.set_running(true);
        mock
    }

    pub fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::SeqCst);
    }

    /// Result code returned by every subsequent `send_*`.
    pub fn set_result_code(&self, code: i32) {
        self.result_code.store(code, Ordering::SeqCst);
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn clear(&self) {
        self.deliveries.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    fn record(&self, delivery: Delivery) -> Result<i32> {
        self.deliveries.lock().unwrap_or_else(PoisonError::into_inner).push(delivery);
        Ok(self.result_code.load(Ordering::SeqCst))
    }
}

/// Stable FNV-1a hash, used for deterministic fake table names.
fn fnv1a(bytes: impl IntoIterator<Item = u8>) -> u64 {
    bytes.into_iter().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

fn text(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    // SAFETY: pointers handed to a TrackerApi come from live CStrings.
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

fn seat(raw: &ffi::h2n_seat_info) -> SeatInfo {
    SeatInfo {
        seat_index: raw.seat_idx as u32,
        nickname: text(raw.nickname),
        player_id: text(raw.player_id),
        initial_stack: raw.stack,
        pocket_cards: text(raw.pocket_cards),
        is_dealer: raw.is_dealer != 0,
        is_posted_small_blind: raw.is_posted_sb != 0,
        is_posted_big_blind: raw.is_posted_bb != 0,
        is_posted_small_blind_out_of_queue: raw.is_posted_sb_outofqueue != 0,
        is_posted_big_blind_out_of_queue: raw.is_posted_bb_outofqueue != 0,
        is_posted_straddle: raw.is_posted_straddle != 0,
        is_hero: raw.is_hero != 0,
        is_sitting_out: raw.is_sitting_out != 0,
    }
}

impl TrackerApi for MockTracker {
    fn is_running(&self) -> Result<bool> {
        Ok(self.running.load(Ordering::SeqCst))
    }

    fn make_table_name(&self, room: Room, original_name: &CStr) -> Result<String> {
        let bytes = room.wire().to_le_bytes().into_iter();
        let hash = fnv1a(bytes.chain(original_name.to_bytes().iter().copied()));
        Ok(format!("{room}_{hash:016x}"))
    }

    fn send_hand_history(&self, msg: &mut ffi::h2n_hh_message) -> Result<i32> {
        self.record(Delivery::HandHistory(HandHistoryMessage {
            room: Room::from_wire(msg.room).unwrap_or_default(),
            game_number: msg.gameid as u64,
            is_zoom: msg.is_zoom != 0,
            format: HandHistoryFormat::from_wire(msg.format).unwrap_or_default(),
            hand_history: text(msg.hh_formatted),
            original_hand_history: text(msg.hh_original),
        }))
    }

    fn send_hand_start(&self, msg: &mut ffi::h2n_start_hand_message) -> Result<i32> {
        let count = usize::try_from(msg.seats_num).unwrap_or(0).min(ffi::H2N_MAX_SEATS);
        self.record(Delivery::HandStart(HandStartMessage {
            room: Room::from_wire(msg.room).unwrap_or_default(),
            game_number: msg.gameid as u64,
            table_name: text(msg.table_name),
            table_window: msg.table_hwnd,
            table_size: msg.max_players as u32,
            is_tourney: msg.is_tourney != 0,
            is_omaha: msg.is_omaha != 0,
            is_limit: msg.is_limit != 0,
            is_zoom: msg.is_zoom != 0,
            is_cap: msg.is_cap != 0,
            is_pot_limit: msg.is_potlimit != 0,
            is_short_deck: msg.is_shortdeck != 0,
            is_omaha_five: msg.is_omahafive != 0,
            currency: Currency::from_wire(msg.currency).unwrap_or_default(),
            small_blind: msg.sb,
            big_blind: msg.bb,
            ante: msg.ante,
            straddle: msg.straddle,
            seats: msg.seats[..count].iter().map(seat).collect(),
        }))
    }

    fn send_action(&self, msg: &mut ffi::h2n_action_message) -> Result<i32> {
        self.record(Delivery::Action(HandActionMessage {
            game_number: msg.gameid as u64,
            seat_index: msg.seat_idx as u32,
            action: Action::from_wire(msg.r#type).unwrap_or_default(),
            amount: msg.amount,
            is_all_in: msg.is_allin != 0,
            pot: msg.pot,
        }))
    }

    fn send_street(&self, msg: &mut ffi::h2n_street_message) -> Result<i32> {
        self.record(Delivery::Street(StreetMessage {
            game_number: msg.gameid as u64,
            street: Street::from_wire(msg.r#type).unwrap_or_default(),
            board: text(msg.board),
            pot: msg.pot,
        }))
    }

    fn send_json(&self, json: &CStr) -> Result<i32> {
        self.record(Delivery::Json(json.to_string_lossy().into_owned()))
    }

    fn send_command(&self, table_window: i32, room: i32, command: i32) -> Result<i32> {
        self.record(Delivery::Command { table_window, room, command })
    }
}

/// Probe whose reading is flipped by the test.
#[derive(Debug, Clone, Default)]
pub struct SwitchProbe {
    running: Arc<AtomicBool>,
    alternate: bool,
    polls: Arc<AtomicUsize>,
}

impl SwitchProbe {
    pub fn new(running: bool) -> Self {
        Self { running: Arc::new(AtomicBool::new(running)), ..Self::default() }
    }

    /// Probe that flips its reading on every poll.
    pub fn alternating() -> Self {
        Self { alternate: true, ..Self::default() }
    }

    pub fn set(&self, running: bool) {
        self.running.store(running, Ordering::SeqCst);
    }

    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }
}

impl LivenessProbe for SwitchProbe {
    fn probe(&self) -> Result<bool> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        if self.alternate {
            Ok(!self.running.fetch_xor(true, Ordering::SeqCst))
        } else {
            Ok(self.running.load(Ordering::SeqCst))
        }
    }
}

/// Probe replaying a fixed script, then repeating its last successful reading.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProbe {
    script: Arc<Mutex<VecDeque<Result<bool>>>>,
    last: Arc<AtomicBool>,
    polls: Arc<AtomicUsize>,
}

impl ScriptedProbe {
    pub fn new(script: impl IntoIterator<Item = Result<bool>>) -> Self {
        Self { script: Arc::new(Mutex::new(script.into_iter().collect())), ..Self::default() }
    }

    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }
}

impl LivenessProbe for ScriptedProbe {
    fn probe(&self) -> Result<bool> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap_or_else(PoisonError::into_inner).pop_front();
        match next {
            Some(Ok(running)) => {
                self.last.store(running, Ordering::SeqCst);
                Ok(running)
            }
            Some(Err(error)) => Err(error),
            None => Ok(self.last.load(Ordering::SeqCst)),
        }
    }
}

/// Shared record of fired transitions.
#[derive(Debug, Clone, Default)]
pub struct TransitionLog(Arc<Mutex<Vec<Transition>>>);

impl TransitionLog {
    pub fn push(&self, transition: Transition) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).push(transition);
    }

    pub fn snapshot(&self) -> Vec<Transition> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Poll `condition` until it holds or `timeout` elapses.
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if condition() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        thread::sleep(Duration::from_millis(1));
    }
}

/// Nine-handed cash game hand start with every seat filled.
pub fn full_ring_hand_start(game_number: u64) -> HandStartMessage {
    let seats = (0..9)
        .map(|index| {
            let seat = SeatInfo::new(index, format!("player_{index}"), 100.0 + f64::from(index))
                .with_player_id(format!("{}", 1000 + index));
            match index {
                0 => seat.dealer(),
                1 => SeatInfo { is_posted_small_blind: true, ..seat },
                2 => SeatInfo { is_posted_big_blind: true, ..seat },
                4 => seat.hero().with_pocket_cards("AsKd"),
                _ => seat,
            }
        })
        .collect();

    HandStartMessage {
        table_name: "Aldebaran IV".into(),
        table_window: 0x0004_0a3c,
        table_size: 9,
        small_blind: 0.5,
        big_blind: 1.0,
        seats,
        ..HandStartMessage::new(Room::PokerStars, game_number)
    }
}

