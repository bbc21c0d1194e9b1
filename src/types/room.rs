//! Poker room identifiers

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr, IntoStaticStr};

use crate::ffi;

/// Poker room a message originates from.
///
/// Discriminants are the `H2N_ROOM_*` wire values and must not change.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    FromRepr,
    IntoStaticStr,
)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[repr(i32)]
pub enum Room {
    Unrecognized = ffi::H2N_ROOM_UNRECOGNIZED,
    Baazi = ffi::H2N_ROOM_BAAZI,
    CheckRaise = ffi::H2N_ROOM_CHECKRAISE,
    BetSense = ffi::H2N_ROOM_BETSENSE,
    MonkeyBet = ffi::H2N_ROOM_MONKEYBET,
    Fulpot = ffi::H2N_ROOM_FULPOT,
    Microgaming = ffi::H2N_ROOM_MICROGAMING,
    Winamax = ffi::H2N_ROOM_WINAMAX,
    #[default]
    PokerStars = ffi::H2N_ROOM_POKERSTARS,
    PartyPoker = ffi::H2N_ROOM_PARTYPOKER,
    Dollaro = ffi::H2N_ROOM_DOLLARO,
    IPoker = ffi::H2N_ROOM_IPOKER,
    Pacific = ffi::H2N_ROOM_PACIFIC,
    WinningPokerNetwork = ffi::H2N_ROOM_WINNINGPOKERNETWORK,
    GgNet = ffi::H2N_ROOM_GGNET,
    ENetPoker = ffi::H2N_ROOM_ENETPOKER,
    KlasPoker = ffi::H2N_ROOM_KLASPOKER,
    PokerWorld = ffi::H2N_ROOM_POKERWORLD,
    OurGame = ffi::H2N_ROOM_OURGAME,
    BetOnline = ffi::H2N_ROOM_BETONLINE,
    BigBetGe = ffi::H2N_ROOM_BIGBETGE,
    BluffOnline = ffi::H2N_ROOM_BLUFFONLINE,
    BluffDaddy = ffi::H2N_ROOM_BLUFFDADDY,
    ColombiaPokerLive = ffi::H2N_ROOM_COLOMBIAPOKERLIVE,
    EuropeBetCom = ffi::H2N_ROOM_EUROPEBETCOM,
    FtrPoker = ffi::H2N_ROOM_FTRPOKER,
    PokerGdfPlay = ffi::H2N_ROOM_POKERGDFPLAY,
    HighRollers = ffi::H2N_ROOM_HIGHROLLERS,
    ItalyLivePoker = ffi::H2N_ROOM_ITALYLIVEPOKER,
    PokerMania = ffi::H2N_ROOM_POKERMANIA,
    PokerMira = ffi::H2N_ROOM_POKERMIRA,
    Pokerdom = ffi::H2N_ROOM_POKERDOM,
    PokerMatch = ffi::H2N_ROOM_POKERMATCH,
    RedArgentinaDePoker = ffi::H2N_ROOM_REDARGENTINADEPOKER,
    SekabetCom = ffi::H2N_ROOM_SEKABETCOM,
    Sekabet = ffi::H2N_ROOM_SEKABET,
    SpartanPokerCom = ffi::H2N_ROOM_SPARTANPOKERCOM,
    SportsBetting = ffi::H2N_ROOM_SPORTSBETTING,
    TigerGaming = ffi::H2N_ROOM_TIGERGAMING,
    VenezuelaPokerLive = ffi::H2N_ROOM_VENEZUELAPOKERLIVE,
    XMaster = ffi::H2N_ROOM_XMASTER,
    PokerGrant = ffi::H2N_ROOM_POKERGRANT,
    GrandPokerEu = ffi::H2N_ROOM_GRANDPOKEREU,
    RevolutionBets = ffi::H2N_ROOM_REVOLUTIONBETS,
    VBet = ffi::H2N_ROOM_VBET,
    Win2Day = ffi::H2N_ROOM_WIN2DAY,
    WWin = ffi::H2N_ROOM_WWIN,
    PokerMaster = ffi::H2N_ROOM_POKERMASTER,
    PlanetWin365 = ffi::H2N_ROOM_PLANETWIN365,
    AconcaguaPoker = ffi::H2N_ROOM_ACONCAGUAPOKER,
    BrasilPokerLive = ffi::H2N_ROOM_BRASILPOKERLIVE,
    SurPokerDeLasAmericas = ffi::H2N_ROOM_SURPOKERDELASAMERICAS,
    ChilePokerLive = ffi::H2N_ROOM_CHILEPOKERLIVE,
    BoliviaPokerLive = ffi::H2N_ROOM_BOLIVIAPOKERLIVE,
    CostaRicaPokerLive = ffi::H2N_ROOM_COSTARICAPOKERLIVE,
    GuaraniPokerLive = ffi::H2N_ROOM_GUARANIPOKERLIVE,
    MexicoPokerLive = ffi::H2N_ROOM_MEXICOPOKERLIVE,
    PeruPokerLive = ffi::H2N_ROOM_PERUPOKERLIVE,
    PpPoker = ffi::H2N_ROOM_PPPOKER,
    PokerKingdom = ffi::H2N_ROOM_POKERKINGDOM,
    PokerKing = ffi::H2N_ROOM_POKERKING,
    FishPokers = ffi::H2N_ROOM_FISHPOKERS,
    OhPoker = ffi::H2N_ROOM_OHPOKER,
    OnePs = ffi::H2N_ROOM_ONEPS,
    PokerClans = ffi::H2N_ROOM_POKERCLANS,
    KkPoker = ffi::H2N_ROOM_KKPOKER,
}

impl Room {
    /// Wire value passed to `h2napi`.
    pub const fn wire(self) -> i32 {
        self as i32
    }

    /// Look up a room by its wire value.
    pub fn from_wire(value: i32) -> Option<Self> {
        Self::from_repr(value)
    }
}
