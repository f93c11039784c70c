//! Tile definitions

use crate::error::{CatalogError, HexError};
use crate::hex::{rotate, Cube};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role a tile plays on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    Center,
    Home,
    System,
    Hyperlane,
    Exterior,
}

impl TileKind {
    /// Classify a printed tile number
    pub fn from_number(number: u16) -> Result<Self, CatalogError> {
        match number {
            1..=17 | 52..=58 => Ok(TileKind::Home),
            18 => Ok(TileKind::Center),
            19..=50 | 59..=80 => Ok(TileKind::System),
            83..=91 => Ok(TileKind::Hyperlane),
            51 | 81 | 82 => Ok(TileKind::Exterior),
            _ => Err(CatalogError::UnknownTileNumber(number)),
        }
    }
}

/// Variant letter for double-sided tiles
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Letter {
    A,
    B,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Blue,
    Green,
    Red,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Release {
    #[serde(rename = "base")]
    Base,
    #[serde(rename = "pok")]
    Pok,
    #[serde(rename = "codex-3")]
    Codex3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wormhole {
    Alpha,
    Beta,
    Delta,
    Gamma,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trait {
    Cultural,
    Hazardous,
    Industrial,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tech {
    Biotic,
    Cybernetic,
    Propulsion,
    Warfare,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anomaly {
    AsteroidField,
    GravityRift,
    Nebula,
    Supernova,
}

/// Playable factions, serialized by display name
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    #[serde(rename = "The Arborec")]
    Arborec,
    #[serde(rename = "The Argent Flight")]
    Argent,
    #[serde(rename = "The Ghosts of Creuss")]
    Creuss,
    #[serde(rename = "The Empyrean")]
    Empyrean,
    #[serde(rename = "The Emirates of Hacan")]
    Hacan,
    #[serde(rename = "The Universities of Jol-Nar")]
    JolNar,
    #[serde(rename = "The Council Keleres")]
    Keleres,
    #[serde(rename = "The Barony of Letnev")]
    Letnev,
    #[serde(rename = "The Lizix Mindnet")]
    Lizix,
    #[serde(rename = "The Mahact Gene-sorcerers")]
    Mahact,
    #[serde(rename = "The Mentak Coalition")]
    Mentak,
    #[serde(rename = "The Embers of Muaat")]
    Muaat,
    #[serde(rename = "The Naalu Collective")]
    Naalu,
    #[serde(rename = "The Naaz-Rokha Alliance")]
    NaazRokha,
    #[serde(rename = "The Nekro Virus")]
    Nekro,
    #[serde(rename = "The Nomad")]
    Nomad,
    #[serde(rename = "The Clan of Saar")]
    Saar,
    #[serde(rename = "Sardakk N'orr")]
    Sardakk,
    #[serde(rename = "The Federation of Sol")]
    Sol,
    #[serde(rename = "The Titans of Ul")]
    Titans,
    #[serde(rename = "The Vuil'raith Cabal")]
    Vuilraith,
    #[serde(rename = "The Winnu")]
    Winnu,
    #[serde(rename = "The Xxcha Kingdom")]
    Xxcha,
    #[serde(rename = "The Yin Brotherhood")]
    Yin,
    #[serde(rename = "The Yssaril Tribes")]
    Yssaril,
}

/// Home system tile number for each faction that has one
const HOME_TILES: [(Faction, u16); 24] = [
    (Faction::Sol, 1),
    (Faction::Mentak, 2),
    (Faction::Yin, 3),
    (Faction::Muaat, 4),
    (Faction::Arborec, 5),
    (Faction::Lizix, 6),
    (Faction::Winnu, 7),
    (Faction::Nekro, 8),
    (Faction::Naalu, 9),
    (Faction::Letnev, 10),
    (Faction::Saar, 11),
    (Faction::JolNar, 12),
    (Faction::Sardakk, 13),
    (Faction::Xxcha, 14),
    (Faction::Yssaril, 15),
    (Faction::Hacan, 16),
    (Faction::Creuss, 17),
    (Faction::Mahact, 52),
    (Faction::Nomad, 53),
    (Faction::Vuilraith, 54),
    (Faction::Titans, 55),
    (Faction::Empyrean, 56),
    (Faction::NaazRokha, 57),
    (Faction::Argent, 58),
];

impl Faction {
    pub const ALL: [Faction; 25] = [
        Faction::Arborec,
        Faction::Argent,
        Faction::Creuss,
        Faction::Empyrean,
        Faction::Hacan,
        Faction::JolNar,
        Faction::Keleres,
        Faction::Letnev,
        Faction::Lizix,
        Faction::Mahact,
        Faction::Mentak,
        Faction::Muaat,
        Faction::Naalu,
        Faction::NaazRokha,
        Faction::Nekro,
        Faction::Nomad,
        Faction::Saar,
        Faction::Sardakk,
        Faction::Sol,
        Faction::Titans,
        Faction::Vuilraith,
        Faction::Winnu,
        Faction::Xxcha,
        Faction::Yin,
        Faction::Yssaril,
    ];

    /// Tile number of this faction's home system (Keleres has none)
    pub fn home_tile_number(self) -> Option<u16> {
        HOME_TILES
            .iter()
            .find(|(f, _)| *f == self)
            .map(|&(_, n)| n)
    }

    /// Release that introduced this faction
    pub fn release(self) -> Release {
        match self.home_tile_number() {
            Some(1..=17) => Release::Base,
            Some(_) => Release::Pok,
            None => Release::Codex3,
        }
    }

    pub fn from_home_tile_number(number: u16) -> Option<Faction> {
        HOME_TILES
            .iter()
            .find(|(_, n)| *n == number)
            .map(|&(f, _)| f)
    }

    /// Display name, identical to the serialized form
    pub fn name(self) -> &'static str {
        match self {
            Faction::Arborec => "The Arborec",
            Faction::Argent => "The Argent Flight",
            Faction::Creuss => "The Ghosts of Creuss",
            Faction::Empyrean => "The Empyrean",
            Faction::Hacan => "The Emirates of Hacan",
            Faction::JolNar => "The Universities of Jol-Nar",
            Faction::Keleres => "The Council Keleres",
            Faction::Letnev => "The Barony of Letnev",
            Faction::Lizix => "The Lizix Mindnet",
            Faction::Mahact => "The Mahact Gene-sorcerers",
            Faction::Mentak => "The Mentak Coalition",
            Faction::Muaat => "The Embers of Muaat",
            Faction::Naalu => "The Naalu Collective",
            Faction::NaazRokha => "The Naaz-Rokha Alliance",
            Faction::Nekro => "The Nekro Virus",
            Faction::Nomad => "The Nomad",
            Faction::Saar => "The Clan of Saar",
            Faction::Sardakk => "Sardakk N'orr",
            Faction::Sol => "The Federation of Sol",
            Faction::Titans => "The Titans of Ul",
            Faction::Vuilraith => "The Vuil'raith Cabal",
            Faction::Winnu => "The Winnu",
            Faction::Xxcha => "The Xxcha Kingdom",
            Faction::Yin => "The Yin Brotherhood",
            Faction::Yssaril => "The Yssaril Tribes",
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Faction {
    type Err = CatalogError;

    /// Accepts the full name or the short variant name, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Faction::ALL
            .iter()
            .copied()
            .find(|f| {
                f.name().eq_ignore_ascii_case(wanted)
                    || format!("{:?}", f).eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| CatalogError::UnknownFaction(s.to_string()))
    }
}

/// Planet totals of a system
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct System {
    pub resources: u8,
    pub influence: u8,
    pub planets: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub traits: Vec<Trait>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub techs: Vec<Tech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anomaly: Option<Anomaly>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wormhole: Option<Wormhole>,
    #[serde(default)]
    pub legendary: bool,
}

/// Printed tile number plus optional variant letter, e.g. `83A`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCode {
    pub number: u16,
    pub letter: Option<Letter>,
}

impl FromStr for TileCode {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CatalogError::InvalidTileCode(s.to_string());
        let s = s.trim();
        let (digits, letter) = match s.chars().last() {
            Some('A') | Some('a') => (&s[..s.len() - 1], Some(Letter::A)),
            Some('B') | Some('b') => (&s[..s.len() - 1], Some(Letter::B)),
            _ => (s, None),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let number = digits.parse::<u16>().map_err(|_| invalid())?;
        Ok(TileCode { number, letter })
    }
}

impl fmt::Display for TileCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.letter {
            Some(letter) => write!(f, "{}{:?}", self.number, letter),
            None => write!(f, "{}", self.number),
        }
    }
}

/// A physical board tile, or an empty slot template awaiting one
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter: Option<Letter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Cube>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<Release>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faction: Option<Faction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<System>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hyperlanes: Vec<Vec<Cube>>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub rotation: i32,
}

fn is_zero(value: &i32) -> bool {
    *value == 0
}

impl Tile {
    fn slot(kind: TileKind, position: Cube, back: Color) -> Self {
        Self {
            kind,
            number: None,
            letter: None,
            position: Some(position),
            release: None,
            faction: None,
            back: Some(back),
            system: None,
            hyperlanes: Vec::new(),
            rotation: 0,
        }
    }

    /// Empty home slot (green back)
    pub fn home_slot(position: Cube) -> Self {
        Self::slot(TileKind::Home, position, Color::Green)
    }

    /// Empty system slot (blue back)
    pub fn system_slot(position: Cube) -> Self {
        Self::slot(TileKind::System, position, Color::Blue)
    }

    /// True for slot templates that no concrete tile has filled yet
    pub fn is_empty_slot(&self) -> bool {
        self.number.is_none()
    }

    pub fn code(&self) -> Option<TileCode> {
        self.number.map(|number| TileCode {
            number,
            letter: self.letter,
        })
    }

    /// Turn the tile by a multiple of 60 degrees, rotating its hyperlane connectors
    pub fn rotate(&mut self, angle: i32) -> Result<(), HexError> {
        let mut rotated = Vec::with_capacity(self.hyperlanes.len());
        for lane in &self.hyperlanes {
            let lane = lane
                .iter()
                .map(|v| rotate(*v, Cube::ORIGIN, angle))
                .collect::<Result<Vec<_>, _>>()?;
            rotated.push(lane);
        }
        self.hyperlanes = rotated;
        self.rotation = (self.rotation + angle).rem_euclid(360);
        Ok(())
    }
}
