//! Battle display attributes and the assembled battle result.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::item::CatalogItem;
use crate::grouping::{group_by_name, CaseGroup};

/// Rule set the battle is played with. Always drawn at random.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    #[serde(rename = "NORMAL")]
    Normal,
    #[serde(rename = "CRAZY")]
    Crazy,
    #[serde(rename = "NORMAL JP")]
    NormalJackpot,
    #[serde(rename = "CRAZY JP")]
    CrazyJackpot,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [
        GameMode::Normal,
        GameMode::Crazy,
        GameMode::NormalJackpot,
        GameMode::CrazyJackpot,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GameMode::Normal => "NORMAL",
            GameMode::Crazy => "CRAZY",
            GameMode::NormalJackpot => "NORMAL JP",
            GameMode::CrazyJackpot => "CRAZY JP",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Team layout of the battle (`2v2` is two teams of two players).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PlayerConfig {
    OneVsOne,
    #[default]
    ThreeWay,
    FourWay,
    SixWay,
    TwoVsTwo,
    TwoVsTwoVsTwo,
    ThreeVsThree,
}

impl PlayerConfig {
    pub const ALL: [PlayerConfig; 7] = [
        PlayerConfig::OneVsOne,
        PlayerConfig::ThreeWay,
        PlayerConfig::FourWay,
        PlayerConfig::SixWay,
        PlayerConfig::TwoVsTwo,
        PlayerConfig::TwoVsTwoVsTwo,
        PlayerConfig::ThreeVsThree,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PlayerConfig::OneVsOne => "1v1",
            PlayerConfig::ThreeWay => "1v1v1",
            PlayerConfig::FourWay => "1v1v1v1",
            PlayerConfig::SixWay => "1v1v1v1v1v1",
            PlayerConfig::TwoVsTwo => "2v2",
            PlayerConfig::TwoVsTwoVsTwo => "2v2v2",
            PlayerConfig::ThreeVsThree => "3v3",
        }
    }

    /// Player count per team, one entry per team.
    pub fn teams(self) -> &'static [u8] {
        match self {
            PlayerConfig::OneVsOne => &[1, 1],
            PlayerConfig::ThreeWay => &[1, 1, 1],
            PlayerConfig::FourWay => &[1, 1, 1, 1],
            PlayerConfig::SixWay => &[1, 1, 1, 1, 1, 1],
            PlayerConfig::TwoVsTwo => &[2, 2],
            PlayerConfig::TwoVsTwoVsTwo => &[2, 2, 2],
            PlayerConfig::ThreeVsThree => &[3, 3],
        }
    }

    pub fn player_count(self) -> usize {
        self.teams().iter().map(|&n| n as usize).sum()
    }
}

impl fmt::Display for PlayerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PlayerConfig {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|cfg| cfg.label() == wanted)
            .ok_or_else(|| format!("unknown player configuration '{s}'"))
    }
}

impl TryFrom<String> for PlayerConfig {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PlayerConfig> for String {
    fn from(cfg: PlayerConfig) -> Self {
        cfg.label().to_string()
    }
}

/// How the player configuration is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleMode {
    Fixed(PlayerConfig),
    Random,
}

impl Default for BattleMode {
    fn default() -> Self {
        BattleMode::Fixed(PlayerConfig::default())
    }
}

/// A generated battle: the selected cases plus display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleResult {
    pub total_value: f64,
    pub total_cases: usize,
    pub requested_cases: usize,
    pub game_mode: GameMode,
    pub player_config: PlayerConfig,
    pub cases: Vec<CatalogItem>,
}

impl BattleResult {
    pub fn new(
        cases: Vec<CatalogItem>,
        requested_cases: usize,
        game_mode: GameMode,
        player_config: PlayerConfig,
    ) -> Self {
        Self {
            total_value: cases.iter().map(|c| c.price).sum(),
            total_cases: cases.len(),
            requested_cases,
            game_mode,
            player_config,
            cases,
        }
    }

    /// True when the catalog ran out before every slot was filled.
    pub fn is_exhausted(&self) -> bool {
        self.total_cases < self.requested_cases
    }

    pub fn groups(&self) -> Vec<CaseGroup> {
        group_by_name(&self.cases)
    }
}
