use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A war challenge issued by one guild against another.
///
/// Guilds and arenas are referenced by id; the owning managers resolve
/// them. Player lists hold player ids in join order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildChallenge {
    pub id: Uuid,
    pub challenger: Uuid,
    pub defender: Uuid,
    #[serde(default)]
    pub accepted: bool,
    /// Seconds players have to join once the challenge is accepted.
    pub join_period: u64,
    pub min_players: u32,
    pub max_players: u32,
    #[serde(default)]
    pub arena: Option<Uuid>,
    #[serde(default)]
    pub challenge_players: Vec<Uuid>,
    #[serde(default)]
    pub defend_players: Vec<Uuid>,
    #[serde(default)]
    pub winner: Option<Uuid>,
    #[serde(default)]
    pub loser: Option<Uuid>,
    #[serde(default)]
    pub started: bool,
    #[serde(default)]
    pub completed: bool,
}

impl GuildChallenge {
    pub fn new(
        challenger: Uuid,
        defender: Uuid,
        join_period: u64,
        min_players: u32,
        max_players: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            challenger,
            defender,
            accepted: false,
            join_period,
            min_players,
            max_players,
            arena: None,
            challenge_players: Vec::new(),
            defend_players: Vec::new(),
            winner: None,
            loser: None,
            started: false,
            completed: false,
        }
    }

    /// Whether `guild` is either side of this challenge.
    pub fn involves(&self, guild: Uuid) -> bool {
        self.challenger == guild || self.defender == guild
    }

    /// Both sides have at least `min_players` signed up.
    pub fn has_enough_players(&self) -> bool {
        let min = self.min_players as usize;
        self.challenge_players.len() >= min && self.defend_players.len() >= min
    }

    /// Record the outcome. Returns false if `winner` is not a side of the challenge.
    pub fn declare_winner(&mut self, winner: Uuid) -> bool {
        let loser = if winner == self.challenger {
            self.defender
        } else if winner == self.defender {
            self.challenger
        } else {
            return false;
        };
        self.winner = Some(winner);
        self.loser = Some(loser);
        self.completed = true;
        true
    }
}
