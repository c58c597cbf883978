use std::fmt;

use super::color::PlayerColor;

/// Identity of one of the two players. Player one always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// Get the other player
    pub fn other(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// The 1-based number shown to users
    pub fn number(self) -> u8 {
        match self {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }

    /// Index into the session's player pair
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub color: PlayerColor,
}

impl Player {
    pub fn new(id: PlayerId, color: PlayerColor) -> Self {
        Player { id, color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(PlayerId::One.other(), PlayerId::Two);
        assert_eq!(PlayerId::Two.other(), PlayerId::One);
    }

    #[test]
    fn test_player_number_and_index() {
        assert_eq!(PlayerId::One.number(), 1);
        assert_eq!(PlayerId::Two.number(), 2);
        assert_eq!(PlayerId::One.index(), 0);
        assert_eq!(PlayerId::Two.index(), 1);
    }

    #[test]
    fn test_player_display() {
        assert_eq!(PlayerId::Two.to_string(), "Player 2");
    }
}
