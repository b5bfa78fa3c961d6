use common::Move;

use crate::config::MAX_HISTORY_CAP;

/// The opponent's recent moves, oldest first, capped at a fixed length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    moves: Vec<Move>,
    cap: usize,
}

impl History {
    pub fn new(cap: usize) -> Self {
        History {
            moves: Vec::with_capacity(cap.min(MAX_HISTORY_CAP) + 1),
            cap,
        }
    }

    pub fn push(&mut self, value: Move) {
        self.moves.push(value);
        if self.moves.len() > self.cap {
            let excess = self.moves.len() - self.cap;
            self.moves.drain(..excess);
        }
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn last(&self) -> Option<Move> {
        self.moves.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_chronological_order() {
        let mut history = History::new(50);
        history.push(Move::Rock);
        history.push(Move::Paper);
        history.push(Move::Scissors);
        assert_eq!(
            history.as_slice(),
            &[Move::Rock, Move::Paper, Move::Scissors]
        );
        assert_eq!(history.last(), Some(Move::Scissors));
    }

    #[test]
    fn evicts_oldest_past_cap() {
        let mut history = History::new(50);
        let pushed: Vec<Move> = (0..51).map(|i| Move::ALL[i % 3]).collect();
        for &m in &pushed {
            history.push(m);
        }
        assert_eq!(history.len(), 50);
        assert_eq!(history.as_slice(), &pushed[1..]);
    }

    #[test]
    fn clear_empties() {
        let mut history = History::new(6);
        history.push(Move::Rock);
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.last(), None);
    }
}
