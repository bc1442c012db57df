//! Commands emitted to the game, one per turn.
use std::fmt;

use game_core::Position;

/// What the agent does this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    /// Walk toward the cell.
    Move(Position),
    /// Drop a bomb on the current cell, then walk toward the given cell.
    Bomb(Position),
}

impl Order {
    pub fn target(self) -> Position {
        match self {
            Order::Move(target) | Order::Bomb(target) => target,
        }
    }
}

/// A single output line: `MOVE x y` or `BOMB x y`, optionally followed by a
/// free-form annotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    pub order: Order,
    pub annotation: Option<String>,
}

impl Command {
    pub fn move_to(target: Position) -> Self {
        Self {
            order: Order::Move(target),
            annotation: None,
        }
    }

    pub fn bomb(target: Position) -> Self {
        Self {
            order: Order::Bomb(target),
            annotation: None,
        }
    }

    /// Stay put: a move onto the agent's own cell.
    pub fn wait(position: Position, reason: impl Into<String>) -> Self {
        Self::move_to(position).with_annotation(reason)
    }

    /// Attaches an annotation; line breaks are flattened so the command stays
    /// on one line.
    #[must_use]
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        let annotation: String = annotation.into();
        let annotation = annotation.replace(['\r', '\n'], " ");
        let annotation = annotation.trim();
        self.annotation = (!annotation.is_empty()).then(|| annotation.to_owned());
        self
    }

    pub fn is_bomb(&self) -> bool {
        matches!(self.order, Order::Bomb(_))
    }

    pub fn target(&self) -> Position {
        self.order.target()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (verb, target) = match self.order {
            Order::Move(target) => ("MOVE", target),
            Order::Bomb(target) => ("BOMB", target),
        };
        write!(f, "{verb} {} {}", target.x, target.y)?;
        if let Some(annotation) = &self.annotation {
            write!(f, " {annotation}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_protocol_lines() {
        assert_eq!(Command::move_to(Position::new(3, 4)).to_string(), "MOVE 3 4");
        assert_eq!(Command::bomb(Position::new(0, 10)).to_string(), "BOMB 0 10");
        assert_eq!(
            Command::wait(Position::new(1, 1), "hold\nposition").to_string(),
            "MOVE 1 1 hold position"
        );
        assert_eq!(Command::move_to(Position::ORIGIN).with_annotation("  ").annotation, None);
    }
}
