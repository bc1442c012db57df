use core::cmp::Ordering;
use core::fmt;

/// Danger penalty applied to utility; margins of this size or more are free.
pub const DANGER_HORIZON: u32 = 7;

/// How much time an agent arriving at a cell has before it becomes lethal.
///
/// Ordered from worst to best: `Lethal` < `ExplodesIn(small)` <
/// `ExplodesIn(large)` < `Unthreatened`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Safety {
    /// No blast catches the agent here: none is coming, or it came and went
    /// before arrival.
    Unthreatened,
    /// Turns of margin left on arrival; always at least 2.
    ExplodesIn(u32),
    /// Arrival coincides with the blast, or the cell was never reached.
    #[default]
    Lethal,
}

impl Safety {
    /// The blast lands on the turn after this one.
    pub const IMMINENT: Safety = Safety::ExplodesIn(2);

    /// Safety of a cell reached after `distance` moves when its blast is due
    /// in `time` turns (0 = never).
    pub const fn on_arrival(time: u32, distance: u32) -> Self {
        if time == 0 || time <= distance {
            Safety::Unthreatened
        } else if time - distance == 1 {
            Safety::Lethal
        } else {
            Safety::ExplodesIn(time - distance)
        }
    }

    pub const fn is_unthreatened(self) -> bool {
        matches!(self, Safety::Unthreatened)
    }

    pub const fn is_lethal(self) -> bool {
        matches!(self, Safety::Lethal)
    }

    /// Own cell blows up next turn (or with this very move).
    pub const fn needs_dodge(self) -> bool {
        matches!(self, Safety::Lethal | Safety::ExplodesIn(2))
    }

    /// Total order key; larger is safer.
    pub const fn rank(self) -> u32 {
        match self {
            Safety::Lethal => 0,
            Safety::ExplodesIn(margin) => margin,
            Safety::Unthreatened => u32::MAX,
        }
    }

    /// Utility subtracted for standing on a cell with this safety.
    pub const fn penalty(self) -> u32 {
        match self {
            Safety::Unthreatened => 0,
            Safety::ExplodesIn(margin) => DANGER_HORIZON.saturating_sub(margin),
            Safety::Lethal => DANGER_HORIZON,
        }
    }
}

impl Ord for Safety {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Safety {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Safety {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Safety::Unthreatened => f.write_str("-"),
            Safety::ExplodesIn(margin) => write!(f, "{margin}"),
            Safety::Lethal => f.write_str("!"),
        }
    }
}
