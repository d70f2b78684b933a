//! Sides and unit archetypes.
//!
//! Distinguishes stationary (defensive) from mobile (offensive) archetypes
//! and carries the default placement costs used when the host config does
//! not override them.

/// The two competing sides, always from the agent's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Side {
    Own = 0,
    Enemy = 1,
}

/// Both sides in index order.
pub const ALL_SIDES: [Side; 2] = [Side::Own, Side::Enemy];

impl Side {
    /// The opposing side.
    pub const fn opponent(self) -> Side {
        match self {
            Side::Own => Side::Enemy,
            Side::Enemy => Side::Own,
        }
    }
}

/// Number of mobile archetypes (stacked per cell and side).
pub const MOBILE_KIND_COUNT: usize = 3;

/// A unit archetype. The first three are stationary, the rest mobile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Archetype {
    Wall = 0,
    Support = 1,
    Turret = 2,
    Scout = 3,
    Demolisher = 4,
    Interceptor = 5,
}

/// All archetypes in the host config's `unitInformation` order.
pub const ALL_ARCHETYPES: [Archetype; 6] = [
    Archetype::Wall,
    Archetype::Support,
    Archetype::Turret,
    Archetype::Scout,
    Archetype::Demolisher,
    Archetype::Interceptor,
];

/// The mobile archetypes in stack-index order.
pub const MOBILE_ARCHETYPES: [Archetype; MOBILE_KIND_COUNT] = [
    Archetype::Scout,
    Archetype::Demolisher,
    Archetype::Interceptor,
];

impl Archetype {
    pub const fn is_mobile(self) -> bool {
        matches!(
            self,
            Archetype::Scout | Archetype::Demolisher | Archetype::Interceptor
        )
    }

    pub const fn is_stationary(self) -> bool {
        !self.is_mobile()
    }

    /// Stack slot for mobile archetypes; stationary archetypes have none.
    pub const fn mobile_slot(self) -> Option<usize> {
        match self {
            Archetype::Scout => Some(0),
            Archetype::Demolisher => Some(1),
            Archetype::Interceptor => Some(2),
            _ => None,
        }
    }

    /// Default placement cost: structure points for stationary archetypes,
    /// mobile points for mobile ones. The host config may override these.
    pub const fn default_cost(self) -> f32 {
        match self {
            Archetype::Wall => 1.0,
            Archetype::Support => 4.0,
            Archetype::Turret => 2.0,
            Archetype::Scout => 1.0,
            Archetype::Demolisher => 3.0,
            Archetype::Interceptor => 1.0,
        }
    }

    /// Rows a mobile unit advances per abstract resolution step.
    /// Stationary archetypes do not move.
    pub const fn stride(self) -> u8 {
        match self {
            Archetype::Scout => 7,
            Archetype::Interceptor => 4,
            Archetype::Demolisher => 3,
            _ => 0,
        }
    }
}

/// A stationary unit occupying a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Structure {
    pub side: Side,
    pub archetype: Archetype,
    pub upgraded: bool,
}

/// One unit as reported by the occupancy query of the host interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occupant {
    pub side: Side,
    pub archetype: Archetype,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_is_involution() {
        for s in ALL_SIDES {
            assert_eq!(s.opponent().opponent(), s);
            assert_ne!(s.opponent(), s);
        }
    }

    #[test]
    fn mobility_split() {
        assert!(Archetype::Wall.is_stationary());
        assert!(Archetype::Support.is_stationary());
        assert!(Archetype::Turret.is_stationary());
        assert!(Archetype::Scout.is_mobile());
        assert!(Archetype::Demolisher.is_mobile());
        assert!(Archetype::Interceptor.is_mobile());
    }

    #[test]
    fn mobile_slots_cover_stack() {
        for (slot, a) in MOBILE_ARCHETYPES.iter().enumerate() {
            assert_eq!(a.mobile_slot(), Some(slot));
        }
        assert_eq!(Archetype::Wall.mobile_slot(), None);
        assert_eq!(Archetype::Turret.mobile_slot(), None);
    }

    #[test]
    fn strides_only_for_mobiles() {
        for a in ALL_ARCHETYPES {
            assert_eq!(a.stride() > 0, a.is_mobile());
        }
    }

    #[test]
    fn default_costs_positive() {
        for a in ALL_ARCHETYPES {
            assert!(a.default_cost() > 0.0);
        }
    }
}
