//! Scripted structure defense.
//!
//! Placement scripting that runs after the searched offensive action has
//! been executed: a fixed core layout, reactive turrets over breached
//! cells, and a few situational lines. Everything goes through
//! [`HostLink`] best-effort placement, so scarcity and occupied cells
//! resolve on the host's side.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::board::{all_cells, friendly_edge_cells, Archetype, Coord, Side, FAR_ROW, GRID_SIZE};
use crate::host::HostLink;
use crate::sim::TURRET_RANGE;

/// Core turret anchors behind the wall line.
const CORE_TURRETS: [Coord; 2] = [Coord::new(11, 11), Coord::new(16, 11)];
/// One support tucked behind the left corner.
const CORE_SUPPORT: Coord = Coord::new(3, 11);
/// Supports filled in once the early game is over. They flank the spawn
/// pair; structures in the launch columns would wall in our own waves.
const SUPPORT_BACKFILL: [Coord; 4] = [
    Coord::new(11, 2),
    Coord::new(12, 2),
    Coord::new(15, 2),
    Coord::new(16, 2),
];
/// Spawn cells scout pressure leaves from.
const SCOUT_SPAWNS: [Coord; 2] = [Coord::new(13, 0), Coord::new(14, 0)];
/// Demolishers rally one row behind the standoff wall line.
const DEMOLISHER_RALLY: Coord = Coord::new(24, 10);

/// Turns spent stalling with interceptors before committing to a read.
const STALL_TURN_LIMIT: u32 = 5;
/// Enemy front rows checked for crowding.
const FRONT_ROWS: [u8; 2] = [14, 15];
/// Stationary units on the front beyond which the demolisher line goes up.
const FRONT_CROWD_LIMIT: u32 = 10;

/// The front wall line shielding the core turrets.
fn wall_line() -> impl Iterator<Item = Coord> {
    (5..=9u8).chain(18..=22u8).map(|x| Coord::new(x, 13))
}

/// Runs the scripted placement pass for one turn.
///
/// `scored_on` is the append-only list of cells the opponent has
/// breached so far; every entry keeps earning a reactive turret until
/// one actually goes up.
pub fn shore_up<H: HostLink + ?Sized>(host: &mut H, scored_on: &[Coord], rng: &mut SmallRng) {
    build_core(host);
    build_reactive(host, scored_on);

    if host.turn_index() < STALL_TURN_LIMIT {
        stall_with_interceptors(host, rng);
    } else if front_crowding(host) > FRONT_CROWD_LIMIT {
        demolisher_line(host);
    } else {
        if host.turn_index() % 2 == 1 {
            scout_pressure(host);
        }
        host.attempt_place(
            Archetype::Support,
            &SUPPORT_BACKFILL,
            SUPPORT_BACKFILL.len() as u32,
        );
    }

    upgrade_core(host);
}

fn build_core<H: HostLink + ?Sized>(host: &mut H) {
    host.attempt_place(Archetype::Turret, &CORE_TURRETS, CORE_TURRETS.len() as u32);
    let walls: Vec<Coord> = wall_line().collect();
    host.attempt_place(Archetype::Wall, &walls, walls.len() as u32);
    host.attempt_place(Archetype::Support, &[CORE_SUPPORT], 1);
}

/// A turret one row above each breached cell, so the spawn edge itself
/// stays open. Breaches in our own launch columns go uncovered; a turret
/// there would wall in our waves.
fn build_reactive<H: HostLink + ?Sized>(host: &mut H, scored_on: &[Coord]) {
    for at in scored_on {
        if SCOUT_SPAWNS.iter().any(|s| s.x == at.x) || at.x == DEMOLISHER_RALLY.x {
            continue;
        }
        let cover = Coord::new(at.x, at.y + 1);
        host.attempt_place(Archetype::Turret, &[cover], 1);
    }
}

/// Interceptors dropped on random open edge cells while mobile points
/// last. Early turns only, to buy time to read the enemy base.
fn stall_with_interceptors<H: HostLink + ?Sized>(host: &mut H, rng: &mut SmallRng) {
    let open: Vec<Coord> = friendly_edge_cells()
        .into_iter()
        .filter(|&at| !host.is_stationary_occupied(at))
        .collect();
    if open.is_empty() {
        return;
    }
    loop {
        let at = open[rng.gen_range(0..open.len())];
        if host.attempt_place(Archetype::Interceptor, &[at], 1) == 0 {
            break;
        }
    }
}

fn front_crowding<H: HostLink + ?Sized>(host: &H) -> u32 {
    all_cells()
        .filter(|at| FRONT_ROWS.contains(&at.y))
        .flat_map(|at| host.occupants(at))
        .filter(|occ| occ.side == Side::Enemy && occ.archetype.is_stationary())
        .count() as u32
}

/// Walls across row 11 hold demolishers at standoff range of the enemy
/// front; the rally cell then takes every demolisher we can afford.
fn demolisher_line<H: HostLink + ?Sized>(host: &mut H) {
    let line: Vec<Coord> = (6..=27u8).rev().map(|x| Coord::new(x, 11)).collect();
    host.attempt_place(Archetype::Wall, &line, line.len() as u32);
    host.attempt_place(Archetype::Demolisher, &[DEMOLISHER_RALLY], u32::MAX);
}

/// Every other turn, scouts down the less-covered spawn column.
fn scout_pressure<H: HostLink + ?Sized>(host: &mut H) {
    let spawn = least_covered_spawn(host);
    host.attempt_place(Archetype::Scout, &[spawn], u32::MAX);
}

/// Straight-column threat estimate standing in for host pathing: enemy
/// turrets in volley range of each cell ahead of the spawn, summed.
fn least_covered_spawn<H: HostLink + ?Sized>(host: &H) -> Coord {
    let mut best = SCOUT_SPAWNS[0];
    let mut best_cover = u32::MAX;
    for spawn in SCOUT_SPAWNS {
        let cover: u32 = (spawn.y..=FAR_ROW)
            .map(|y| Coord::new(spawn.x, y))
            .filter(|at| at.is_valid())
            .map(|at| covering_turrets(host, at))
            .sum();
        if cover < best_cover {
            best = spawn;
            best_cover = cover;
        }
    }
    best
}

fn covering_turrets<H: HostLink + ?Sized>(host: &H, at: Coord) -> u32 {
    let mut count = 0;
    for dy in -TURRET_RANGE..=TURRET_RANGE {
        for dx in -TURRET_RANGE..=TURRET_RANGE {
            let x = at.x as i16 + dx;
            let y = at.y as i16 + dy;
            let bound = GRID_SIZE as i16;
            if !(0..bound).contains(&x) || !(0..bound).contains(&y) {
                continue;
            }
            let near = Coord::new(x as u8, y as u8);
            if !near.is_valid() {
                continue;
            }
            count += host
                .occupants(near)
                .iter()
                .filter(|occ| occ.side == Side::Enemy && occ.archetype == Archetype::Turret)
                .count() as u32;
        }
    }
    count
}

fn upgrade_core<H: HostLink + ?Sized>(host: &mut H) {
    for at in CORE_TURRETS {
        host.attempt_upgrade(at);
    }
    for at in wall_line() {
        host.attempt_upgrade(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CostTable;
    use crate::host::LocalArena;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0x5EED)
    }

    #[test]
    fn core_goes_up_and_stall_drains_mobile_points() {
        let mut arena = LocalArena::passive(CostTable::default());
        shore_up(&mut arena, &[], &mut rng());

        let snap = arena.snapshot();
        for at in CORE_TURRETS {
            assert_eq!(snap.cell(at).structure.unwrap().archetype, Archetype::Turret);
        }
        assert!(wall_line().all(|at| snap.cell(at).structure.is_some()));
        assert_eq!(
            snap.cell(CORE_SUPPORT).structure.unwrap().archetype,
            Archetype::Support
        );

        // turn 0 stalls: five interceptors at one point each
        assert_eq!(snap.mobile_points[Side::Own as usize], 0.0);
        let interceptors: u32 = friendly_edge_cells()
            .into_iter()
            .map(|at| snap.cell(at).mobile_count(Side::Own, Archetype::Interceptor))
            .sum();
        assert_eq!(interceptors, 5);

        // core 18, upgrades 14, from 40 structure points
        assert_eq!(snap.structure_points[Side::Own as usize], 8.0);
        assert!(snap.cell(CORE_TURRETS[0]).structure.unwrap().upgraded);
    }

    #[test]
    fn reactive_turret_covers_the_row_above_a_breach() {
        let mut arena = LocalArena::passive(CostTable::default());
        shore_up(&mut arena, &[Coord::new(20, 6)], &mut rng());
        let built = arena.snapshot().cell(Coord::new(20, 7)).structure.unwrap();
        assert_eq!(built.archetype, Archetype::Turret);
    }

    #[test]
    fn launch_columns_never_get_reactive_turrets() {
        let mut arena = LocalArena::passive(CostTable::default());
        let scored = [Coord::new(13, 2), Coord::new(24, 10)];
        shore_up(&mut arena, &scored, &mut rng());
        let snap = arena.snapshot();
        assert!(snap.cell(Coord::new(13, 3)).structure.is_none());
        assert!(snap.cell(Coord::new(24, 11)).structure.is_none());
    }

    #[test]
    fn crowded_front_triggers_the_demolisher_line() {
        let mut arena = LocalArena::passive(CostTable::default());
        {
            let snap = arena.snapshot_mut();
            snap.turn = 6;
            let front: Vec<Coord> = (5..=15u8).map(|x| Coord::new(x, 14)).collect();
            assert_eq!(
                snap.place_units(Side::Enemy, Archetype::Wall, &front, 11),
                11
            );
        }
        shore_up(&mut arena, &[], &mut rng());

        let snap = arena.snapshot();
        assert!(snap.cell(Coord::new(25, 11)).structure.is_some());
        assert!(snap.cell(Coord::new(6, 11)).structure.is_some());
        assert_eq!(
            snap.cell(DEMOLISHER_RALLY)
                .mobile_count(Side::Own, Archetype::Demolisher),
            1
        );
        // line walls exhaust the pool before the wall-line upgrades
        assert_eq!(snap.structure_points[Side::Own as usize], 0.0);
        assert!(snap.cell(CORE_TURRETS[0]).structure.unwrap().upgraded);
        assert!(!snap.cell(Coord::new(5, 13)).structure.unwrap().upgraded);
    }

    #[test]
    fn scout_pressure_picks_the_uncovered_column() {
        let mut arena = LocalArena::passive(CostTable::default());
        {
            let snap = arena.snapshot_mut();
            snap.turn = 5;
            // covers column 14 from row 21 up, misses column 13
            let placed =
                snap.place_units(Side::Enemy, Archetype::Turret, &[Coord::new(17, 24)], 1);
            assert_eq!(placed, 1);
        }
        shore_up(&mut arena, &[], &mut rng());

        let snap = arena.snapshot();
        assert_eq!(
            snap.cell(Coord::new(13, 0)).mobile_count(Side::Own, Archetype::Scout),
            5
        );
        assert_eq!(snap.cell(Coord::new(14, 0)).mobile_total(Side::Own), 0);
    }

    #[test]
    fn quiet_turns_backfill_supports() {
        let mut arena = LocalArena::passive(CostTable::default());
        arena.snapshot_mut().turn = 6;
        shore_up(&mut arena, &[], &mut rng());

        let snap = arena.snapshot();
        for at in SUPPORT_BACKFILL {
            assert_eq!(snap.cell(at).structure.unwrap().archetype, Archetype::Support);
        }
        // even turn, no scouts
        assert_eq!(snap.cell(Coord::new(13, 0)).mobile_total(Side::Own), 0);
        assert_eq!(snap.mobile_points[Side::Own as usize], 5.0);
    }
}
