//! Vertical player motion and the trance state machine
//!
//! Normal physics is plain Euler integration under the character's gravity.
//! While a trance is active the player's height is driven directly and
//! gravity and jumping are disabled.

use super::character::Stats;
use super::state::{Player, Trance};
use super::tick::TickInput;
use crate::tuning::Tuning;

/// Trance transitions that happened during a physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranceTransition {
    /// Startup elapsed; the player now steers
    Control,
    /// Trance expired; normal gravity resumes
    Ended,
}

/// Enter trance startup. Only valid from `Dormant`; returns whether it fired.
pub fn awaken(player: &mut Player, trance: &mut Option<Trance>) -> bool {
    if *trance != Some(Trance::Dormant) {
        return false;
    }
    *trance = Some(Trance::Startup { elapsed: 0 });
    player.vel_y = 0.0;
    player.grounded = false;
    true
}

/// Advance the player by one tick
pub fn step_player(
    player: &mut Player,
    trance: &mut Option<Trance>,
    stats: &Stats,
    tuning: &Tuning,
    input: &TickInput,
) -> Option<TranceTransition> {
    match *trance {
        Some(Trance::Startup { elapsed }) => {
            // Automatic rise, input ignored
            player.pos.y -= tuning.trance_rise;
            clamp_trance(player, tuning);

            if elapsed >= tuning.trance_startup_ticks {
                *trance = Some(Trance::Control {
                    elapsed: elapsed + 1,
                });
                Some(TranceTransition::Control)
            } else {
                *trance = Some(Trance::Startup {
                    elapsed: elapsed + 1,
                });
                None
            }
        }
        Some(Trance::Control { elapsed }) => {
            if input.ability_up {
                player.pos.y -= tuning.trance_move;
            } else if input.ability_down {
                player.pos.y += tuning.trance_move;
            } else {
                player.pos.y += tuning.trance_sink;
            }
            clamp_trance(player, tuning);

            if elapsed > tuning.trance_total_ticks {
                *trance = Some(Trance::Spent);
                player.vel_y = 0.0;
                Some(TranceTransition::Ended)
            } else {
                *trance = Some(Trance::Control {
                    elapsed: elapsed + 1,
                });
                None
            }
        }
        Some(Trance::Dormant) | Some(Trance::Spent) | None => {
            step_normal(player, stats, tuning, input.jump);
            None
        }
    }
}

/// Gravity integration with grounded-only jumping
fn step_normal(player: &mut Player, stats: &Stats, tuning: &Tuning, jump: bool) {
    if jump && player.grounded {
        player.vel_y = stats.jump_impulse;
        player.grounded = false;
    }

    player.vel_y += stats.gravity;
    player.pos.y += player.vel_y;

    let floor = tuning.floor_y();
    if player.pos.y >= floor {
        player.pos.y = floor;
        player.vel_y = 0.0;
        player.grounded = true;
    } else if player.pos.y < tuning.ceiling_y {
        player.pos.y = tuning.ceiling_y;
        player.vel_y = player.vel_y.max(0.0);
    }
}

fn clamp_trance(player: &mut Player, tuning: &Tuning) {
    player.pos.y = player.pos.y.clamp(tuning.ceiling_y, tuning.floor_y());
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATS: Stats = Stats {
        speed: 1.6,
        jump_impulse: -14.0,
        gravity: 0.8,
    };

    fn jump() -> TickInput {
        TickInput {
            jump: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_grounded_player_stays_put() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        let mut trance = None;
        step_player(&mut player, &mut trance, &STATS, &tuning, &TickInput::default());
        assert_eq!(player.pos.y, tuning.floor_y());
        assert_eq!(player.vel_y, 0.0);
        assert!(player.grounded);
    }

    #[test]
    fn test_jump_from_ground() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        let mut trance = None;
        step_player(&mut player, &mut trance, &STATS, &tuning, &jump());
        assert!(!player.grounded);
        assert!((player.vel_y - (-14.0 + 0.8)).abs() < 1e-5);
        assert!((player.pos.y - (tuning.floor_y() - 13.2)).abs() < 1e-4);
    }

    #[test]
    fn test_no_double_jump() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        let mut trance = None;
        step_player(&mut player, &mut trance, &STATS, &tuning, &jump());
        let vel_before = player.vel_y;
        step_player(&mut player, &mut trance, &STATS, &tuning, &jump());
        // Only gravity applied, jump ignored
        assert!((player.vel_y - (vel_before + STATS.gravity)).abs() < 1e-5);
    }

    #[test]
    fn test_lands_after_jump() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        let mut trance = None;
        step_player(&mut player, &mut trance, &STATS, &tuning, &jump());
        for _ in 0..100 {
            step_player(&mut player, &mut trance, &STATS, &tuning, &TickInput::default());
        }
        assert!(player.grounded);
        assert_eq!(player.pos.y, tuning.floor_y());
    }

    #[test]
    fn test_ceiling_clamps_huge_jump() {
        let tuning = Tuning::default();
        let stats = Stats {
            jump_impulse: -400.0,
            ..STATS
        };
        let mut player = Player::new(&tuning);
        let mut trance = None;
        step_player(&mut player, &mut trance, &stats, &tuning, &jump());
        assert_eq!(player.pos.y, tuning.ceiling_y);
        assert!(player.vel_y >= 0.0);
    }

    #[test]
    fn test_awaken_only_from_dormant() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);

        let mut none = None;
        assert!(!awaken(&mut player, &mut none));

        let mut trance = Some(Trance::Dormant);
        assert!(awaken(&mut player, &mut trance));
        assert_eq!(trance, Some(Trance::Startup { elapsed: 0 }));
        assert!(!player.grounded);
        assert!(!awaken(&mut player, &mut trance));
    }

    #[test]
    fn test_startup_rises_and_ignores_input() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        let mut trance = Some(Trance::Dormant);
        awaken(&mut player, &mut trance);

        let start_y = player.pos.y;
        let input = TickInput {
            jump: true,
            ability_down: true,
            ..Default::default()
        };
        step_player(&mut player, &mut trance, &STATS, &tuning, &input);
        assert!((player.pos.y - (start_y - 1.5)).abs() < 1e-5);
        assert_eq!(player.vel_y, 0.0);
    }

    #[test]
    fn test_startup_to_control_timing() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        let mut trance = Some(Trance::Dormant);
        awaken(&mut player, &mut trance);

        let idle = TickInput::default();
        for _ in 0..tuning.trance_startup_ticks {
            assert_eq!(step_player(&mut player, &mut trance, &STATS, &tuning, &idle), None);
            assert!(matches!(trance, Some(Trance::Startup { .. })));
        }
        assert_eq!(
            step_player(&mut player, &mut trance, &STATS, &tuning, &idle),
            Some(TranceTransition::Control)
        );
        assert!(matches!(trance, Some(Trance::Control { .. })));
    }

    #[test]
    fn test_control_follows_intent() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.pos.y = 200.0;
        let mut trance = Some(Trance::Control { elapsed: 200 });

        let up = TickInput {
            ability_up: true,
            ..Default::default()
        };
        step_player(&mut player, &mut trance, &STATS, &tuning, &up);
        assert_eq!(player.pos.y, 196.0);

        let down = TickInput {
            ability_down: true,
            ..Default::default()
        };
        step_player(&mut player, &mut trance, &STATS, &tuning, &down);
        assert_eq!(player.pos.y, 200.0);

        step_player(&mut player, &mut trance, &STATS, &tuning, &TickInput::default());
        assert_eq!(player.pos.y, 200.5);
    }

    #[test]
    fn test_control_clamped_to_bounds() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.pos.y = tuning.ceiling_y + 1.0;
        let mut trance = Some(Trance::Control { elapsed: 10 });
        let up = TickInput {
            ability_up: true,
            ..Default::default()
        };
        step_player(&mut player, &mut trance, &STATS, &tuning, &up);
        assert_eq!(player.pos.y, tuning.ceiling_y);

        player.pos.y = tuning.floor_y() - 1.0;
        let down = TickInput {
            ability_down: true,
            ..Default::default()
        };
        step_player(&mut player, &mut trance, &STATS, &tuning, &down);
        assert_eq!(player.pos.y, tuning.floor_y());
    }

    #[test]
    fn test_trance_expires_into_gravity() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.pos.y = 100.0;
        player.vel_y = 3.0;
        let mut trance = Some(Trance::Control {
            elapsed: tuning.trance_total_ticks + 1,
        });
        let result = step_player(&mut player, &mut trance, &STATS, &tuning, &TickInput::default());
        assert_eq!(result, Some(TranceTransition::Ended));
        assert_eq!(trance, Some(Trance::Spent));
        assert_eq!(player.vel_y, 0.0);

        // Next tick falls under gravity from the current height
        step_player(&mut player, &mut trance, &STATS, &tuning, &TickInput::default());
        assert!((player.vel_y - STATS.gravity).abs() < 1e-5);
        assert!(player.pos.y > 100.5);
    }
}
