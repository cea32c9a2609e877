#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure fire-control system for Rampart turrets.
//!
//! Converts target assignments into fire commands, but only for turrets
//! whose cooldown has fully elapsed. A turret with a target but a warm
//! barrel emits nothing this tick and keeps its readiness untouched, so
//! cooldown is only ever consumed by an actual shot.

use rampart_core::{Command, TurretTarget, TurretView};

/// Decides which assigned turrets actually fire this tick.
#[derive(Debug, Default)]
pub struct TurretCombat {}

impl TurretCombat {
    /// Creates a new fire-control system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits a fire command for each ready turret with an assignment.
    ///
    /// Commands come out in assignment order, which is turret slot order.
    pub fn handle(
        &mut self,
        turrets: &TurretView,
        targets: &[TurretTarget],
        out: &mut Vec<Command>,
    ) {
        for target in targets {
            // Views are id-sorted, so readiness lookup is a binary search.
            let Ok(index) = turrets
                .as_slice()
                .binary_search_by_key(&target.turret, |snapshot| snapshot.id)
            else {
                continue;
            };

            if turrets.as_slice()[index].ready_in.is_zero() {
                out.push(Command::FireBullet {
                    turret: target.turret,
                    target: target.enemy,
                });
            }
        }
    }
}
