use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::constants::{
    FORMATION_SLOT_TOLERANCE, MAX_SQUADRON_SIZE, MIN_SQUADRON_SIZE, SQUADRON_PLAYER_RANGE,
    SQUADRON_STRONGHOLD_RANGE,
};
use crate::models::enemy::{HostileUnit, UnitId};
use crate::models::events::{EventQueue, GameEvent};
use crate::models::galaxy::Galaxy;
use crate::models::position::{SectorCoord, Vec3};

use super::controller::AiDirector;
use super::formation::Formation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SquadronObjective {
    Patrol,
    AttackPlayer,
    AttackStronghold { sector: SectorCoord },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Squadron {
    pub id: u32,
    pub leader: UnitId,
    /// In original order; leader re-election walks this list.
    pub members: Vec<UnitId>,
    pub formation: Formation,
    pub objective: SquadronObjective,
    pub target_sector: Option<SectorCoord>,
    pub cohesion: f64,
    /// Sector the leader is in.
    pub sector: SectorCoord,
}

impl Squadron {
    pub fn followers(&self) -> impl Iterator<Item = &UnitId> {
        let leader = self.leader;
        self.members.iter().filter(move |id| **id != leader)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SquadronCoordinator {
    squadrons: Vec<Squadron>,
    next_id: u32,
}

impl SquadronCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn squadrons(&self) -> &[Squadron] {
        &self.squadrons
    }

    pub fn squadron(&self, id: u32) -> Option<&Squadron> {
        self.squadrons.iter().find(|s| s.id == id)
    }

    pub fn squadron_of(&self, unit: UnitId) -> Option<&Squadron> {
        self.squadrons.iter().find(|s| s.members.contains(&unit))
    }

    pub fn len(&self) -> usize {
        self.squadrons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.squadrons.is_empty()
    }

    pub fn clear(&mut self) {
        self.squadrons.clear();
    }

    /// Group `units` into a squadron led by the first of them. Returns the
    /// new squadron id, or `None` for a group smaller than two or larger
    /// than five.
    pub fn create_squadron(
        &mut self,
        units: &[HostileUnit],
        formation: Formation,
        objective: SquadronObjective,
    ) -> Option<u32> {
        if !(MIN_SQUADRON_SIZE..=MAX_SQUADRON_SIZE).contains(&units.len()) {
            return None;
        }
        let leader = &units[0];
        let id = self.next_id;
        self.next_id += 1;

        let target_sector = match objective {
            SquadronObjective::AttackStronghold { sector } => Some(sector),
            _ => None,
        };
        self.squadrons.push(Squadron {
            id,
            leader: leader.id,
            members: units.iter().map(|u| u.id).collect(),
            formation,
            objective,
            target_sector,
            cohesion: formation.cohesion(),
            sector: SectorCoord::from_world(leader.position),
        });
        debug!(squadron = id, size = units.len(), ?formation, "squadron created");
        Some(id)
    }

    /// Group units sharing a sector into squadrons, one per sector holding
    /// two to five hostiles. Units already in a squadron are left alone.
    pub fn form_squadrons(&mut self, galaxy: &Galaxy, events: &mut EventQueue) -> Vec<u32> {
        let mut formed = Vec::new();
        for sector in galaxy.sectors() {
            let free: Vec<HostileUnit> = sector
                .enemies
                .iter()
                .filter(|u| self.squadron_of(u.id).is_none())
                .cloned()
                .collect();
            let formation = Formation::for_group(&free);
            if let Some(id) = self.create_squadron(&free, formation, SquadronObjective::Patrol) {
                events.push(GameEvent::SquadronFormed {
                    squadron: id,
                    leader: free[0].id,
                });
                formed.push(id);
            }
        }
        if !formed.is_empty() {
            info!(count = formed.len(), "squadrons formed");
        }
        formed
    }

    /// One coordination pass, run before the per-unit AI.
    ///
    /// For each squadron: disband below two live members, re-elect a lost
    /// leader, pick the objective, push it to the members' controllers and
    /// steer followers toward their formation slots.
    pub fn update(
        &mut self,
        galaxy: &mut Galaxy,
        player_sector: SectorCoord,
        ai: &mut AiDirector,
        events: &mut EventQueue,
    ) {
        let mut disbanded = Vec::new();

        for squadron in self.squadrons.iter_mut() {
            squadron.members.retain(|id| galaxy.unit(*id).is_some());

            if squadron.members.len() < MIN_SQUADRON_SIZE {
                for id in &squadron.members {
                    ai.assign_squadron(*id, None, false);
                }
                info!(squadron = squadron.id, "squadron disbanded");
                events.push(GameEvent::SquadronDisbanded { squadron: squadron.id });
                disbanded.push(squadron.id);
                continue;
            }

            if !squadron.members.contains(&squadron.leader) {
                squadron.leader = squadron.members[0];
                info!(squadron = squadron.id, leader = %squadron.leader, "squadron leader re-elected");
                events.push(GameEvent::SquadronLeaderChanged {
                    squadron: squadron.id,
                    leader: squadron.leader,
                });
            }

            let Some(leader) = galaxy.unit(squadron.leader) else {
                continue;
            };
            let (leader_position, leader_velocity) = (leader.position, leader.velocity);
            squadron.sector = SectorCoord::from_world(leader_position);

            squadron.objective = choose_objective(galaxy, squadron.sector, player_sector);
            squadron.target_sector = match squadron.objective {
                SquadronObjective::AttackStronghold { sector } => Some(sector),
                SquadronObjective::AttackPlayer => Some(player_sector),
                SquadronObjective::Patrol => None,
            };

            for &id in &squadron.members {
                ai.assign_squadron(id, Some(squadron.id), id == squadron.leader);
                match squadron.objective {
                    SquadronObjective::AttackStronghold { sector } => {
                        ai.order_stronghold_attack(id, sector, galaxy)
                    }
                    SquadronObjective::AttackPlayer => ai.order_player_attack(id),
                    SquadronObjective::Patrol => ai.order_patrol(id),
                }
            }

            let followers: Vec<UnitId> = squadron.followers().copied().collect();
            for (slot, id) in followers.into_iter().enumerate() {
                let target = leader_position + squadron.formation.slot_offset(slot);
                let Some(unit) = galaxy.unit_mut(id) else {
                    continue;
                };
                let to_slot = target - unit.position;
                unit.velocity = if to_slot.length() > FORMATION_SLOT_TOLERANCE {
                    to_slot.normalized() * (ai.speed_of(unit.kind) * 0.5)
                } else {
                    leader_velocity
                };
            }
        }

        self.squadrons.retain(|s| !disbanded.contains(&s.id));
    }
}

/// Fixed priority: a besieged starbase within reach, then the player if
/// close, otherwise patrol.
fn choose_objective(
    galaxy: &Galaxy,
    from: SectorCoord,
    player_sector: SectorCoord,
) -> SquadronObjective {
    let besieged = galaxy
        .strongholds()
        .filter(|s| !s.destroyed && s.under_attack)
        .filter(|s| s.sector.manhattan(from) <= SQUADRON_STRONGHOLD_RANGE)
        .min_by_key(|s| (s.sector.manhattan(from), s.id));
    if let Some(base) = besieged {
        return SquadronObjective::AttackStronghold { sector: base.sector };
    }
    if player_sector.manhattan(from) <= SQUADRON_PLAYER_RANGE {
        return SquadronObjective::AttackPlayer;
    }
    SquadronObjective::Patrol
}
