use serde::{Deserialize, Serialize};

use super::constants::{Subsystem, NUM_SUBSYSTEMS};

/// Condition of a single subsystem. Only ever degrades, except via a full repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum SubsystemStatus {
    #[default]
    Operational,
    Damaged,
    Destroyed,
}

impl SubsystemStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SubsystemStatus::Operational => "OPERATIONAL",
            SubsystemStatus::Damaged => "DAMAGED",
            SubsystemStatus::Destroyed => "DESTROYED",
        }
    }

    /// One step down. Destroyed stays destroyed.
    pub fn degraded(&self) -> SubsystemStatus {
        match self {
            SubsystemStatus::Operational => SubsystemStatus::Damaged,
            SubsystemStatus::Damaged | SubsystemStatus::Destroyed => SubsystemStatus::Destroyed,
        }
    }
}

/// Status of all six ship subsystems, plus the gameplay multipliers derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShipSubsystems {
    statuses: [SubsystemStatus; NUM_SUBSYSTEMS],
}

impl ShipSubsystems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, system: Subsystem) -> SubsystemStatus {
        self.statuses[system as usize]
    }

    pub fn is_damaged(&self, system: Subsystem) -> bool {
        self.status(system) == SubsystemStatus::Damaged
    }

    pub fn is_destroyed(&self, system: Subsystem) -> bool {
        self.status(system) == SubsystemStatus::Destroyed
    }

    /// Degrade one subsystem by a single step and return its new status.
    pub fn degrade(&mut self, system: Subsystem) -> SubsystemStatus {
        let next = self.status(system).degraded();
        self.statuses[system as usize] = next;
        next
    }

    pub fn repair_all(&mut self) {
        self.statuses = [SubsystemStatus::Operational; NUM_SUBSYSTEMS];
    }

    /// Subsystems that can still take damage.
    pub fn damageable(&self) -> Vec<Subsystem> {
        Subsystem::ALL
            .iter()
            .copied()
            .filter(|s| !self.is_destroyed(*s))
            .collect()
    }

    pub fn destroyed_count(&self) -> usize {
        self.statuses
            .iter()
            .filter(|s| **s == SubsystemStatus::Destroyed)
            .count()
    }

    pub fn status_report(&self) -> Vec<(Subsystem, SubsystemStatus)> {
        Subsystem::ALL.iter().map(|s| (*s, self.status(*s))).collect()
    }

    // ========== Derived multipliers ==========

    pub fn max_speed_level(&self) -> u8 {
        match self.status(Subsystem::Propulsion) {
            SubsystemStatus::Operational => 9,
            SubsystemStatus::Damaged => 6,
            SubsystemStatus::Destroyed => 3,
        }
    }

    pub fn torpedo_fire_rate_multiplier(&self) -> f64 {
        match self.status(Subsystem::Weapons) {
            SubsystemStatus::Operational => 1.0,
            SubsystemStatus::Damaged => 0.5,
            SubsystemStatus::Destroyed => 0.0,
        }
    }

    pub fn torpedo_damage_multiplier(&self) -> f64 {
        match self.status(Subsystem::Weapons) {
            SubsystemStatus::Operational => 1.0,
            SubsystemStatus::Damaged => 0.8,
            SubsystemStatus::Destroyed => 0.0,
        }
    }

    pub fn propulsion_energy_multiplier(&self) -> f64 {
        match self.status(Subsystem::Propulsion) {
            SubsystemStatus::Operational => 1.0,
            SubsystemStatus::Damaged => 1.5,
            SubsystemStatus::Destroyed => 2.0,
        }
    }

    pub fn targeting_accuracy(&self) -> f64 {
        match self.status(Subsystem::TargetingComputer) {
            SubsystemStatus::Operational => 1.0,
            SubsystemStatus::Damaged => 0.8,
            SubsystemStatus::Destroyed => 0.0,
        }
    }

    /// A damaged long-range sensor shows ghost contacts.
    pub fn sensor_false_echoes(&self) -> bool {
        self.is_damaged(Subsystem::LongRangeSensor)
    }

    pub fn sensor_usable(&self) -> bool {
        !self.is_destroyed(Subsystem::LongRangeSensor)
    }

    /// Seconds before starbase distress calls reach the player; `None` means never.
    pub fn comms_alert_delay(&self) -> Option<f64> {
        match self.status(Subsystem::Communications) {
            SubsystemStatus::Operational => Some(0.0),
            SubsystemStatus::Damaged => Some(5.0),
            SubsystemStatus::Destroyed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(system: Subsystem, status: SubsystemStatus) -> ShipSubsystems {
        let mut s = ShipSubsystems::new();
        while s.status(system) != status {
            s.degrade(system);
        }
        s
    }

    #[test]
    fn degrade_walks_one_step_at_a_time() {
        let mut s = ShipSubsystems::new();
        assert_eq!(s.degrade(Subsystem::Weapons), SubsystemStatus::Damaged);
        assert_eq!(s.degrade(Subsystem::Weapons), SubsystemStatus::Destroyed);
        assert_eq!(s.degrade(Subsystem::Weapons), SubsystemStatus::Destroyed);
        assert_eq!(s.status(Subsystem::Propulsion), SubsystemStatus::Operational);
    }

    #[test]
    fn repair_all_restores_everything() {
        let mut s = with(Subsystem::Defense, SubsystemStatus::Destroyed);
        s.degrade(Subsystem::Communications);
        s.repair_all();
        assert!(s.status_report().iter().all(|(_, st)| *st == SubsystemStatus::Operational));
    }

    #[test]
    fn propulsion_tables() {
        let statuses = [
            SubsystemStatus::Operational,
            SubsystemStatus::Damaged,
            SubsystemStatus::Destroyed,
        ];
        let speeds: Vec<u8> = statuses
            .iter()
            .map(|st| with(Subsystem::Propulsion, *st).max_speed_level())
            .collect();
        assert_eq!(speeds, vec![9, 6, 3]);
        let costs: Vec<f64> = statuses
            .iter()
            .map(|st| with(Subsystem::Propulsion, *st).propulsion_energy_multiplier())
            .collect();
        assert_eq!(costs, vec![1.0, 1.5, 2.0]);
    }

    #[test]
    fn weapons_tables() {
        let damaged = with(Subsystem::Weapons, SubsystemStatus::Damaged);
        assert_eq!(damaged.torpedo_fire_rate_multiplier(), 0.5);
        assert_eq!(damaged.torpedo_damage_multiplier(), 0.8);
        let destroyed = with(Subsystem::Weapons, SubsystemStatus::Destroyed);
        assert_eq!(destroyed.torpedo_fire_rate_multiplier(), 0.0);
        assert_eq!(destroyed.torpedo_damage_multiplier(), 0.0);
    }

    #[test]
    fn sensor_and_comms_flags() {
        let ok = ShipSubsystems::new();
        assert!(!ok.sensor_false_echoes());
        assert!(ok.sensor_usable());
        assert_eq!(ok.comms_alert_delay(), Some(0.0));

        let damaged = with(Subsystem::LongRangeSensor, SubsystemStatus::Damaged);
        assert!(damaged.sensor_false_echoes());
        assert!(damaged.sensor_usable());

        let destroyed = with(Subsystem::LongRangeSensor, SubsystemStatus::Destroyed);
        assert!(!destroyed.sensor_false_echoes());
        assert!(!destroyed.sensor_usable());

        assert_eq!(
            with(Subsystem::Communications, SubsystemStatus::Damaged).comms_alert_delay(),
            Some(5.0)
        );
        assert_eq!(
            with(Subsystem::Communications, SubsystemStatus::Destroyed).comms_alert_delay(),
            None
        );
    }

    #[test]
    fn targeting_accuracy_table() {
        assert_eq!(ShipSubsystems::new().targeting_accuracy(), 1.0);
        assert_eq!(
            with(Subsystem::TargetingComputer, SubsystemStatus::Damaged).targeting_accuracy(),
            0.8
        );
        assert_eq!(
            with(Subsystem::TargetingComputer, SubsystemStatus::Destroyed).targeting_accuracy(),
            0.0
        );
    }
}
