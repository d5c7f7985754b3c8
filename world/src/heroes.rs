//! Authoritative hero state management utilities.

use hero_defence_core::{CellCoord, Hero, HeroClass, HeroId, HeroStats};

/// Registry that stores placed heroes and manages identifier allocation.
///
/// Heroes are kept ordered by identifier so combat passes iterate them in a
/// stable order.
#[derive(Debug)]
pub(crate) struct HeroRoster {
    entries: Vec<Hero>,
    next_hero_id: HeroId,
}

impl HeroRoster {
    /// Creates an empty roster with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_hero_id: HeroId::new(1),
        }
    }

    /// Places a fresh level one hero and returns its identifier.
    pub(crate) fn insert(&mut self, class: HeroClass, cell: CellCoord, stats: HeroStats) -> HeroId {
        let id = self.next_hero_id;
        self.next_hero_id = HeroId::new(id.get().saturating_add(1));
        self.entries.push(Hero::new(id, class, cell, stats));
        id
    }

    pub(crate) fn remove(&mut self, id: HeroId) -> Option<Hero> {
        let index = self.index(id)?;
        Some(self.entries.remove(index))
    }

    pub(crate) fn get(&self, id: HeroId) -> Option<&Hero> {
        self.entries.iter().find(|hero| hero.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: HeroId) -> Option<&mut Hero> {
        self.entries.iter_mut().find(|hero| hero.id == id)
    }

    pub(crate) fn as_slice(&self) -> &[Hero] {
        &self.entries
    }

    fn index(&self, id: HeroId) -> Option<usize> {
        self.entries.iter().position(|hero| hero.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> HeroStats {
        HeroStats {
            damage: 5,
            attack_speed: 3.0,
            accuracy: 70.0,
            critical_chance: 35.0,
        }
    }

    #[test]
    fn roster_starts_empty_with_first_identifier() {
        let roster = HeroRoster::new();
        assert!(roster.as_slice().is_empty());
        assert_eq!(roster.next_hero_id, HeroId::new(1));
    }

    #[test]
    fn identifiers_are_never_reused() {
        let mut roster = HeroRoster::new();
        let first = roster.insert(HeroClass::Archer, CellCoord::new(0, 0), stats());
        let second = roster.insert(HeroClass::Mage, CellCoord::new(1, 0), stats());
        assert!(roster.remove(first).is_some());
        let third = roster.insert(HeroClass::Warrior, CellCoord::new(0, 0), stats());

        assert_eq!(second, HeroId::new(2));
        assert_eq!(third, HeroId::new(3));
        let ids: Vec<HeroId> = roster.as_slice().iter().map(|hero| hero.id).collect();
        assert_eq!(ids, vec![second, third]);
        assert!(roster.get(first).is_none());
        assert_eq!(roster.get(third).map(|hero| hero.level), Some(1));
    }
}
