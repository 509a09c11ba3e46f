//! The ordered set of poll options.

use super::color::Rgb;
use super::PollError;
use std::fmt;

/// Fewest options a poll may hold. Deletes that would go below are ignored.
pub const MIN_OPTIONS: usize = 2;

/// Colors handed to newly added options, indexed by the option count.
pub const OPTION_PALETTE: [Rgb; 8] = [
    Rgb::from_hex(0x9A8C98), // muted purple
    Rgb::from_hex(0xA3B18A), // sage
    Rgb::from_hex(0xB98B73), // terracotta
    Rgb::from_hex(0x6D6875), // slate
    Rgb::from_hex(0xE5989B), // muted pink
    Rgb::from_hex(0x7E938D), // dusty teal
    Rgb::from_hex(0xB5838D), // rose brown
    Rgb::from_hex(0x585123), // olive
];

/// Palette color for the option added when `count` options already exist.
pub fn palette_color(count: usize) -> Rgb {
    OPTION_PALETTE[count % OPTION_PALETTE.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionId(u64);

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "option-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteOption {
    pub id: OptionId,
    pub name: String,
    pub votes: u32,
    pub color: Rgb,
}

/// Seed data for an option before it has an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOption {
    pub name: String,
    pub votes: u32,
    pub color: Rgb,
}

/// Fields to overwrite on an existing option; `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionPatch {
    pub name: Option<String>,
    pub color: Option<Rgb>,
}

impl OptionPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            color: None,
        }
    }

    pub fn color(color: Rgb) -> Self {
        Self {
            name: None,
            color: Some(color),
        }
    }

    fn apply(self, option: &mut VoteOption) {
        if let Some(name) = self.name {
            option.name = name;
        }
        if let Some(color) = self.color {
            option.color = color;
        }
    }
}

#[derive(Debug, Clone)]
pub struct OptionRegistry {
    options: Vec<VoteOption>,
    next_id: u64,
}

impl OptionRegistry {
    pub fn new(seed: Vec<NewOption>) -> Result<Self, PollError> {
        if seed.len() < MIN_OPTIONS {
            return Err(PollError::TooFewOptions {
                min: MIN_OPTIONS,
                got: seed.len(),
            });
        }
        let mut registry = Self {
            options: Vec::with_capacity(seed.len()),
            next_id: 1,
        };
        for option in seed {
            let id = registry.allocate_id();
            registry.options.push(VoteOption {
                id,
                name: option.name,
                votes: option.votes,
                color: option.color,
            });
        }
        Ok(registry)
    }

    fn allocate_id(&mut self) -> OptionId {
        let id = OptionId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn options(&self) -> &[VoteOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn get(&self, id: OptionId) -> Option<&VoteOption> {
        self.options.iter().find(|o| o.id == id)
    }

    pub fn can_delete(&self) -> bool {
        self.options.len() > MIN_OPTIONS
    }

    /// Append a new option with zero votes and the next palette color.
    pub fn add(&mut self, name: String) -> OptionId {
        let id = self.allocate_id();
        let color = palette_color(self.options.len());
        self.options.push(VoteOption {
            id,
            name,
            votes: 0,
            color,
        });
        id
    }

    pub fn update(&mut self, id: OptionId, patch: OptionPatch) -> bool {
        match self.options.iter_mut().find(|o| o.id == id) {
            Some(option) => {
                patch.apply(option);
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: OptionId) -> bool {
        if !self.can_delete() {
            return false;
        }
        let before = self.options.len();
        self.options.retain(|o| o.id != id);
        self.options.len() != before
    }

    /// Count one vote. Whether voting is open is the caller's concern.
    pub fn record_vote(&mut self, id: OptionId) -> bool {
        match self.options.iter_mut().find(|o| o.id == id) {
            Some(option) => {
                option.votes = option.votes.saturating_add(1);
                true
            }
            None => false,
        }
    }

    pub fn clear_votes(&mut self) {
        for option in &mut self.options {
            option.votes = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> Vec<NewOption> {
        vec![
            NewOption {
                name: "Option A".into(),
                votes: 12,
                color: Rgb::from_hex(0x5F7161),
            },
            NewOption {
                name: "Option B".into(),
                votes: 8,
                color: Rgb::from_hex(0x4C516D),
            },
        ]
    }

    #[test]
    fn rejects_seed_below_minimum() {
        let mut one = seed();
        one.truncate(1);
        assert_eq!(
            OptionRegistry::new(one).unwrap_err(),
            PollError::TooFewOptions { min: 2, got: 1 }
        );
    }

    #[test]
    fn seed_keeps_order_and_votes() {
        let reg = OptionRegistry::new(seed()).unwrap();
        let names: Vec<_> = reg.options().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["Option A", "Option B"]);
        assert_eq!(reg.options()[0].votes, 12);
        assert_ne!(reg.options()[0].id, reg.options()[1].id);
    }

    #[test]
    fn add_cycles_palette_by_count() {
        let mut reg = OptionRegistry::new(seed()).unwrap();
        let id = reg.add("Option 3".into());
        let added = reg.get(id).unwrap();
        assert_eq!(added.votes, 0);
        assert_eq!(added.color, OPTION_PALETTE[2]);

        for i in 0..8 {
            reg.add(format!("extra {i}"));
        }
        // 11 options: the last one was added at count 10
        assert_eq!(reg.options()[10].color, OPTION_PALETTE[10 % 8]);
    }

    #[test]
    fn ids_stay_unique_after_deletes() {
        let mut reg = OptionRegistry::new(seed()).unwrap();
        let a = reg.add("x".into());
        assert!(reg.delete(a));
        let b = reg.add("y".into());
        assert_ne!(a, b);
        let mut ids: Vec<_> = reg.options().iter().map(|o| o.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), reg.len());
    }

    #[test]
    fn update_merges_only_given_fields() {
        let mut reg = OptionRegistry::new(seed()).unwrap();
        let id = reg.options()[0].id;
        assert!(reg.update(id, OptionPatch::name("Cats")));
        let opt = reg.get(id).unwrap();
        assert_eq!(opt.name, "Cats");
        assert_eq!(opt.color, Rgb::from_hex(0x5F7161));
        assert_eq!(opt.votes, 12);

        assert!(reg.update(id, OptionPatch::color(Rgb(1, 2, 3))));
        let opt = reg.get(id).unwrap();
        assert_eq!(opt.name, "Cats");
        assert_eq!(opt.color, Rgb(1, 2, 3));
    }

    #[test]
    fn update_unknown_id_is_ignored() {
        let mut reg = OptionRegistry::new(seed()).unwrap();
        let before = reg.options().to_vec();
        assert!(!reg.update(OptionId(999), OptionPatch::name("nope")));
        assert_eq!(reg.options(), before.as_slice());
    }

    #[test]
    fn delete_never_drops_below_minimum() {
        let mut reg = OptionRegistry::new(seed()).unwrap();
        reg.add("c".into());
        reg.add("d".into());
        let ids: Vec<_> = reg.options().iter().map(|o| o.id).collect();
        for id in ids {
            reg.delete(id);
            assert!(reg.len() >= MIN_OPTIONS);
        }
        assert_eq!(reg.len(), MIN_OPTIONS);
        assert!(!reg.can_delete());
    }

    #[test]
    fn delete_unknown_id_is_ignored() {
        let mut reg = OptionRegistry::new(seed()).unwrap();
        reg.add("c".into());
        assert!(!reg.delete(OptionId(999)));
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn add_then_delete_restores_list() {
        let mut reg = OptionRegistry::new(seed()).unwrap();
        let before = reg.options().to_vec();
        let id = reg.add("temp".into());
        assert!(reg.delete(id));
        assert_eq!(reg.options(), before.as_slice());
    }

    #[test]
    fn record_vote_and_clear() {
        let mut reg = OptionRegistry::new(seed()).unwrap();
        let id = reg.options()[1].id;
        assert!(reg.record_vote(id));
        assert_eq!(reg.get(id).unwrap().votes, 9);
        assert!(!reg.record_vote(OptionId(0)));
        reg.clear_votes();
        assert!(reg.options().iter().all(|o| o.votes == 0));
    }
}
