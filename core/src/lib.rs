#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Hero Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! changed. Systems read the hero and enemy records declared here and queue
//! further commands that the world applies during its ticks.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod enemy;
pub mod hero;
pub mod random;
pub mod skills;
pub mod status;

pub use enemy::{Enemy, EnemyTypeId, Tier};
pub use hero::{Hero, HeroStats, TargetingMode};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use skills::{SkillKind, SkillLevels, SkillSlot};
pub use status::{Affliction, Burning, Immobilized, Slowed, StatusEffects, StatusKind};

/// Side length of the standard square battlefield measured in cells.
pub const DEFAULT_GRID_SIZE: u32 = 11;

/// Highest level a hero may reach.
pub const MAX_HERO_LEVEL: u32 = 10;

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Computes the Chebyshev (king move) distance between two cell coordinates.
    #[must_use]
    pub fn chebyshev_distance(self, other: CellCoord) -> u32 {
        self.column()
            .abs_diff(other.column())
            .max(self.row().abs_diff(other.row()))
    }

    /// Reports whether the cell lies inside a square grid of the provided size.
    #[must_use]
    pub const fn within(&self, grid_size: u32) -> bool {
        self.column < grid_size && self.row < grid_size
    }

    /// Continuous point located at the cell's anchor.
    #[must_use]
    pub fn to_point(self) -> CellPoint {
        CellPoint::new(self.column as f32, self.row as f32)
    }
}

/// Continuous position measured in cell units.
///
/// Enemies travel between cells, so their location is not snapped to the
/// grid. Flooring both axes yields the cell the position belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct CellPoint {
    column: f32,
    row: f32,
}

impl CellPoint {
    /// Creates a new continuous point.
    #[must_use]
    pub const fn new(column: f32, row: f32) -> Self {
        Self { column, row }
    }

    /// Horizontal coordinate measured in cells.
    #[must_use]
    pub const fn column(&self) -> f32 {
        self.column
    }

    /// Vertical coordinate measured in cells.
    #[must_use]
    pub const fn row(&self) -> f32 {
        self.row
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: CellPoint) -> f32 {
        let dx = other.column - self.column;
        let dy = other.row - self.row;
        (dx * dx + dy * dy).sqrt()
    }

    /// Cell containing the point, or `None` when the point lies off the grid's
    /// non-negative quadrant.
    #[must_use]
    pub fn cell(self) -> Option<CellCoord> {
        if !self.column.is_finite() || !self.row.is_finite() {
            return None;
        }
        if self.column < 0.0 || self.row < 0.0 {
            return None;
        }
        Some(CellCoord::new(
            self.column.floor() as u32,
            self.row.floor() as u32,
        ))
    }
}

/// Unique identifier assigned to a hero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HeroId(u32);

impl HeroId {
    /// Creates a new hero identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Hero classes that can be placed on the battlefield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeroClass {
    /// Ranged single-target attacker with slowing and burning arrows.
    Archer,
    /// Melee fighter hitting along a line, able to stun.
    Warrior,
    /// Area caster that sets enemies on fire.
    Mage,
}

impl HeroClass {
    /// Every hero class in catalog order.
    pub const ALL: [HeroClass; 3] = [HeroClass::Archer, HeroClass::Warrior, HeroClass::Mage];

    /// Dense index of the class, matching [`HeroClass::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Archer => 0,
            Self::Warrior => 1,
            Self::Mage => 2,
        }
    }

    /// Lower-case identifier used in configuration files and the CLI.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Archer => "archer",
            Self::Warrior => "warrior",
            Self::Mage => "mage",
        }
    }

    /// Parses the lower-case identifier produced by [`HeroClass::key`].
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.key() == key)
    }
}

/// Whether an attack picks discrete targets or sweeps an area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackKind {
    /// Attacks up to `max_targets` individual enemies.
    Single,
    /// Attacks every in-range enemy up to `max_targets`.
    Area,
}

/// Geometric footprint describing which cells an attack can reach.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackShape {
    /// Cells whose Manhattan distance lies within the range band.
    Diamond,
    /// Cells whose Chebyshev distance lies within the range band.
    Square,
    /// Diagonal cells only (an X around the origin).
    Cross,
    /// Cells sharing the origin's row or column (a + around the origin).
    Plus,
    /// Straight reach along the origin's row or column, excluding the origin.
    Line,
}

/// Attack footprint and target cap of a hero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttackConfig {
    /// Targeting model of the attack.
    pub kind: AttackKind,
    /// Footprint shape.
    pub shape: AttackShape,
    /// Inclusive lower bound of the range band.
    pub min_range: u32,
    /// Inclusive upper bound of the range band.
    pub max_range: u32,
    /// Maximum number of enemies a single attack may strike.
    pub max_targets: u32,
    /// Blast radius advertised for area heroes, used by previews only.
    #[serde(default)]
    pub aoe_radius: Option<u32>,
}

/// Gold and lives owned by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Economy {
    gold: u32,
    lives: u32,
}

impl Economy {
    /// Creates a new economy with the provided balances.
    #[must_use]
    pub const fn new(gold: u32, lives: u32) -> Self {
        Self { gold, lives }
    }

    /// Current gold balance.
    #[must_use]
    pub const fn gold(&self) -> u32 {
        self.gold
    }

    /// Remaining lives.
    #[must_use]
    pub const fn lives(&self) -> u32 {
        self.lives
    }

    /// Credits gold to the balance.
    pub fn earn(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Reports whether the balance covers the provided price.
    #[must_use]
    pub const fn can_afford(&self, price: u32) -> bool {
        self.gold >= price
    }

    /// Deducts the price when affordable; leaves the balance untouched otherwise.
    #[must_use]
    pub fn try_spend(&mut self, price: u32) -> bool {
        if !self.can_afford(price) {
            return false;
        }
        self.gold -= price;
        true
    }

    /// Removes one life, never dropping below zero, and returns the remainder.
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    /// Reports whether every life has been lost.
    #[must_use]
    pub const fn is_defeated(&self) -> bool {
        self.lives == 0
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of real time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests placement of a hero of the given class on a cell.
    PlaceHero {
        /// Class of hero to purchase.
        class: HeroClass,
        /// Cell the hero should occupy.
        cell: CellCoord,
    },
    /// Requests that a hero be sold for a partial refund.
    SellHero {
        /// Identifier of the hero to sell.
        hero: HeroId,
    },
    /// Toggles the selection of a hero for the UI.
    SelectHero {
        /// Identifier of the hero to select or deselect.
        hero: HeroId,
    },
    /// Flips a hero between `first` and `last` targeting.
    ToggleTargetingMode {
        /// Identifier of the hero to update.
        hero: HeroId,
    },
    /// Requests one level of a hero skill.
    UpgradeSkill {
        /// Identifier of the hero to upgrade.
        hero: HeroId,
        /// Skill slot to raise.
        slot: SkillSlot,
    },
    /// Starts the next wave when the field is clear.
    StartNextWave,
    /// Flips between playing and paused.
    TogglePlay,
    /// Sets the multiplier applied to movement and spawn pacing.
    SetGameSpeed {
        /// Positive, finite speed multiplier.
        multiplier: f32,
    },
    /// Restores the initial game state.
    Reset,
    /// Moves an enemy along its path.
    StepEnemy {
        /// Identifier of the moving enemy.
        enemy: EnemyId,
        /// Position after the step.
        position: CellPoint,
        /// Index of the path cell most recently reached.
        segment: usize,
    },
    /// Removes an enemy that reached the end of its path and charges a life.
    EscapeEnemy {
        /// Identifier of the escaping enemy.
        enemy: EnemyId,
    },
    /// Starts the cooldown of a hero ability at the current time.
    TriggerCooldown {
        /// Identifier of the attacking hero.
        hero: HeroId,
        /// Ability that was used.
        ability: Ability,
    },
    /// Lands a strike, crediting gold and experience to the hero.
    StrikeEnemy {
        /// Identifier of the attacking hero.
        hero: HeroId,
        /// Identifier of the struck enemy.
        enemy: EnemyId,
        /// Damage after modifiers.
        damage: u32,
        /// Whether the critical roll succeeded.
        critical: bool,
    },
    /// Records a strike that failed its accuracy roll.
    MissEnemy {
        /// Identifier of the attacking hero.
        hero: HeroId,
        /// Identifier of the targeted enemy.
        enemy: EnemyId,
    },
    /// Applies a status effect to an enemy.
    AfflictEnemy {
        /// Identifier of the affected enemy.
        enemy: EnemyId,
        /// Effect to apply.
        affliction: Affliction,
    },
    /// Deals the outstanding ticks of an enemy's burn.
    BurnEnemy {
        /// Identifier of the burning enemy.
        enemy: EnemyId,
        /// Damage of the outstanding ticks.
        damage: u32,
        /// Number of ticks dealt once the damage lands.
        ticks_applied: u32,
    },
    /// Removes a status effect that ran out.
    ExpireStatus {
        /// Identifier of the affected enemy.
        enemy: EnemyId,
        /// Kind of effect that expired.
        kind: StatusKind,
    },
    /// Raises a hero by one level.
    LevelUpHero {
        /// Identifier of the hero.
        hero: HeroId,
    },
}

/// Hero abilities that run on their own cooldown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ability {
    /// Regular attack gated by attack speed.
    Attack,
    /// Mage blizzard gated by its fixed cooldown.
    Blizzard,
}

/// Result of a single strike against an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    /// The accuracy roll failed.
    Miss,
    /// The strike landed.
    Hit {
        /// Damage dealt after modifiers.
        damage: u32,
        /// Whether the critical roll succeeded.
        critical: bool,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a hero was purchased and placed.
    HeroPlaced {
        /// Identifier assigned to the hero by the world.
        hero: HeroId,
        /// Class of the placed hero.
        class: HeroClass,
        /// Cell occupied by the hero.
        cell: CellCoord,
        /// Gold charged for the purchase.
        cost: u32,
    },
    /// Reports that a placement request was rejected.
    HeroPlacementRejected {
        /// Class requested for placement.
        class: HeroClass,
        /// Cell provided in the request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a hero was sold.
    HeroSold {
        /// Identifier of the sold hero.
        hero: HeroId,
        /// Gold refunded to the player.
        refund: u32,
    },
    /// Reports that a command referenced a hero that does not exist.
    UnknownHero {
        /// Identifier supplied by the command.
        hero: HeroId,
    },
    /// Announces the hero currently selected for the UI.
    HeroSelected {
        /// Selected hero, or `None` when the selection was cleared.
        hero: Option<HeroId>,
    },
    /// Confirms that a hero switched targeting mode.
    TargetingModeChanged {
        /// Identifier of the hero.
        hero: HeroId,
        /// Mode that became active.
        mode: TargetingMode,
    },
    /// Confirms that a skill gained a level.
    SkillUpgraded {
        /// Identifier of the hero.
        hero: HeroId,
        /// Slot that was raised.
        slot: SkillSlot,
        /// Level reached by the slot.
        level: u32,
    },
    /// Reports that a skill purchase was rejected.
    SkillUpgradeRejected {
        /// Identifier of the hero.
        hero: HeroId,
        /// Slot requested.
        slot: SkillSlot,
        /// Specific reason the purchase failed.
        reason: SkillUpgradeError,
    },
    /// Confirms that a hero gained a level.
    HeroLeveledUp {
        /// Identifier of the hero.
        hero: HeroId,
        /// Level reached.
        level: u32,
    },
    /// Announces the start of a wave.
    WaveStarted {
        /// Number of the wave.
        wave: u32,
        /// Number of spawn orders queued for the wave.
        queued: usize,
    },
    /// Reports that a wave could not be started.
    WaveStartRejected {
        /// Specific reason the wave did not start.
        reason: WaveStartError,
    },
    /// Confirms that an enemy entered the field.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Archetype of the enemy.
        kind: EnemyTypeId,
        /// Cell the enemy appeared on.
        cell: CellCoord,
    },
    /// Reports that a queued spawn was dropped because its data was missing.
    EnemySpawnSkipped {
        /// Archetype requested by the queue entry.
        kind: EnemyTypeId,
        /// Lookup failure that caused the skip.
        reason: LookupError,
    },
    /// Reports the outcome of a single strike.
    AttackResolved {
        /// Attacking hero.
        hero: HeroId,
        /// Enemy that was targeted.
        enemy: EnemyId,
        /// Hit or miss details.
        outcome: HitOutcome,
    },
    /// Confirms that a status effect was applied to an enemy.
    StatusApplied {
        /// Affected enemy.
        enemy: EnemyId,
        /// Kind of effect applied.
        kind: StatusKind,
    },
    /// Reports damage dealt by a burning tick.
    BurnDamaged {
        /// Affected enemy.
        enemy: EnemyId,
        /// Damage dealt by the tick or ticks.
        damage: u32,
    },
    /// Confirms that a status effect ran out.
    StatusExpired {
        /// Affected enemy.
        enemy: EnemyId,
        /// Kind of effect that expired.
        kind: StatusKind,
    },
    /// Confirms that an enemy was killed.
    EnemyDefeated {
        /// Identifier of the enemy.
        enemy: EnemyId,
        /// Archetype of the enemy.
        kind: EnemyTypeId,
        /// Hero credited with the kill, when known.
        by: Option<HeroId>,
        /// Gold reward granted for the kill.
        gold: u32,
        /// Experience reward granted for the kill.
        experience: u32,
    },
    /// Reports that an enemy reached the end of its path.
    EnemyEscaped {
        /// Identifier of the enemy.
        enemy: EnemyId,
        /// Lives left after the escape.
        lives_remaining: u32,
    },
    /// Confirms that every enemy of a wave was handled.
    WaveCompleted {
        /// Number of the completed wave.
        wave: u32,
        /// Gold bonus awarded for the completion.
        bonus: u32,
    },
    /// Announces that play was resumed or paused.
    PlayToggled {
        /// Whether the simulation is now playing.
        playing: bool,
    },
    /// Confirms a new game speed multiplier.
    GameSpeedChanged {
        /// Multiplier that became active.
        multiplier: f32,
    },
    /// Announces that every life was lost.
    GameOver {
        /// Wave that was in play when the game ended.
        wave: u32,
    },
    /// Confirms that the world returned to its initial state.
    SimulationReset,
}

/// Reasons a hero placement request may be rejected by the world.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error,
)]
pub enum PlacementError {
    /// The requested cell lies outside the grid.
    #[error("cell lies outside the grid")]
    OutOfBounds,
    /// The requested cell belongs to an enemy path.
    #[error("cell belongs to an enemy path")]
    PathCell,
    /// Another hero already occupies the cell.
    #[error("cell is already occupied by a hero")]
    Occupied,
    /// The player cannot afford the hero.
    #[error("not enough gold to purchase the hero")]
    InsufficientGold,
}

/// Reasons a skill purchase may be rejected by the world.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error,
)]
pub enum SkillUpgradeError {
    /// The catalog holds no definition for the skill.
    #[error("skill has no catalog definition")]
    UnknownSkill,
    /// The hero lacks the skill points required.
    #[error("not enough skill points")]
    InsufficientSkillPoints,
    /// The player cannot afford the gold cost.
    #[error("not enough gold")]
    InsufficientGold,
    /// The skill already sits at its maximum level.
    #[error("skill is already at its maximum level")]
    MaxLevel,
    /// Two other special skills are already raised.
    #[error("two special skills are already raised")]
    SpecialSkillLocked,
}

/// Reasons a wave start request may be rejected by the world.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error,
)]
pub enum WaveStartError {
    /// A wave is already being spawned or fought.
    #[error("a wave is already in progress")]
    WaveInProgress,
    /// Enemies from a previous wave are still alive.
    #[error("enemies remain on the field")]
    EnemiesRemaining,
    /// The game ended and must be reset first.
    #[error("the game is over")]
    GameOver,
}

/// Failures to resolve catalog references at runtime.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum LookupError {
    /// No enemy archetype carries the identifier.
    #[error("unknown enemy type `{0}`")]
    UnknownEnemy(EnemyTypeId),
    /// No path exists at the index.
    #[error("unknown path index {0}")]
    UnknownPath(usize),
}

/// Transient projectile or swing descriptor for the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackVisual {
    /// Attacking hero.
    pub hero: HeroId,
    /// Class of the attacking hero, selecting the visual style.
    pub class: HeroClass,
    /// Point the attack originates from.
    pub from: CellPoint,
    /// Point the attack lands on.
    pub to: CellPoint,
    /// Simulation time the visual was issued.
    pub issued_at: Duration,
    /// Lifetime of the visual.
    pub duration: Duration,
}

impl AttackVisual {
    /// Reports whether the visual outlived its duration at `now`.
    #[must_use]
    pub fn is_expired(&self, now: Duration) -> bool {
        now.saturating_sub(self.issued_at) >= self.duration
    }
}

/// Floating combat text descriptor for the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageText {
    /// Enemy the text belongs to.
    pub enemy: EnemyId,
    /// Damage dealt; zero for misses.
    pub amount: u32,
    /// Point the text is anchored at.
    pub position: CellPoint,
    /// Whether the strike was critical.
    pub critical: bool,
    /// Whether the strike missed.
    pub missed: bool,
    /// Simulation time the text was issued.
    pub issued_at: Duration,
    /// Lifetime of the text.
    pub duration: Duration,
}

impl DamageText {
    /// Reports whether the text outlived its duration at `now`.
    #[must_use]
    pub fn is_expired(&self, now: Duration) -> bool {
        now.saturating_sub(self.issued_at) >= self.duration
    }
}

/// Read-only snapshot of the game consumed by rendering collaborators.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSnapshot {
    /// Current gold balance.
    pub gold: u32,
    /// Remaining lives.
    pub lives: u32,
    /// Number of the current (or next) wave.
    pub wave: u32,
    /// Whether ticks are being processed.
    pub playing: bool,
    /// Active game speed multiplier.
    pub game_speed: f32,
    /// Whether the game reached its terminal state.
    pub game_over: bool,
    /// Simulation clock.
    pub clock: Duration,
    /// Hero selected for the UI.
    pub selected_hero: Option<HeroId>,
    /// Every placed hero ordered by identifier.
    pub heroes: Vec<Hero>,
    /// Every live enemy ordered by identifier.
    pub enemies: Vec<Enemy>,
    /// Attack visuals that have not expired yet.
    pub attack_visuals: Vec<AttackVisual>,
    /// Damage texts that have not expired yet.
    pub damage_texts: Vec<DamageText>,
    /// Whether a wave is being spawned or fought.
    pub wave_in_progress: bool,
    /// Enemies still queued plus enemies alive.
    pub remaining_enemies: usize,
}
