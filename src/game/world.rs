//! Sprite arena
//!
//! One owning list of sprites, each tagged with category flags. The
//! "everything drawable", "mobs" and "coins" groups are filtered views over
//! the same slots, so a sprite can never be in one group and missing from
//! another.
//!
//! Slots keep spawn order, which is also draw order. Removal is deferred to
//! the end of the tick (`despawn` + `flush_despawns`) so sprites can be
//! queued for removal while the arena is being walked.

use bitflags::bitflags;

use super::entity::{Entity, EntityAllocator};
use crate::sprite::{Coin, Mob};

bitflags! {
    /// Group membership of a sprite
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Category: u8 {
        /// Drawn every frame
        const RENDER = 1 << 0;
        const PLAYER = 1 << 1;
        const MOB = 1 << 2;
        const COIN = 1 << 3;
    }
}

/// Per-sprite state stored in the arena.
/// The player's state lives on the scene and survives level loads, so its
/// slot is just a marker holding its draw position.
pub enum Body {
    Player,
    Mob(Mob),
    Coin(Coin),
}

pub struct Slot {
    pub entity: Entity,
    pub category: Category,
    pub body: Body,
}

#[derive(Default)]
pub struct World {
    entities: EntityAllocator,
    slots: Vec<Slot>,
    /// Sprites queued for removal at end of tick
    despawn_queue: Vec<Entity>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every sprite, the player marker included.
    /// Handles from before the clear stop matching anything.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.slots.clear();
        self.despawn_queue.clear();
    }

    fn spawn(&mut self, category: Category, body: Body) -> Entity {
        let entity = self.entities.allocate();
        self.slots.push(Slot { entity, category: category | Category::RENDER, body });
        entity
    }

    pub fn spawn_player(&mut self) -> Entity {
        self.spawn(Category::PLAYER, Body::Player)
    }

    pub fn spawn_mob(&mut self, mob: Mob) -> Entity {
        self.spawn(Category::MOB, Body::Mob(mob))
    }

    pub fn spawn_coin(&mut self, coin: Coin) -> Entity {
        self.spawn(Category::COIN, Body::Coin(coin))
    }

    /// Queue a sprite for removal at the end of the tick
    pub fn despawn(&mut self, entity: Entity) {
        if self.is_alive(entity) && !self.despawn_queue.contains(&entity) {
            self.despawn_queue.push(entity);
        }
    }

    /// Apply queued removals. Call once at the end of the tick.
    pub fn flush_despawns(&mut self) {
        if self.despawn_queue.is_empty() {
            return;
        }
        for entity in std::mem::take(&mut self.despawn_queue) {
            self.entities.free(entity);
        }
        let entities = &self.entities;
        self.slots.retain(|slot| entities.is_alive(slot.entity));
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    pub fn is_queued(&self, entity: Entity) -> bool {
        self.despawn_queue.contains(&entity)
    }

    /// Whether `entity` is alive and tagged with every flag in `category`
    pub fn contains(&self, entity: Entity, category: Category) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.entity == entity && slot.category.contains(category))
    }

    /// Slots carrying every flag in `category`, in draw order
    pub fn iter(&self, category: Category) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(move |slot| slot.category.contains(category))
    }

    pub fn entities(&self, category: Category) -> Vec<Entity> {
        self.iter(category).map(|slot| slot.entity).collect()
    }

    pub fn count(&self, category: Category) -> usize {
        self.iter(category).count()
    }

    pub fn mobs(&self) -> impl Iterator<Item = (Entity, &Mob)> {
        self.slots.iter().filter_map(|slot| match &slot.body {
            Body::Mob(mob) => Some((slot.entity, mob)),
            _ => None,
        })
    }

    pub fn mobs_mut(&mut self) -> impl Iterator<Item = &mut Mob> {
        self.slots.iter_mut().filter_map(|slot| match &mut slot.body {
            Body::Mob(mob) => Some(mob),
            _ => None,
        })
    }

    pub fn coins(&self) -> impl Iterator<Item = (Entity, &Coin)> {
        self.slots.iter().filter_map(|slot| match &slot.body {
            Body::Coin(coin) => Some((slot.entity, coin)),
            _ => None,
        })
    }

    pub fn coins_mut(&mut self) -> impl Iterator<Item = &mut Coin> {
        self.slots.iter_mut().filter_map(|slot| match &mut slot.body {
            Body::Coin(coin) => Some(coin),
            _ => None,
        })
    }
}
