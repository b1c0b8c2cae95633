//! Sprite handles with generational indices
//!
//! Every level load clears the sprite arena. Bumping the generation of each
//! slot on clear means a handle held from the previous level (a stomped mob
//! queued for despawn, say) can never match a sprite spawned into the reused
//! slot.

/// Handle to a sprite in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    index: u32,
    generation: u32,
}

impl Entity {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Hands out entity handles and tracks which are alive
#[derive(Debug, Default)]
pub struct EntityAllocator {
    generations: Vec<u32>,
    /// Freed slots, reused LIFO
    free_indices: Vec<u32>,
    alive_count: u32,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> Entity {
        self.alive_count += 1;

        if let Some(index) = self.free_indices.pop() {
            // Generation was already bumped when the slot was freed
            Entity { index, generation: self.generations[index as usize] }
        } else {
            let index = self.generations.len() as u32;
            self.generations.push(0);
            Entity { index, generation: 0 }
        }
    }

    /// Returns true if the entity was alive and is now freed
    pub fn free(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        self.generations[entity.index as usize] += 1;
        self.free_indices.push(entity.index);
        self.alive_count -= 1;
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.generations.get(entity.index as usize) == Some(&entity.generation)
            && !self.free_indices.contains(&entity.index)
    }

    pub fn alive_count(&self) -> u32 {
        self.alive_count
    }

    /// Free every slot at once, invalidating all outstanding handles
    pub fn clear(&mut self) {
        for gen in &mut self.generations {
            *gen += 1;
        }
        self.free_indices.clear();
        self.free_indices.extend((0..self.generations.len() as u32).rev());
        self.alive_count = 0;
    }
}
