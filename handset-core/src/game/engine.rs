//! Game tick: spawn, advance, steer, collide, repaint

use handset_display::Rect;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::entity::{Advance, Entity, EntityKind};
use super::frog::Frog;
use super::lanes::{lane_color, lane_rect, Lane, GOAL_LANE};
use super::paint::PaintList;
use super::pool::{EntityPool, Handle};
use super::{palette, GAME_HEIGHT, GAME_WIDTH, GRID, LANE_COUNT, MAX_ENTITIES};
use crate::config::GameRules;
use crate::state::Direction;

/// How a tick ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Keep going; the paint list holds this tick's repaints
    Playing,
    /// Hit by a car or drowned
    Died,
    /// Reached the goal lane
    Won,
}

/// Result of testing the frog against every live entity
#[derive(Debug, Clone, Copy, Default)]
struct Contact {
    hit: bool,
    carry: Option<f32>,
}

/// Game state for one session
pub struct GameEngine {
    rules: GameRules,
    entities: EntityPool<Entity, MAX_ENTITIES>,
    frog: Frog,
    rng: SmallRng,
    spawn_timer: u32,
}

impl GameEngine {
    pub fn new(rules: GameRules) -> Self {
        Self {
            rules,
            entities: EntityPool::new(),
            frog: Frog::new(),
            rng: SmallRng::seed_from_u64(rules.seed),
            spawn_timer: 0,
        }
    }

    pub fn frog(&self) -> &Frog {
        &self.frog
    }

    /// Put the frog somewhere; the previous position follows
    pub fn place_frog(&mut self, x: f32, lane: u8) {
        self.frog.x = x;
        self.frog.lane = lane.min(LANE_COUNT - 1);
        self.frog.remember();
        self.frog.clamp();
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().map(|(_, e)| e)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Add an entity directly
    pub fn insert(&mut self, entity: Entity) -> Option<Handle> {
        self.entities.alloc(entity)
    }

    /// Spawn one random entity; `None` when the arena is full
    pub fn spawn(&mut self) -> Option<Handle> {
        if self.entities.is_full() {
            debug!("entity pool full, skipping spawn");
            return None;
        }

        let width = (self.rng.gen_range(0..3) + 2) * GRID;
        let mut lane: u8 = self.rng.gen_range(0..8) + 1;
        // Skip the middle safe lane
        if lane >= 5 {
            lane += 1;
        }

        let (kind, color) = if lane <= 4 {
            (EntityKind::Platform, palette::LOG)
        } else if self.rng.gen_range(0..2) == 1 {
            (EntityKind::Obstacle, palette::CAR_YELLOW)
        } else {
            (EntityKind::Obstacle, palette::CAR_BLUE)
        };

        let speed = (self.rng.gen_range(0..3) + 1) as f32 * 0.5;
        self.entities
            .alloc(Entity::entering(lane, width, speed, color, kind))
    }

    /// Run one tick
    ///
    /// `paints` is cleared and refilled with this tick's repaints. On
    /// [`Outcome::Died`] or [`Outcome::Won`] the frog is left where it ended;
    /// call [`GameEngine::reset_frog`] once the outcome has been shown.
    pub fn tick(&mut self, direction: Option<Direction>, paints: &mut PaintList) -> Outcome {
        paints.clear();

        self.spawn_timer += 1;
        if self.spawn_timer >= self.rules.spawn_interval.max(1) {
            self.spawn_timer = 0;
            self.spawn();
        }

        self.advance_entities(paints);

        self.frog.remember();
        self.frog.steer(direction, self.rules.move_cooldown);

        let contact = self.contact();
        if !contact.hit {
            if let Some(speed) = contact.carry {
                self.frog.x += speed;
                self.frog.clamp();
            }
        }

        let drowned = Lane::at(self.frog.lane) == Lane::Water && contact.carry.is_none();
        if contact.hit || drowned {
            return Outcome::Died;
        }
        if self.frog.lane == GOAL_LANE {
            return Outcome::Won;
        }

        self.paint_frog(paints);
        Outcome::Playing
    }

    /// Back to the start lane after a win or a death
    pub fn reset_frog(&mut self) {
        self.frog.reset();
    }

    /// Queue a repaint of the whole playfield
    pub fn paint_scene(&self, paints: &mut PaintList) {
        paints.clear();
        for lane in 0..LANE_COUNT {
            paints.fill(lane_rect(lane), lane_color(lane));
        }
        paints.fill(
            Rect::new(0, GAME_HEIGHT, GAME_WIDTH, handset_display::SCREEN_HEIGHT - GAME_HEIGHT),
            palette::GRASS,
        );
        for entity in self.entities() {
            paints.fill(entity.drawn_rect(), entity.color);
        }
        paints.fill(self.frog.body(), palette::FROG);
    }

    fn advance_entities(&mut self, paints: &mut PaintList) {
        let mut culled: heapless::Vec<Handle, MAX_ENTITIES> = heapless::Vec::new();
        for (handle, entity) in self.entities.iter_mut() {
            if entity.advance(paints) == Advance::Culled {
                // Capacity equals the arena size
                let _ = culled.push(handle);
            }
        }
        for handle in culled {
            self.entities.free(handle);
        }
    }

    fn contact(&self) -> Contact {
        let mut contact = Contact::default();
        for entity in self.entities() {
            if !self.frog.overlaps(entity) {
                continue;
            }
            match entity.kind {
                EntityKind::Obstacle => contact.hit = true,
                EntityKind::Platform => {
                    // Carried by one platform per tick
                    if contact.carry.is_none() {
                        contact.carry = Some(entity.speed);
                    }
                }
            }
        }
        contact
    }

    fn paint_frog(&self, paints: &mut PaintList) {
        if self.frog.moved() {
            let cell = self.frog.previous_cell();
            paints.fill(cell, lane_color(self.frog.prev_lane));
            for entity in self.entities() {
                if entity.lane != self.frog.prev_lane {
                    continue;
                }
                if let Some(under) = entity.drawn_rect().intersection(&cell) {
                    paints.fill(under, entity.color);
                }
            }
        }
        paints.fill(self.frog.body(), palette::FROG);
    }
}
