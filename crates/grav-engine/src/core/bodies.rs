use std::sync::Arc;

use glam::DVec2;

use crate::api::types::BodyId;
use crate::components::body::Body;

/// Ordered body storage with copy-on-write publication.
///
/// Readers take a cheap `snapshot()` and keep a complete, consistent collection
/// for as long as they hold it. Writers either mutate in place through
/// `Arc::make_mut` (cloning only if a snapshot is still alive) or build a whole
/// new collection and `publish` it in one swap.
///
/// Order is insertion order and is what the integrator iterates, so removal
/// keeps the order of the remaining bodies (indices after it shift down).
#[derive(Debug, Clone)]
pub struct BodySet {
    bodies: Arc<Vec<Body>>,
    next_id: u32,
}

impl BodySet {
    pub fn new() -> Self {
        Self {
            bodies: Arc::new(Vec::with_capacity(64)),
            next_id: 1,
        }
    }

    /// Shared handle to the currently published collection.
    pub fn snapshot(&self) -> Arc<Vec<Body>> {
        Arc::clone(&self.bodies)
    }

    /// Replace the published collection atomically.
    pub fn publish(&mut self, bodies: Vec<Body>) {
        self.bodies = Arc::new(bodies);
    }

    /// Private working copy of the current collection.
    pub fn working_copy(&self) -> Vec<Body> {
        self.bodies.as_ref().clone()
    }

    fn make_mut(&mut self) -> &mut Vec<Body> {
        Arc::make_mut(&mut self.bodies)
    }

    /// Add a body, assigning it a fresh id. Returns the id.
    pub fn insert(&mut self, mut body: Body) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        body.id = id;
        self.make_mut().push(body);
        id
    }

    /// Remove a body by id. Returns the removed body if found.
    pub fn remove(&mut self, id: BodyId) -> Option<Body> {
        let idx = self.index_of(id)?;
        Some(self.make_mut().remove(idx))
    }

    /// Remove every body.
    pub fn clear(&mut self) {
        self.bodies = Arc::new(Vec::new());
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        let idx = self.index_of(id)?;
        self.make_mut().get_mut(idx)
    }

    /// Current position of `id` in iteration order.
    pub fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.iter().position(|b| b.id == id)
    }

    /// Id of the body at `index`, if in range.
    pub fn id_at(&self, index: usize) -> Option<BodyId> {
        self.bodies.get(index).map(|b| b.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    /// Mutate every body in place.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut Body)) {
        for body in self.make_mut().iter_mut() {
            f(body);
        }
    }

    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }

    /// Topmost (last drawn) body whose disk contains `point`.
    pub fn body_at(&self, point: DVec2) -> Option<BodyId> {
        self.bodies.iter().rev().find(|b| b.contains(point)).map(|b| b.id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl Default for BodySet {
    fn default() -> Self {
        Self::new()
    }
}
