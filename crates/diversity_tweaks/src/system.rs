//! # Planetary System
//!
//! Bodies in host order plus the orbit forest they form.
//!
//! ## Invariants
//!
//! - Body names are unique
//! - Every parent exists
//! - The orbit relation is acyclic (stars and other roots have no parent)
//!
//! A pristine copy of every body is kept as the reference ("prefab") that
//! scaling rules read from, so repeated passes never compound.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::error::{TweakError, TweakResult};

/// On-disk form of a system: a list of `[[bodies]]` tables.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemDescription {
    /// Bodies in host order.
    #[serde(default)]
    pub bodies: Vec<Body>,
}

impl SystemDescription {
    /// Parses a TOML system description.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text is malformed.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// A validated set of bodies.
#[derive(Clone, Debug)]
pub struct PlanetarySystem {
    bodies: Vec<Body>,
    references: Vec<Body>,
    index: HashMap<String, usize>,
}

impl PlanetarySystem {
    /// Validates `bodies` and builds the system.
    ///
    /// Empty display names are filled in with the body name.
    ///
    /// # Errors
    ///
    /// `DuplicateBody`, `UnknownParent` or `CycleDetected`.
    pub fn new(mut bodies: Vec<Body>) -> TweakResult<Self> {
        let mut index = HashMap::with_capacity(bodies.len());
        for (i, body) in bodies.iter_mut().enumerate() {
            if body.display_name.is_empty() {
                body.display_name.clone_from(&body.name);
            }
            if index.insert(body.name.clone(), i).is_some() {
                return Err(TweakError::DuplicateBody(body.name.clone()));
            }
        }

        for body in &bodies {
            if let Some(parent) = &body.parent {
                if !index.contains_key(parent) {
                    return Err(TweakError::UnknownParent {
                        body: body.name.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }

        let system = Self {
            references: bodies.clone(),
            bodies,
            index,
        };
        if let Some(cycle) = system.find_cycle() {
            return Err(TweakError::CycleDetected(cycle));
        }
        Ok(system)
    }

    /// Builds a system from its description.
    ///
    /// # Errors
    ///
    /// See [`PlanetarySystem::new`].
    pub fn from_description(description: SystemDescription) -> TweakResult<Self> {
        Self::new(description.bodies)
    }

    /// Detects a cycle in the orbit relation.
    ///
    /// Returns the body names along the cycle, first name repeated at the end.
    #[must_use]
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        let mut visited = HashSet::new();
        let mut rec_stack = HashSet::new();
        let mut path = Vec::new();

        for start in 0..self.bodies.len() {
            if !visited.contains(&start) {
                if let Some(cycle) = self.dfs_find_cycle(start, &mut visited, &mut rec_stack, &mut path) {
                    return Some(cycle);
                }
            }
        }
        None
    }

    /// DFS along parent links.
    fn dfs_find_cycle(
        &self,
        index: usize,
        visited: &mut HashSet<usize>,
        rec_stack: &mut HashSet<usize>,
        path: &mut Vec<usize>,
    ) -> Option<Vec<String>> {
        visited.insert(index);
        rec_stack.insert(index);
        path.push(index);

        if let Some(parent) = self.parent(index) {
            if !visited.contains(&parent) {
                if let Some(cycle) = self.dfs_find_cycle(parent, visited, rec_stack, path) {
                    return Some(cycle);
                }
            } else if rec_stack.contains(&parent) {
                let cycle_start = path.iter().position(|&i| i == parent).unwrap_or(0);
                let mut cycle: Vec<String> = path[cycle_start..]
                    .iter()
                    .map(|&i| self.bodies[i].name.clone())
                    .collect();
                cycle.push(self.bodies[parent].name.clone());
                return Some(cycle);
            }
        }

        path.pop();
        rec_stack.remove(&index);
        None
    }

    /// Number of bodies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the system has no bodies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Bodies in host order.
    #[must_use]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Consumes the system, returning the bodies in host order.
    #[must_use]
    pub fn into_bodies(self) -> Vec<Body> {
        self.bodies
    }

    /// Body at `index`.
    ///
    /// # Panics
    ///
    /// If `index` is out of bounds.
    #[must_use]
    pub fn body(&self, index: usize) -> &Body {
        &self.bodies[index]
    }

    /// Mutable body at `index`.
    ///
    /// # Panics
    ///
    /// If `index` is out of bounds.
    pub fn body_mut(&mut self, index: usize) -> &mut Body {
        &mut self.bodies[index]
    }

    /// Pristine copy of the body at `index`, as first provided.
    ///
    /// # Panics
    ///
    /// If `index` is out of bounds.
    #[must_use]
    pub fn reference(&self, index: usize) -> &Body {
        &self.references[index]
    }

    /// Replaces the body at `index` wholesale, e.g. to roll back a rule.
    ///
    /// # Panics
    ///
    /// If `index` is out of bounds.
    pub fn restore_body(&mut self, index: usize, body: Body) {
        self.bodies[index] = body;
    }

    /// Index of the body called `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Body called `name`.
    ///
    /// # Errors
    ///
    /// `UnknownBody` if there is no such body.
    pub fn get(&self, name: &str) -> TweakResult<&Body> {
        self.index_of(name)
            .map(|i| &self.bodies[i])
            .ok_or_else(|| TweakError::UnknownBody(name.to_string()))
    }

    /// Index of the parent of the body at `index`.
    #[must_use]
    pub fn parent(&self, index: usize) -> Option<usize> {
        self.bodies[index]
            .parent
            .as_deref()
            .and_then(|name| self.index_of(name))
    }

    /// Children of the body at `index`, in host order.
    #[must_use]
    pub fn children(&self, index: usize) -> Vec<usize> {
        (0..self.bodies.len())
            .filter(|&i| self.parent(i) == Some(index))
            .collect()
    }

    /// Children ordered by ascending semi-major axis, ties in host order.
    fn children_by_distance(&self, index: usize) -> Vec<usize> {
        let mut children = self.children(index);
        children.sort_by(|&a, &b| {
            self.bodies[a]
                .semi_major_axis()
                .total_cmp(&self.bodies[b].semi_major_axis())
        });
        children
    }

    /// Zero-based position of the body among its siblings by semi-major axis.
    ///
    /// `None` for roots.
    #[must_use]
    pub fn orbital_index(&self, index: usize) -> Option<usize> {
        let parent = self.parent(index)?;
        self.children_by_distance(parent)
            .iter()
            .position(|&child| child == index)
    }

    /// First star strictly above the body in the orbit chain.
    #[must_use]
    pub fn nearest_star(&self, index: usize) -> Option<usize> {
        let mut current = self.parent(index);
        while let Some(i) = current {
            if self.bodies[i].is_star() {
                return Some(i);
            }
            current = self.parent(i);
        }
        None
    }

    /// Body indices depth first from each root, children nearest first.
    #[must_use]
    pub fn sorted(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.bodies.len());
        let mut stack: Vec<usize> = (0..self.bodies.len())
            .filter(|&i| self.parent(i).is_none())
            .rev()
            .collect();

        while let Some(index) = stack.pop() {
            order.push(index);
            stack.extend(self.children_by_distance(index).into_iter().rev());
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{BodyKind, Orbit};

    fn orbit(sma: f64) -> Orbit {
        Orbit {
            semi_major_axis: sma,
            ..Orbit::default()
        }
    }

    fn create_test_system() -> PlanetarySystem {
        PlanetarySystem::new(vec![
            Body::new("Sun", BodyKind::Star),
            Body::new("Far", BodyKind::Gaseous).orbiting("Sun", orbit(9.0e10)),
            Body::new("Near", BodyKind::Rocky).orbiting("Sun", orbit(1.0e10)),
            Body::new("FarMoonOuter", BodyKind::Rocky).orbiting("Far", orbit(5.0e7)),
            Body::new("FarMoonInner", BodyKind::Rocky).orbiting("Far", orbit(1.0e7)),
        ])
        .expect("valid system")
    }

    #[test]
    fn test_orbital_index_by_distance() {
        let system = create_test_system();
        let idx = |name| system.index_of(name).unwrap();

        assert_eq!(system.orbital_index(idx("Near")), Some(0));
        assert_eq!(system.orbital_index(idx("Far")), Some(1));
        assert_eq!(system.orbital_index(idx("FarMoonInner")), Some(0));
        assert_eq!(system.orbital_index(idx("FarMoonOuter")), Some(1));
        assert_eq!(system.orbital_index(idx("Sun")), None);
    }

    #[test]
    fn test_nearest_star() {
        let system = create_test_system();
        let idx = |name| system.index_of(name).unwrap();

        assert_eq!(system.nearest_star(idx("FarMoonInner")), Some(idx("Sun")));
        assert_eq!(system.nearest_star(idx("Near")), Some(idx("Sun")));
        assert_eq!(system.nearest_star(idx("Sun")), None);
    }

    #[test]
    fn test_sorted_depth_first() {
        let system = create_test_system();
        let names: Vec<&str> = system
            .sorted()
            .into_iter()
            .map(|i| system.body(i).name.as_str())
            .collect();
        assert_eq!(names, vec!["Sun", "Near", "Far", "FarMoonInner", "FarMoonOuter"]);
    }

    #[test]
    fn test_duplicate_and_unknown_parent() {
        let duplicate = PlanetarySystem::new(vec![
            Body::new("Sun", BodyKind::Star),
            Body::new("Sun", BodyKind::Star),
        ]);
        assert_eq!(duplicate.unwrap_err(), TweakError::DuplicateBody("Sun".to_string()));

        let orphan = PlanetarySystem::new(vec![Body::new("Lost", BodyKind::Rocky).orbiting("Nowhere", orbit(1.0))]);
        assert!(matches!(orphan, Err(TweakError::UnknownParent { .. })));
    }

    #[test]
    fn test_detect_cycle() {
        let result = PlanetarySystem::new(vec![
            Body::new("A", BodyKind::Rocky).orbiting("B", orbit(1.0)),
            Body::new("B", BodyKind::Rocky).orbiting("C", orbit(1.0)),
            Body::new("C", BodyKind::Rocky).orbiting("A", orbit(1.0)),
        ]);
        let Err(TweakError::CycleDetected(cycle)) = result else {
            panic!("cycle must be rejected");
        };
        assert_eq!(cycle.first(), cycle.last());
        assert_eq!(cycle.len(), 4);
    }

    #[test]
    fn test_reference_survives_edits() {
        let mut system = create_test_system();
        let near = system.index_of("Near").unwrap();
        system.body_mut(near).display_name = "Changed".to_string();

        assert_eq!(system.reference(near).display_name, "Near");
        assert_eq!(system.get("Near").unwrap().display_name, "Changed");
        assert!(system.get("Pluto").is_err());
    }
}
