//! Mood-to-mood transitions shared by the rasa map and the Western modes.
//!
//! Both systems describe a graph of "compatible" moods with an energy level
//! on each node; a set list moves along its edges.

use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

/// Longest path, in moods including both ends, tried by default.
pub const DEFAULT_MAX_STEPS: usize = 3;

/// Direction of the energy change along one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnergyTransition {
    #[serde(rename = "Energy boost")]
    Boost,
    #[serde(rename = "Energy reduction")]
    Reduction,
    #[serde(rename = "Energy maintenance")]
    Maintenance,
}

impl EnergyTransition {
    pub fn between(from: u8, to: u8) -> Self {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => EnergyTransition::Boost,
            std::cmp::Ordering::Less => EnergyTransition::Reduction,
            std::cmp::Ordering::Equal => EnergyTransition::Maintenance,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EnergyTransition::Boost => "Energy boost",
            EnergyTransition::Reduction => "Energy reduction",
            EnergyTransition::Maintenance => "Energy maintenance",
        }
    }
}

/// Direction of the emotional-intensity change along one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IntensityTransition {
    #[serde(rename = "Intensity increase")]
    Increase,
    #[serde(rename = "Intensity decrease")]
    Decrease,
    #[serde(rename = "Intensity maintenance")]
    Maintenance,
}

impl IntensityTransition {
    pub fn between(from: u8, to: u8) -> Self {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => IntensityTransition::Increase,
            std::cmp::Ordering::Less => IntensityTransition::Decrease,
            std::cmp::Ordering::Equal => IntensityTransition::Maintenance,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IntensityTransition::Increase => "Intensity increase",
            IntensityTransition::Decrease => "Intensity decrease",
            IntensityTransition::Maintenance => "Intensity maintenance",
        }
    }
}

/// `|to - from| / from` as a percentage. Energy levels start at 1.
pub fn energy_difference_percent(from: u8, to: u8) -> f64 {
    (f64::from(to) - f64::from(from)).abs() / f64::from(from) * 100.0
}

/// Breadth-first shortest path from `start` to `end`.
///
/// `max_steps` bounds the path length counted in nodes, both ends included,
/// so `max_steps = 3` allows one intermediate mood. A path from a node to
/// itself is just that node.
pub(crate) fn shortest_path<T, F>(start: T, end: T, max_steps: usize, neighbours: F) -> Option<Vec<T>>
where
    T: Copy + Eq + Hash + 'static,
    F: Fn(T) -> &'static [T],
{
    if start == end {
        return Some(vec![start]);
    }

    let mut visited: HashSet<T> = HashSet::from([start]);
    let mut queue: VecDeque<Vec<T>> = VecDeque::from([vec![start]]);

    while let Some(path) = queue.pop_front() {
        let current = path[path.len() - 1];
        if current == end {
            return Some(path);
        }
        if path.len() >= max_steps {
            continue;
        }
        for &next in neighbours(current) {
            if visited.insert(next) {
                let mut extended = path.clone();
                extended.push(next);
                queue.push_back(extended);
            }
        }
    }
    None
}
