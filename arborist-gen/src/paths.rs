//! Connectivity resolution over classified positions.
//!
//! Logs are joined into a spanning tree rooted at the seed positions, each log
//! pointing at its parent through a [`BranchDirection`]. Leaves are labelled
//! with their step distance to the nearest log.

use std::collections::{HashMap, HashSet, VecDeque};
use std::str::FromStr;

use crate::direction::BranchDirection;
use crate::error::{DecomposeError, Result};
use crate::pos::BlockPos;

/// Which neighbours a leaf distance step may move to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeafConnectivity {
    /// The six face neighbours, as leaf decay counts distance in-game.
    Faces,
    /// All 26 neighbours sharing a face, edge or corner.
    #[default]
    Full,
}

impl LeafConnectivity {
    pub fn steps(self) -> Vec<BlockPos> {
        let mut steps = Vec::with_capacity(26);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let step = BlockPos::new(dx, dy, dz);
                    let keep = match self {
                        LeafConnectivity::Faces => step.norm1() == 1,
                        LeafConnectivity::Full => step != BlockPos::ZERO,
                    };
                    if keep {
                        steps.push(step);
                    }
                }
            }
        }
        steps
    }
}

impl FromStr for LeafConnectivity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "faces" | "6" => Ok(LeafConnectivity::Faces),
            "full" | "26" => Ok(LeafConnectivity::Full),
            other => Err(format!(
                "Unknown leaf connectivity '{}', expected 'faces' or 'full'",
                other
            )),
        }
    }
}

/// Assigns every log a direction to its parent, searching outwards from `seeds`.
///
/// Seeds must themselves be logs and are assigned [`BranchDirection::None`].
/// Candidate parents are tried strongest direction first; a log already
/// reached may be moved to a stronger connection later in the search, unless
/// it is already an ancestor of the new parent.
pub fn find_log_paths<V>(
    seeds: &[BlockPos],
    logs: &HashMap<BlockPos, V>,
) -> Result<HashMap<BlockPos, BranchDirection>> {
    let mut queue: VecDeque<BlockPos> = seeds.iter().copied().collect();
    let mut paths: HashMap<BlockPos, BranchDirection> =
        seeds.iter().map(|pos| (*pos, BranchDirection::None)).collect();

    while let Some(pos) = queue.pop_front() {
        for direction in BranchDirection::ALL {
            if direction.is_root() {
                continue;
            }
            // The neighbour that would have `pos` as its parent through `direction`
            let adj = pos - direction.offset();
            if !logs.contains_key(&adj) {
                continue;
            }
            match paths.get(&adj).copied() {
                None => {
                    paths.insert(adj, direction);
                    queue.push_back(adj);
                }
                Some(existing) if direction.strength() < existing.strength() => {
                    if !descends_from(&paths, pos, adj) {
                        paths.insert(adj, direction);
                    }
                }
                Some(_) => {}
            }
        }
    }

    if paths.len() < logs.len() {
        let mut unreached: Vec<BlockPos> =
            logs.keys().filter(|p| !paths.contains_key(p)).copied().collect();
        unreached.sort();
        return Err(DecomposeError::DisconnectedLogs { positions: unreached });
    }

    check_acyclic(&paths)?;
    Ok(paths)
}

/// Whether `ancestor` lies on the parent chain from `pos` down to its root.
///
/// The search only ever extends a forest, so the chain ends at a root within
/// `paths.len()` steps.
fn descends_from(
    paths: &HashMap<BlockPos, BranchDirection>,
    pos: BlockPos,
    ancestor: BlockPos,
) -> bool {
    let mut current = pos;
    for _ in 0..=paths.len() {
        if current == ancestor {
            return true;
        }
        match paths.get(&current) {
            Some(direction) if !direction.is_root() => current = current + direction.offset(),
            _ => return false,
        }
    }
    false
}

/// Walks every parent chain down to a root, failing on the first chain that loops.
fn check_acyclic(paths: &HashMap<BlockPos, BranchDirection>) -> Result<()> {
    let mut starts: Vec<BlockPos> = paths.keys().copied().collect();
    starts.sort();

    let mut grounded: HashSet<BlockPos> = HashSet::with_capacity(paths.len());
    for start in starts {
        let mut trail = Vec::new();
        let mut pos = start;
        while !grounded.contains(&pos) {
            if trail.contains(&pos) {
                return Err(DecomposeError::CyclicBranches { at: pos });
            }
            trail.push(pos);
            match paths.get(&pos) {
                Some(direction) if !direction.is_root() => pos = pos + direction.offset(),
                _ => break,
            }
        }
        grounded.extend(trail);
    }
    Ok(())
}

/// Breadth-first distance from the log set to every leaf. Leaves touching a log get 1.
pub fn find_leaf_paths<L, F>(
    logs: &HashMap<BlockPos, L>,
    leaves: &HashMap<BlockPos, F>,
    connectivity: LeafConnectivity,
) -> Result<HashMap<BlockPos, u32>> {
    let steps = connectivity.steps();
    let mut queue: VecDeque<(BlockPos, u32)> = logs.keys().map(|pos| (*pos, 0)).collect();
    let mut paths: HashMap<BlockPos, u32> = HashMap::with_capacity(leaves.len());

    while let Some((pos, dist)) = queue.pop_front() {
        for step in &steps {
            let adj = pos + *step;
            if leaves.contains_key(&adj) && !paths.contains_key(&adj) && !logs.contains_key(&adj) {
                paths.insert(adj, dist + 1);
                queue.push_back((adj, dist + 1));
            }
        }
    }

    if paths.len() < leaves.len() {
        let mut unreached: Vec<BlockPos> =
            leaves.keys().filter(|p| !paths.contains_key(p)).copied().collect();
        unreached.sort();
        return Err(DecomposeError::DisconnectedLeaves { positions: unreached });
    }
    Ok(paths)
}
