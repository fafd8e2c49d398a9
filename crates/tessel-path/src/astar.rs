use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hashbrown::HashMap;
use tessel_world::{LightLevel, RegionError, World};

use crate::error::PathError;
use crate::obstacles::ObstacleMask;
use crate::walk::PathQuery;

/// Searches give up once more than this many distinct nodes have been discovered.
pub const MAX_VISITED: usize = 4096;

type Node = (i32, i32, i32);

/// A path node plus the packed light at head height (one cell above).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Waypoint {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub light: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Open {
    f: u32,
    g: u32,
    node: Node,
}

impl Ord for Open {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap behavior; deeper nodes first on ties
        other
            .f
            .cmp(&self.f)
            .then_with(|| self.g.cmp(&other.g))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Open {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct Record {
    g: u32,
    parent: Option<Node>,
    closed: bool,
}

#[inline]
fn manhattan(a: Node, b: Node) -> u32 {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1) + a.2.abs_diff(b.2)
}

fn check_point(world: &World, (x, y, z): Node) -> Result<(), RegionError> {
    if world.desc.contains(x, y, z) {
        Ok(())
    } else {
        Err(RegionError::PointOutOfBounds { x, y, z })
    }
}

fn head_light(world: &World, (x, y, z): Node) -> u16 {
    world
        .voxel(x, y + 1, z)
        .map(|v| {
            LightLevel {
                block: v.block_light,
                sun: v.sunlight,
            }
            .packed()
        })
        .unwrap_or(0)
}

/// A* from `from` to `to` for an agent `height` cells tall. Both endpoints
/// are feet cells; the returned waypoints include both.
pub fn find_path(
    world: &World,
    obstacles: &ObstacleMask,
    height: i32,
    from: (i32, i32, i32),
    to: (i32, i32, i32),
) -> Result<Vec<Waypoint>, PathError> {
    check_point(world, from)?;
    check_point(world, to)?;
    let query = PathQuery::new(world, obstacles, height);

    let mut records: HashMap<Node, Record> = HashMap::new();
    let mut open = BinaryHeap::new();
    let mut steps = Vec::with_capacity(4);
    records.insert(
        from,
        Record {
            g: 0,
            parent: None,
            closed: false,
        },
    );
    open.push(Open {
        f: manhattan(from, to),
        g: 0,
        node: from,
    });

    while let Some(Open { g, node, .. }) = open.pop() {
        if records.len() > MAX_VISITED {
            log::debug!(target: "path", "{:?} -> {:?}: gave up after {} nodes", from, to, records.len());
            return Err(PathError::SearchLimit {
                visited: records.len(),
            });
        }
        let Some(rec) = records.get_mut(&node) else {
            continue;
        };
        // stale heap entry
        if rec.closed || g > rec.g {
            continue;
        }
        rec.closed = true;

        if node == to {
            let path = unwind(world, &records, to);
            log::debug!(
                target: "path",
                "{:?} -> {:?}: {} waypoints, cost {}, {} nodes",
                from,
                to,
                path.len(),
                g,
                records.len()
            );
            return Ok(path);
        }

        query.neighbors_into(node, &mut steps);
        for step in &steps {
            let ng = g + step.cost;
            let better = match records.get(&step.to) {
                Some(r) => !r.closed && ng < r.g,
                None => true,
            };
            if !better {
                continue;
            }
            records.insert(
                step.to,
                Record {
                    g: ng,
                    parent: Some(node),
                    closed: false,
                },
            );
            open.push(Open {
                f: ng + manhattan(step.to, to),
                g: ng,
                node: step.to,
            });
        }
    }

    log::debug!(target: "path", "{:?} -> {:?}: unreachable after {} nodes", from, to, records.len());
    Err(PathError::Unreachable)
}

fn unwind(world: &World, records: &HashMap<Node, Record>, goal: Node) -> Vec<Waypoint> {
    let mut out = Vec::new();
    let mut cur = Some(goal);
    while let Some(node) = cur {
        out.push(Waypoint {
            x: node.0,
            y: node.1,
            z: node.2,
            light: head_light(world, node),
        });
        cur = records.get(&node).and_then(|r| r.parent);
    }
    out.reverse();
    out
}
