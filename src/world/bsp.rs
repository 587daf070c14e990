use std::ops::ControlFlow;

use glam::Vec2;

use crate::world::geometry::{Level, LevelError, LinedefId, SectorId};

/*──────────────────────────── Splitter ─────────────────────────────*/

/// Partition line of one BSP node: a point on the line and its direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Splitter {
    pub origin: Vec2,
    pub dir: Vec2,
}

impl Splitter {
    /// Splitter running along linedef `id`, from its `v1` towards `v2`.
    pub fn from_linedef(level: &Level, id: LinedefId) -> Self {
        let ld = &level.linedefs[id as usize];
        let origin = level.vertices[ld.v1 as usize].pos;
        let end = level.vertices[ld.v2 as usize].pos;
        Self {
            origin,
            dir: end - origin,
        }
    }

    #[inline]
    pub fn point_on_right_side(&self, p: Vec2) -> bool {
        point_on_right_side(self.dir, p - self.origin)
    }

    /// Signed area of `(dir, rel)`; positive on the left side.
    #[inline]
    fn cross(&self, p: Vec2) -> f32 {
        let rel = p - self.origin;
        rel.x * self.dir.y - self.dir.x * rel.y
    }
}

/// Side test for a point at `rel` relative to a splitter with direction
/// `dir`. Points exactly on a diagonal splitter count as left; the
/// axis-aligned shortcuts settle them by the direction's sign instead.
///
/// Axis-aligned splitters compare one coordinate. The general case first
/// settles on sign bits alone when they disagree, then falls back to the
/// cross product.
pub fn point_on_right_side(dir: Vec2, rel: Vec2) -> bool {
    let left = if dir.y == 0.0 {
        if rel.y <= 0.0 { dir.x > 0.0 } else { dir.x < 0.0 }
    } else if dir.x == 0.0 {
        if rel.x <= 0.0 { dir.y < 0.0 } else { dir.y > 0.0 }
    } else {
        let negatives = [dir.x, dir.y, rel.x, rel.y]
            .iter()
            .filter(|&&v| v < 0.0)
            .count();
        if negatives % 2 == 1 {
            (dir.x < 0.0) != (rel.y < 0.0)
        } else {
            rel.x * dir.y >= dir.x * rel.y
        }
    };
    !left
}

/*──────────────────────────── Tree ─────────────────────────────────*/

/// Binary space partition over convex sectors.
#[derive(Clone, Debug)]
pub enum BspTree {
    Node {
        splitter: Splitter,
        right: Box<BspTree>,
        left: Box<BspTree>,
    },
    Leaf {
        sector: SectorId,
    },
}

impl BspTree {
    pub fn node(splitter: Splitter, right: BspTree, left: BspTree) -> Self {
        BspTree::Node {
            splitter,
            right: Box::new(right),
            left: Box::new(left),
        }
    }

    pub fn leaf(sector: SectorId) -> Self {
        BspTree::Leaf { sector }
    }

    /// Visit every leaf sector nearest-first as seen from `p`.
    ///
    /// The side containing `p` is walked before the far side. `visit` can
    /// stop the walk by returning `Break`.
    pub fn front_to_back<F>(&self, p: Vec2, visit: &mut F) -> ControlFlow<()>
    where
        F: FnMut(SectorId) -> ControlFlow<()>,
    {
        match self {
            BspTree::Leaf { sector } => visit(*sector),
            BspTree::Node {
                splitter,
                right,
                left,
            } => {
                let (near, far) = if splitter.point_on_right_side(p) {
                    (right, left)
                } else {
                    (left, right)
                };
                near.front_to_back(p, visit)?;
                far.front_to_back(p, visit)
            }
        }
    }

    pub fn sectors_front_to_back(&self, p: Vec2) -> Vec<SectorId> {
        let mut order = Vec::new();
        let _ = self.front_to_back(p, &mut |s| {
            order.push(s);
            ControlFlow::Continue(())
        });
        order
    }

    /// Sector whose leaf contains `p`.
    pub fn locate_sector(&self, p: Vec2) -> SectorId {
        let mut node = self;
        loop {
            match node {
                BspTree::Leaf { sector } => return *sector,
                BspTree::Node {
                    splitter,
                    right,
                    left,
                } => {
                    node = if splitter.point_on_right_side(p) {
                        right.as_ref()
                    } else {
                        left.as_ref()
                    }
                }
            }
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            BspTree::Leaf { .. } => 0,
            BspTree::Node { right, left, .. } => 1 + right.depth().max(left.depth()),
        }
    }

    /// Check the tree against `level`: every sector reached by exactly one
    /// leaf, no zero-length splitters, and every seg of a leaf's sector on
    /// that leaf's side of each ancestor splitter (points on the line are
    /// fine).
    pub fn validate(&self, level: &Level) -> Result<(), LevelError> {
        let mut hits = vec![0usize; level.sectors.len()];
        let mut path = Vec::new();
        self.validate_rec(level, &mut path, &mut hits)?;

        if let Some((sector, &leaves)) = hits.iter().enumerate().find(|&(_, &n)| n != 1) {
            return Err(LevelError::LeafCount {
                sector: sector as SectorId,
                leaves,
            });
        }
        Ok(())
    }

    fn validate_rec(
        &self,
        level: &Level,
        path: &mut Vec<(Splitter, bool)>,
        hits: &mut [usize],
    ) -> Result<(), LevelError> {
        match self {
            BspTree::Leaf { sector } => {
                let count = hits
                    .get_mut(*sector as usize)
                    .ok_or(LevelError::LeafSector(*sector))?;
                *count += 1;

                for (seg_id, seg) in level.segs_of(*sector) {
                    for &(splitter, on_right) in path.iter() {
                        let tol = 1e-3 * splitter.dir.length();
                        let wrong = [seg.v1, seg.v2].iter().any(|&v| {
                            let c = splitter.cross(v);
                            if on_right { c > tol } else { c < -tol }
                        });
                        if wrong {
                            return Err(LevelError::WrongSide {
                                sector: *sector,
                                seg: seg_id,
                            });
                        }
                    }
                }
                Ok(())
            }
            BspTree::Node {
                splitter,
                right,
                left,
            } => {
                if splitter.dir == Vec2::ZERO {
                    return Err(LevelError::DegenerateSplitter);
                }
                path.push((*splitter, true));
                right.validate_rec(level, path, hits)?;
                path.pop();
                path.push((*splitter, false));
                left.validate_rec(level, path, hits)?;
                path.pop();
                Ok(())
            }
        }
    }
}
