use glam::Vec2;
use thiserror::Error;

use crate::engine::angle::point_to_angle;

pub type LinedefId = u16;
pub type SegmentId = u16;
pub type VertexId = u16;
pub type SidedefId = u16;
pub type SectorId = u16;

/// BGR555 colour, as the tile hardware expects it.
pub type Color = u16;

/// Runtime snapshot of one map (immutable after load).
#[derive(Debug)]
pub struct Level {
    pub linedefs: Vec<Linedef>,
    pub sidedefs: Vec<Sidedef>,
    pub vertices: Vec<Vertex>,
    pub segs: Vec<Seg>,
    pub sectors: Vec<Sector>,
}

/*--------------------------- linedefs -------------------------------*/

#[derive(Clone, Debug)]
pub struct Linedef {
    pub v1: VertexId,
    pub v2: VertexId,
    pub right_sidedef: SidedefId,
    pub left_sidedef: Option<SidedefId>,
}

impl Linedef {
    /// Portal between two sectors.
    #[inline]
    pub fn is_two_sided(&self) -> bool {
        self.left_sidedef.is_some()
    }
}

/*--------------------------- sidedefs -------------------------------*/

#[derive(Clone, Debug)]
pub struct Sidedef {
    pub sector: SectorId,
}

/*----------------------- simple primitives --------------------------*/

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub pos: Vec2,
}

/// One side of a linedef as seen from the sector it bounds.
///
/// Endpoints are copied out of the vertex list so the wall code never
/// chases indices.
#[derive(Clone, Debug)]
pub struct Seg {
    pub v1: Vec2,
    pub v2: Vec2,
    pub angle: f32, // map angle of v1 → v2
    pub linedef: LinedefId,
    pub dir: u16, // 0 = right side, 1 = left side (reversed)
    pub front_sector: SectorId,
    pub back_sector: Option<SectorId>,
}

impl Seg {
    #[inline]
    pub fn is_portal(&self) -> bool {
        self.back_sector.is_some()
    }
}

#[derive(Clone, Debug)]
pub struct Sector {
    pub color: Color,
    /// Every seg bounding this sector, in linedef order.
    pub segs: Vec<SegmentId>,
}

/*=======================================================================*/
/*                                Errors                                 */
/*=======================================================================*/

#[derive(Debug, Error, PartialEq)]
pub enum LevelError {
    #[error("linedef {linedef} references unknown vertex {vertex}")]
    UnknownVertex { linedef: usize, vertex: VertexId },

    #[error("linedef {linedef} references unknown sector {sector}")]
    UnknownSector { linedef: usize, sector: SectorId },

    #[error("linedef {0} has zero length")]
    ZeroLength(usize),

    #[error("sector {0} has no segs")]
    EmptySector(SectorId),

    #[error("bsp leaf references unknown sector {0}")]
    LeafSector(SectorId),

    #[error("sector {sector} is reached by {leaves} bsp leaves, expected exactly one")]
    LeafCount { sector: SectorId, leaves: usize },

    #[error("seg {seg} of sector {sector} lies on the wrong side of a splitter")]
    WrongSide { sector: SectorId, seg: SegmentId },

    #[error("bsp splitter has a zero-length direction")]
    DegenerateSplitter,

    #[error("{count} {kind} do not fit 16-bit ids (at most {max})", max = MAX_IDS)]
    TooMany { kind: &'static str, count: usize },
}

/// Number of distinct values a 16-bit id can take.
pub const MAX_IDS: usize = u16::MAX as usize + 1;

/*=======================================================================*/
/*                               Builder                                 */
/*=======================================================================*/

/// Collects raw map data and turns it into a validated [`Level`].
///
/// Ids handed out past [`MAX_IDS`] entries wrap; `build` rejects such a
/// level with [`LevelError::TooMany`].
#[derive(Default, Debug)]
pub struct LevelBuilder {
    vertices: Vec<Vertex>,
    linedefs: Vec<(VertexId, VertexId, SectorId, Option<SectorId>)>,
    sector_colors: Vec<Color>,
}

impl LevelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex(&mut self, x: f32, y: f32) -> VertexId {
        self.vertices.push(Vertex {
            pos: Vec2::new(x, y),
        });
        (self.vertices.len() - 1) as VertexId
    }

    pub fn sector(&mut self, color: Color) -> SectorId {
        self.sector_colors.push(color);
        (self.sector_colors.len() - 1) as SectorId
    }

    /// `right` is the sector on the right of `v1 → v2`; a `left` sector
    /// turns the line into a portal.
    pub fn linedef(
        &mut self,
        v1: VertexId,
        v2: VertexId,
        right: SectorId,
        left: Option<SectorId>,
    ) -> LinedefId {
        self.linedefs.push((v1, v2, right, left));
        (self.linedefs.len() - 1) as LinedefId
    }

    pub fn build(self) -> Result<Level, LevelError> {
        // every linedef side becomes one sidedef and one seg
        let sides = self.linedefs.len()
            + self.linedefs.iter().filter(|l| l.3.is_some()).count();
        for (kind, count) in [
            ("vertices", self.vertices.len()),
            ("sectors", self.sector_colors.len()),
            ("linedefs", self.linedefs.len()),
            ("sides", sides),
        ] {
            if count > MAX_IDS {
                return Err(LevelError::TooMany { kind, count });
            }
        }

        let mut sidedefs = Vec::new();
        let mut linedefs = Vec::with_capacity(self.linedefs.len());

        for (i, &(v1, v2, right, left)) in self.linedefs.iter().enumerate() {
            for v in [v1, v2] {
                if v as usize >= self.vertices.len() {
                    return Err(LevelError::UnknownVertex {
                        linedef: i,
                        vertex: v,
                    });
                }
            }
            for s in std::iter::once(right).chain(left) {
                if s as usize >= self.sector_colors.len() {
                    return Err(LevelError::UnknownSector {
                        linedef: i,
                        sector: s,
                    });
                }
            }
            if self.vertices[v1 as usize].pos == self.vertices[v2 as usize].pos {
                return Err(LevelError::ZeroLength(i));
            }

            sidedefs.push(Sidedef { sector: right });
            let right_sidedef = (sidedefs.len() - 1) as SidedefId;
            let left_sidedef = left.map(|sector| {
                sidedefs.push(Sidedef { sector });
                (sidedefs.len() - 1) as SidedefId
            });
            linedefs.push(Linedef {
                v1,
                v2,
                right_sidedef,
                left_sidedef,
            });
        }

        let mut level = Level {
            linedefs,
            sidedefs,
            vertices: self.vertices,
            segs: Vec::new(),
            sectors: self
                .sector_colors
                .into_iter()
                .map(|color| Sector {
                    color,
                    segs: Vec::new(),
                })
                .collect(),
        };
        level.init_sector_segs();

        if let Some(empty) = level.sectors.iter().position(|s| s.segs.is_empty()) {
            return Err(LevelError::EmptySector(empty as SectorId));
        }
        Ok(level)
    }
}

/*=======================================================================*/
/*                          Level – seg setup                            */
/*=======================================================================*/

impl Level {
    /// Derive every sector's seg list from the linedefs.
    ///
    /// The right side becomes a seg `v1 → v2` owned by the right sector.
    /// The left side of a portal becomes the reversed seg `v2 → v1` owned
    /// by the left sector, so each seg keeps its own sector on the right.
    pub fn init_sector_segs(&mut self) {
        self.segs.clear();
        for sector in &mut self.sectors {
            sector.segs.clear();
        }

        for (id, ld) in self.linedefs.iter().enumerate() {
            let a = self.vertices[ld.v1 as usize].pos;
            let b = self.vertices[ld.v2 as usize].pos;
            let right = self.sidedefs[ld.right_sidedef as usize].sector;
            let left = ld.left_sidedef.map(|s| self.sidedefs[s as usize].sector);

            let sides = std::iter::once((a, b, 0, right, left))
                .chain(left.map(|l| (b, a, 1, l, Some(right))));
            for (v1, v2, dir, front, back) in sides {
                self.segs.push(Seg {
                    v1,
                    v2,
                    angle: point_to_angle(v1, v2),
                    linedef: id as LinedefId,
                    dir,
                    front_sector: front,
                    back_sector: back,
                });
                let seg_id = (self.segs.len() - 1) as SegmentId;
                self.sectors[front as usize].segs.push(seg_id);
            }
        }
    }

    #[inline]
    pub fn segs_of(&self, sector: SectorId) -> impl Iterator<Item = (SegmentId, &Seg)> + '_ {
        self.sectors[sector as usize]
            .segs
            .iter()
            .map(|&id| (id, &self.segs[id as usize]))
    }
}
