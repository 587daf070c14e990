//! Built-in three-sector test map.
//!
//! A large diamond (sector 0) with two small rooms carved out of its
//! bottom corner. Sector 1 opens onto sector 0 through linedef 5 and onto
//! sector 2 through linedef 8; sector 2 opens onto sector 0 through
//! linedef 3.
//!
//! ```text
//!                 (0,200)
//!                  /   \
//!                /   0   \
//!   (-200,0) <              > (200,0)
//!                \       /
//!          (-60,-140)-(60,-140)
//!             \  1 | 2  /
//!               (0,-200)
//! ```

use crate::world::{
    bsp::{BspTree, Splitter},
    geometry::{Level, LevelBuilder, LevelError},
};

/// A level together with its partition tree.
#[derive(Debug)]
pub struct DemoMap {
    pub level: Level,
    pub bsp: BspTree,
}

pub fn triangle_map() -> Result<DemoMap, LevelError> {
    let mut b = LevelBuilder::new();

    let s0 = b.sector(0x001F);
    let s1 = b.sector(0x7C00);
    let s2 = b.sector(0x03E0);

    let v: Vec<_> = [
        (-200.0, 0.0),
        (0.0, 200.0),
        (200.0, 0.0),
        (0.0, -200.0),
        (40.0, -140.0),
        (-40.0, -140.0),
        (0.0, -180.0),
        (60.0, -140.0),
        (-60.0, -140.0),
        (10.0, -190.0),
    ]
    .iter()
    .map(|&(x, y)| b.vertex(x, y))
    .collect();

    b.linedef(v[0], v[1], s0, None);
    b.linedef(v[1], v[2], s0, None);
    b.linedef(v[2], v[7], s0, None);
    b.linedef(v[7], v[4], s0, Some(s2));
    b.linedef(v[4], v[5], s0, None);
    b.linedef(v[5], v[8], s0, Some(s1));
    b.linedef(v[8], v[0], s0, None);
    b.linedef(v[5], v[6], s1, None);
    b.linedef(v[6], v[9], s1, Some(s2));
    b.linedef(v[9], v[3], s1, None);
    b.linedef(v[3], v[8], s1, None);
    b.linedef(v[6], v[4], s2, None);
    b.linedef(v[7], v[9], s2, None);

    let level = b.build()?;

    let bsp = BspTree::node(
        Splitter::from_linedef(&level, 4),
        BspTree::node(
            Splitter::from_linedef(&level, 7),
            BspTree::leaf(s2),
            BspTree::leaf(s1),
        ),
        BspTree::leaf(s0),
    );
    bsp.validate(&level)?;

    Ok(DemoMap { level, bsp })
}
