//! frame_dump - rebuild frames of the built-in map and print what the
//! per-row tables would hand to the background hardware.
//!
//! USAGE:
//! ```bash
//! cargo run --bin frame_dump -- --x 0 --y 0 --heading 1.67 --rows
//! cargo run --bin frame_dump -- --frames 4 --turn 0.05 -v debug
//! ```

use clap::Parser;
use glam::Vec2;
use log::info;
use simplelog::TermLogger;

use m7_bsp::{
    Engine, Screen,
    world::{Camera, demo::triangle_map},
};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Screen width in pixels (window columns)
    #[arg(long, default_value_t = 240)]
    width: usize,

    /// Screen height in pixels (sweep-axis rows)
    #[arg(long, default_value_t = 160)]
    height: usize,

    /// Full field of view in degrees
    #[arg(long, default_value_t = 90.0)]
    fov: f32,

    /// Camera x
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    x: f32,

    /// Camera y
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    y: f32,

    /// Camera heading in radians (0 faces -x)
    #[arg(long, default_value_t = std::f32::consts::FRAC_PI_2 + 0.1, allow_negative_numbers = true)]
    heading: f32,

    /// Heading change applied before every frame after the first
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    turn: f32,

    /// Forward step applied before every frame after the first
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    step: f32,

    /// Number of frames to run
    #[arg(long, default_value_t = 1)]
    frames: u32,

    /// Print every row's affine parameters and window
    #[arg(long)]
    rows: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, value_name = "LEVEL", default_value = "info")]
    verbose: log::LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    TermLogger::init(
        opts.verbose,
        simplelog::ConfigBuilder::default()
            .set_time_level(log::LevelFilter::Trace)
            .build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let screen = Screen::new(opts.width, opts.height, (opts.fov * 0.5).to_radians())?;
    let map = triangle_map()?;
    let camera = Camera::new(Vec2::new(opts.x, opts.y), opts.heading);
    info!(
        "camera at ({}, {}) heading {:.4} in sector {}",
        opts.x,
        opts.y,
        camera.heading,
        map.bsp.locate_sector(camera.pos)
    );

    let mut engine = Engine::new(map.level, map.bsp, camera, screen);

    let level = &engine.level;
    info!(
        "map: {} linedefs ({} two-sided), {} segs, {} sectors",
        level.linedefs.len(),
        level.linedefs.iter().filter(|ld| ld.is_two_sided()).count(),
        level.segs.len(),
        level.sectors.len()
    );
    let (screen, mapper) = (engine.screen(), engine.mapper());
    info!(
        "screen {}x{}, projection distance {:.3}, rows 0..={} span ±{:.4} rad",
        screen.width,
        screen.height,
        screen.projection_distance(),
        mapper.extent(),
        mapper.clip_angle()
    );

    for frame in 0..opts.frames {
        if frame > 0 {
            engine.camera.turn(opts.turn);
            engine.camera.step(opts.step, 0.0);
        }

        let change = engine.render_frame();
        println!(
            "frame {frame}: pos ({:.2}, {:.2}) heading {:.4} change {:?}",
            engine.camera.pos.x, engine.camera.pos.y, engine.camera.heading, change
        );
        if change.is_empty() {
            println!("  tables reused");
            continue;
        }

        let stats = engine.stats();
        println!(
            "  sectors {} segs {} back {} fov {} narrow {} portals {} fragments {} full {}",
            stats.sectors_visited,
            stats.segs_visited,
            stats.back_facing,
            stats.outside_fov,
            stats.too_narrow,
            stats.portals,
            stats.fragments,
            stats.fully_occluded
        );
        for ds in engine.drawsegs() {
            let seg = &engine.level.segs[ds.cur_line as usize];
            println!(
                "  seg {:>2} (linedef {:>2}, sector {}) rows {:>3}..={:<3} \
                 scale {:.4} -> {:.4} step {:+.5}",
                ds.cur_line,
                seg.linedef,
                seg.front_sector,
                ds.y1,
                ds.y2,
                ds.scale1,
                ds.scale2,
                ds.scale_step
            );
        }

        if opts.rows {
            for (y, p, w) in engine.tables().iter() {
                println!(
                    "  row {y:>3}: pa {:>9.4} dx {:>10.3} dy {:>10.3} win [{:>6.2}, {:>6.2})",
                    p.pa, p.dx, p.dy, w.left, w.right
                );
            }
        }
    }

    Ok(())
}
