use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use env_logger::Env;

use cv3_mapper::export::{save_png, write_world_metadata, ExportConfig};
use cv3_mapper::graphics::NesPalette;
use cv3_mapper::world::description::read_world;
use cv3_mapper::{render_room, render_world, Rom, RomLayout, RoomDescriptor, RoomId, World};

#[derive(Parser)]
#[command(about = "Render background maps from an Akumajou Densetsu ROM")]
struct Args {
    /// ROM file path (iNES image)
    #[arg(long)]
    rom: PathBuf,

    /// Skip oxipng optimisation of written PNGs
    #[arg(long)]
    no_optimise: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct RoomArgs {
    #[arg(long)]
    stage: u8,

    #[arg(long)]
    block: u8,

    #[arg(long)]
    room: u8,
}

impl RoomArgs {
    fn id(&self) -> RoomId {
        RoomId::new(self.stage, self.block, self.room)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Render a single room
    Room {
        #[command(flatten)]
        room: RoomArgs,

        /// Master palette file (64 RGB triples); a built-in table is used if omitted
        #[arg(long)]
        palette: Option<PathBuf>,

        /// Output PNG path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Assemble and render a world from a description file
    World {
        /// World description: `stage block room` then `stage block room side [offset [anchor]]`
        #[arg(long)]
        world: PathBuf,

        #[arg(long)]
        palette: Option<PathBuf>,

        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Room placements JSON path; defaults to the output path with a .json extension
        #[arg(long)]
        metadata: Option<PathBuf>,

        /// Do not write the placements JSON
        #[arg(long)]
        no_metadata: bool,

        /// Progress file updated as rooms are rendered
        #[arg(long)]
        progress: Option<PathBuf>,
    },
    /// Print a room's decoded metadata as JSON
    Info {
        #[command(flatten)]
        room: RoomArgs,
    },
}

fn load_palette(path: Option<&PathBuf>) -> anyhow::Result<NesPalette> {
    match path {
        Some(path) => NesPalette::open(path)
            .with_context(|| format!("Failed to load palette {}", path.display())),
        None => Ok(NesPalette::default()),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let rom = Rom::open(&args.rom, &RomLayout::default())
        .with_context(|| format!("Failed to open ROM {}", args.rom.display()))?;
    let mut config = ExportConfig {
        optimise_png: !args.no_optimise,
        ..ExportConfig::default()
    };

    match args.command {
        Command::Room {
            room,
            palette,
            output,
        } => {
            let id = room.id();
            let palette = load_palette(palette.as_ref())?;
            let descriptor = RoomDescriptor::build(&rom, id)
                .with_context(|| format!("Failed to decode room {}", id))?;
            let img = render_room(&rom, &descriptor)
                .with_context(|| format!("Failed to render room {}", id))?
                .to_rgba(&palette);

            let output = output.unwrap_or_else(|| {
                PathBuf::from(format!("room_{}_{}_{}.png", id.stage, id.block, id.room))
            });
            save_png(&img, &output, &config)?;
            log::info!("Wrote {}x{} room to {}", img.width(), img.height(), output.display());
        }
        Command::World {
            world,
            palette,
            output,
            metadata,
            no_metadata,
            progress,
        } => {
            config.write_metadata = !no_metadata;
            let palette = load_palette(palette.as_ref())?;
            let plan = read_world(&world)
                .with_context(|| format!("Failed to read world {}", world.display()))?;
            let assembled = World::assemble(&rom, &plan)?;
            let img = render_world(&rom, &assembled, &palette, progress.as_deref())?;

            let output = output.unwrap_or_else(|| {
                let stem = world.file_stem().map(|s| s.to_string_lossy().into_owned());
                PathBuf::from(format!("{}.png", stem.as_deref().unwrap_or("world")))
            });
            save_png(&img, &output, &config)?;
            log::info!("Wrote {}x{} world to {}", img.width(), img.height(), output.display());

            if config.write_metadata {
                let path = metadata.unwrap_or_else(|| output.with_extension("json"));
                write_world_metadata(&assembled, &path)?;
                log::info!("Wrote placements to {}", path.display());
            }
        }
        Command::Info { room } => {
            let id = room.id();
            let descriptor = RoomDescriptor::build(&rom, id)
                .with_context(|| format!("Failed to decode room {}", id))?;
            println!("{}", serde_json::to_string_pretty(&descriptor)?);
        }
    }

    Ok(())
}
