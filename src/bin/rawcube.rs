//! Provides the `rawcube-cli` tool for previewing cuboid scenes.
//!
//! Usage: `rawcube-cli <scene> [--size N] [--output PATH] [--dump] [--no-cull]`
//!
//! Renders a PNG next to the scene file, or prints the baked quads as JSON.
//!
//! # Examples
//! ```text
//! rawcube-cli lamp.json5 --size 256
//! RUST_LOG=rawcube=debug rawcube-cli lamp.json5 --dump
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use image::{ImageBuffer, Rgba};
use serde::Serialize;

use rawcube::model::{Quad, QuadVertex};
use rawcube::renderer::{render_quads, RenderOptions};
use rawcube::scene::{Scene, TextureData};

#[derive(Parser)]
#[command(name = "rawcube-cli", about = "Bake and preview cuboid scenes")]
struct Args {
    /// Scene file (JSON5)
    scene: PathBuf,

    /// Preview width and height in pixels
    #[arg(long, default_value_t = 256)]
    size: u32,

    /// Output PNG path (defaults to the scene path with a .png extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print baked quads as JSON instead of rendering
    #[arg(long)]
    dump: bool,

    /// Draw back faces too
    #[arg(long)]
    no_cull: bool,
}

#[derive(Serialize)]
struct QuadRecord<'a> {
    facing: String,
    texture: &'a str,
    vertices: &'a [QuadVertex; 4],
}

impl<'a> From<&'a Quad<TextureData>> for QuadRecord<'a> {
    fn from(quad: &'a Quad<TextureData>) -> Self {
        Self {
            facing: format!("{:?}", quad.facing()).to_lowercase(),
            texture: &quad.texture.name,
            vertices: &quad.vertices,
        }
    }
}

fn main() -> ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rawcube=info,rawcube_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let scene = Scene::from_path(&args.scene)?;
    let quads = scene.bake()?;
    tracing::info!(
        cuboids = scene.cuboids().len(),
        quads = quads.len(),
        "baked {}",
        args.scene.display()
    );

    if args.dump {
        let records: Vec<QuadRecord> = quads.iter().map(QuadRecord::from).collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    let options = RenderOptions {
        cull_back_faces: !args.no_cull,
    };
    let pixels = render_quads(&quads, args.size, args.size, &options)
        .ok_or("nothing to render (degenerate geometry)")?;

    let img: ImageBuffer<Rgba<u8>, _> = ImageBuffer::from_raw(args.size, args.size, pixels)
        .ok_or("pixel buffer size mismatch")?;

    let output = args
        .output
        .unwrap_or_else(|| args.scene.with_extension("png"));
    img.save(&output)?;

    tracing::info!("saved {}", output.display());
    Ok(())
}
