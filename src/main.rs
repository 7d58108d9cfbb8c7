//! ferrite-mnist: classify one handwritten digit with a pre-trained model.
//!
//! Run with:
//!   cargo run --release -- ggml-mnist-f32.bin --idx t10k-images.idx3-ubyte --render
//!   cargo run --release -- ggml-mnist-f32.bin --image digit.png --json

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::{error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ferrite_mnist::{
    input::{idx_image_count, image_bytes_to_digit, read_idx_image, render_ascii},
    network::IMAGE_SIDE,
    Inspector, Layout, LayoutPolicy, LoadOptions, LogInspector, MnistNetwork, Result, Silent,
    Tensor,
};

#[derive(Parser)]
#[command(name = "ferrite-mnist")]
#[command(about = "Classify a handwritten digit with a two-layer MNIST model")]
#[command(version)]
struct Cli {
    /// Binary model file
    model: PathBuf,

    /// IDX3 image file to pick a digit from
    #[arg(long, conflicts_with = "image", required_unless_present = "image")]
    idx: Option<PathBuf>,

    /// Image index inside the IDX file (random when omitted)
    #[arg(long, requires = "idx")]
    index: Option<usize>,

    /// Seed for the random index
    #[arg(long, requires = "idx")]
    seed: Option<u64>,

    /// PNG/JPEG/BMP/GIF image of a digit
    #[arg(long)]
    image: Option<PathBuf>,

    /// Invert image intensities (dark digit on light background)
    #[arg(long, requires = "image")]
    invert: bool,

    /// How weight records are oriented on disk
    #[arg(long, value_enum, default_value = "infer")]
    layout: LayoutArg,

    /// Draw the input digit as ASCII art on stderr
    #[arg(long)]
    render: bool,

    /// Print the prediction as JSON
    #[arg(long)]
    json: bool,

    /// Log intermediate tensors
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutArg {
    Infer,
    RowMajor,
    Transposed,
}

impl From<LayoutArg> for LayoutPolicy {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Infer => LayoutPolicy::InferFromShape,
            LayoutArg::RowMajor => LayoutPolicy::Fixed(Layout::RowMajor),
            LayoutArg::Transposed => LayoutPolicy::Fixed(Layout::TransposedSource),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            e.exit_code()
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let input = load_input(cli)?;
    if cli.render {
        eprintln!("{}", render_ascii(&input, IMAGE_SIDE));
    }

    let options = LoadOptions { layout: cli.layout.into() };
    let network = MnistNetwork::load_with(&cli.model, options)?;

    let inspector: &dyn Inspector = if cli.verbose { &LogInspector } else { &Silent };
    let prediction = network.forward_with(&input, inspector)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&prediction)?);
    } else {
        println!("Prediction : {}", prediction.digit);
    }
    Ok(())
}

fn load_input(cli: &Cli) -> Result<Tensor> {
    if let Some(path) = &cli.image {
        info!("reading image '{}'", path.display());
        let bytes = std::fs::read(path)?;
        return image_bytes_to_digit(&bytes, cli.invert);
    }

    // clap guarantees --idx when --image is absent
    let path = cli.idx.as_ref().ok_or_else(|| {
        ferrite_mnist::Error::Input("either --idx or --image is required".to_owned())
    })?;
    let bytes = std::fs::read(path)?;
    let index = match cli.index {
        Some(i) => i,
        None => {
            let count = idx_image_count(&bytes)?;
            if count == 0 {
                return Err(ferrite_mnist::Error::Input(format!(
                    "'{}' contains no images",
                    path.display()
                )));
            }
            let mut rng = match cli.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            rng.gen_range(0..count)
        }
    };
    info!("using image {} of '{}'", index, path.display());
    read_idx_image(&bytes, index)
}
