#![deny(unsafe_code)]
//! CLI binary for the Maxwell field simulator.
//!
//! Subcommands:
//! - `list`: print available laws
//! - `schema <law>`: print a law's parameter schema
//! - `frame <law>`: compute one frame and print it
//! - `render <law>`: compute one frame and write a PNG
//! - `play <law>`: run the animation driver in real time
//! - `scene <file>`: render every frame of a scene file

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use maxwell_core::{
    FieldModel, FrameData, FrameResult, IntervalClock, ManualScheduler, RenderSink, SampleGrid,
    Scene,
};
use maxwell_laws::snapshot::write_png;
use maxwell_laws::{select_law, ActiveLaw, LawDriver, LawModel};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "maxwell", about = "Maxwell field-law simulator CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List available laws.
    List,
    /// Print the parameter schema of a law.
    Schema {
        /// Law name (e.g. "faraday").
        law: String,
    },
    /// Compute a single frame and print it.
    Frame {
        /// Law name.
        law: String,

        /// Frame index.
        #[arg(short, long, default_value_t = 0)]
        frame: u64,

        /// Parameter overrides as a JSON object.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Compute a single frame and write a PNG plot.
    Render {
        /// Law name.
        law: String,

        /// Frame index.
        #[arg(short, long, default_value_t = 0)]
        frame: u64,

        /// Parameter overrides as a JSON object.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Image width in pixels.
        #[arg(short = 'W', long, default_value_t = 480)]
        width: usize,

        /// Image height in pixels.
        #[arg(short = 'H', long, default_value_t = 480)]
        height: usize,

        /// Output file path.
        #[arg(short, long, default_value = "frame.png")]
        output: PathBuf,
    },
    /// Run the animation in real time for a number of ticks.
    Play {
        /// Law name.
        law: String,

        /// Number of timer ticks to run.
        #[arg(short, long, default_value_t = 100)]
        ticks: u64,

        /// Frame index to start from (wrapped to the law's frame count).
        #[arg(short, long, default_value_t = 0)]
        frame: u64,

        /// Parameter overrides as a JSON object.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Write each frame as `frame_XXXX.png` here instead of printing summaries.
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Image width in pixels.
        #[arg(short = 'W', long, default_value_t = 480)]
        width: usize,

        /// Image height in pixels.
        #[arg(short = 'H', long, default_value_t = 480)]
        height: usize,
    },
    /// Render every frame described by a scene file.
    Scene {
        /// Path to a scene JSON file.
        file: PathBuf,

        /// Output directory for the PNG frames.
        #[arg(short, long, default_value = "frames")]
        output: PathBuf,

        /// Image width in pixels.
        #[arg(short = 'W', long, default_value_t = 480)]
        width: usize,

        /// Image height in pixels.
        #[arg(short = 'H', long, default_value_t = 480)]
        height: usize,
    },
}

fn parse_params(params: &str) -> Result<serde_json::Value, CliError> {
    let value: serde_json::Value = serde_json::from_str(params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    if !value.is_object() {
        return Err(CliError::Input("--params must be a JSON object".into()));
    }
    Ok(value)
}

/// One-line, human-readable description of a frame.
fn summarize(frame: &FrameResult) -> String {
    match &frame.data {
        FrameData::Vectors { kind, vectors } => {
            let Some(hi) = frame.max_magnitude() else {
                return format!("frame {}: 0 vectors", frame.frame_index);
            };
            let lo = vectors
                .iter()
                .map(|v| v.length())
                .fold(f64::INFINITY, f64::min);
            format!(
                "frame {}: {} vectors, |{}| in [{lo:.4}, {hi:.4}]",
                frame.frame_index,
                vectors.len(),
                kind.symbol()
            )
        }
        FrameData::Curves { curves } => {
            let points = curves.first().map_or(0, |c| c.values.len());
            let ranges: Vec<String> = curves
                .iter()
                .map(|c| match c.range() {
                    Some((lo, hi)) => format!("{} [{lo:.4}, {hi:.4}]", c.kind.symbol()),
                    None => format!("{} empty", c.kind.symbol()),
                })
                .collect();
            format!(
                "frame {}: {points} points, {}",
                frame.frame_index,
                ranges.join(", ")
            )
        }
    }
}

fn frame_file(dir: &Path, index: u64) -> PathBuf {
    dir.join(format!("frame_{index:04}.png"))
}

/// Receives frames from the driver during `play`.
struct PlaySink {
    grid: SampleGrid,
    out_dir: Option<PathBuf>,
    width: usize,
    height: usize,
    json: bool,
    written: u64,
}

impl RenderSink for PlaySink {
    fn render(
        &mut self,
        model: &str,
        frame: &FrameResult,
    ) -> Result<(), maxwell_core::FieldError> {
        match &self.out_dir {
            Some(dir) => {
                let path = frame_file(dir, self.written);
                write_png(&self.grid, frame, self.width, self.height, &path)?;
            }
            None if self.json => {
                let line = serde_json::to_string(frame)
                    .map_err(|e| maxwell_core::FieldError::Io(e.to_string()))?;
                println!("{line}");
            }
            None => println!("{model} {}", summarize(frame)),
        }
        self.written += 1;
        Ok(())
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            if cli.json {
                let laws: Vec<_> = ActiveLaw::ALL
                    .iter()
                    .map(|law| serde_json::json!({"name": law.name(), "title": law.display_name()}))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&laws)?);
            } else {
                println!("Laws:");
                for law in ActiveLaw::ALL {
                    println!("  {:<16} {}", law.name(), law.display_name());
                }
            }
        }
        Command::Schema { law } => {
            let model = LawModel::from_name(&law)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&model.param_schema())?);
            } else {
                println!("{}:", model.law().display_name());
                for spec in model.param_specs() {
                    println!(
                        "  {:<16} [{}, {}] default {} {}  {}",
                        spec.name, spec.min, spec.max, spec.default, spec.unit, spec.label
                    );
                }
            }
        }
        Command::Frame { law, frame, params } => {
            let overrides = parse_params(&params)?;
            let model = LawModel::from_name(&law)?;
            let (_, result) = model.compute_once(&overrides, frame)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{law} {}", summarize(&result));
            }
        }
        Command::Render {
            law,
            frame,
            params,
            width,
            height,
            output,
        } => {
            let overrides = parse_params(&params)?;
            let model = LawModel::from_name(&law)?;
            let (grid, result) = model.compute_once(&overrides, frame)?;
            write_png(&grid, &result, width, height, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "law": law,
                    "frame": frame,
                    "width": width,
                    "height": height,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {law} frame {frame} ({width}x{height}) -> {}",
                    output.display()
                );
            }
        }
        Command::Play {
            law,
            ticks,
            frame,
            params,
            out_dir,
            width,
            height,
        } => {
            let overrides = parse_params(&params)?;
            let law = ActiveLaw::from_name(&law)?;
            if let Some(dir) = &out_dir {
                std::fs::create_dir_all(dir)
                    .map_err(|e| CliError::Io(format!("{}: {e}", dir.display())))?;
            }

            let mut scheduler = ManualScheduler::new();
            let mut driver = LawDriver::new();
            select_law(&mut driver, law, &mut scheduler)?;
            if let Some(p) = driver.params_mut() {
                p.apply_json(&overrides)?;
            }
            driver.seek(frame);
            let (Some(timer), Some(grid), Some(model)) =
                (driver.timer(), driver.grid().cloned(), driver.model())
            else {
                return Err(CliError::Input(format!("failed to start {law}")));
            };

            let mut clock = IntervalClock::new(model.timing().interval);
            log::debug!(
                "playing {law} from frame {frame} every {:?}",
                clock.interval()
            );
            let mut sink = PlaySink {
                grid,
                out_dir,
                width,
                height,
                json: cli.json,
                written: 0,
            };
            for _ in 0..ticks {
                clock.wait();
                driver.tick(timer, &mut sink)?;
            }
            driver.stop(&mut scheduler);

            if let Some(dir) = &sink.out_dir {
                eprintln!("played {law} for {ticks} ticks -> {}", dir.display());
            }
        }
        Command::Scene {
            file,
            output,
            width,
            height,
        } => {
            let text = std::fs::read_to_string(&file)
                .map_err(|e| CliError::Io(format!("{}: {e}", file.display())))?;
            let scene: Scene = serde_json::from_str(&text)
                .map_err(|e| CliError::Input(format!("invalid scene file: {e}")))?;
            scene.validate()?;

            let model = LawModel::from_name(&scene.law)?;
            let grid = model.sample_grid()?;
            let mut params = model.default_params();
            params.apply_json(&scene.params)?;
            std::fs::create_dir_all(&output)
                .map_err(|e| CliError::Io(format!("{}: {e}", output.display())))?;

            let mut written = Vec::new();
            for index in scene.frame_indices() {
                let frame = model.compute(&grid, &params, index)?;
                let path = frame_file(&output, index);
                write_png(&grid, &frame, width, height, &path)?;
                written.push(path.display().to_string());
            }

            if cli.json {
                let info = serde_json::json!({
                    "law": scene.law,
                    "frames": written,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} frames of {} -> {}",
                    written.len(),
                    scene.law,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
