//! Boreslice CLI - bore-log lithology interpolation
//!
//! Command-line interface for classifying bore-log descriptions and
//! interpolating lithology slices and volumes.

use boreslice::{
    extract_single_class_volume, is_no_data, AbbreviationMap, AdjectiveLexiconDict, BoreLogTable,
    BoreSliceError, BoundingBox, Config, DescriptionClassifier, LexiconDict, LithologyVocabulary,
    Mesh, Normalizer, Result, SpatialClassifier, VolumeBuilder, VolumeFile, VolumeHeader,
    VolumeKind,
};
use boreslice::volume::expected_shape;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "boreslice")]
#[command(version)]
#[command(about = "Bore-log lithology classification and interpolation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON configuration file (defaults are used for missing sections)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify lithology descriptions
    Classify {
        /// Input file: one description per line, or a JSON bore-log table with --table
        #[arg(short, long)]
        input: PathBuf,

        /// Treat the input as a JSON bore-log table and write it back labelled
        #[arg(long)]
        table: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Abbreviation file, one "abbreviation<TAB>expansion" pair per line
        #[arg(short, long)]
        abbreviations: Option<PathBuf>,
    },

    /// Interpolate the lithology classes of one elevation slice
    Slice {
        /// JSON bore-log table
        #[arg(short, long)]
        input: PathBuf,

        /// Elevation of the slice (metres AHD)
        #[arg(short, long, allow_hyphen_values = true)]
        elevation: f64,

        /// Number of neighbours (default: from configuration)
        #[arg(short = 'k', long)]
        neighbors: Option<usize>,

        /// Mesh resolution in metres (default: from configuration)
        #[arg(short, long)]
        resolution: Option<f64>,

        /// Classify descriptions before interpolating
        #[arg(long)]
        classify: bool,
    },

    /// Build a volume of predicted lithology classes
    Volume {
        #[command(flatten)]
        volume: VolumeArgs,

        /// Keep only this lithology, for iso-surface rendering
        #[arg(long)]
        class: Option<String>,
    },

    /// Build one probability volume per lithology class
    Probabilities {
        #[command(flatten)]
        volume: VolumeArgs,
    },
}

#[derive(clap::Args)]
struct VolumeArgs {
    /// JSON bore-log table
    #[arg(short, long)]
    input: PathBuf,

    /// Output volume file
    #[arg(short, long)]
    output: PathBuf,

    /// Highest elevation (default: top of the highest interval)
    #[arg(long, allow_hyphen_values = true)]
    top: Option<f64>,

    /// Lowest elevation (default: bottom of the lowest interval)
    #[arg(long, allow_hyphen_values = true)]
    bottom: Option<f64>,

    /// Vertical step between slices in metres
    #[arg(long, default_value = "1.0")]
    step: f64,

    /// Number of neighbours (default: from configuration)
    #[arg(short = 'k', long)]
    neighbors: Option<usize>,

    /// Mesh resolution in metres (default: from configuration)
    #[arg(short, long)]
    resolution: Option<f64>,

    /// Classify descriptions before interpolating
    #[arg(long)]
    classify: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let result = load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Classify {
            input,
            table,
            output,
            abbreviations,
        } => classify(&config, input, table, output, abbreviations),

        Commands::Slice {
            input,
            elevation,
            neighbors,
            resolution,
            classify,
        } => interpolate_slice(&config, input, elevation, neighbors, resolution, classify),

        Commands::Volume { volume, class } => build_volume(&config, volume, class),

        Commands::Probabilities { volume } => build_probabilities(&config, volume),
    });

    if let Err(e) = result {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config: Config = match path {
        Some(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
        None => Config::default(),
    };
    config.validate()?;
    Ok(config)
}

fn description_classifier(config: &Config) -> Result<DescriptionClassifier> {
    Ok(DescriptionClassifier::new(
        Normalizer::new(config.text.clone())?,
        LexiconDict::default(),
        AdjectiveLexiconDict::default(),
        LithologyVocabulary::default(),
    ))
}

fn read_abbreviations(path: &Path) -> Result<AbbreviationMap> {
    let text = fs::read_to_string(path)?;
    let mut map = AbbreviationMap::default();
    for (n, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match line.split_once('\t') {
            Some((abbreviation, expansion)) => map.insert(abbreviation.trim(), expansion.trim()),
            None => {
                return Err(BoreSliceError::Config(format!(
                    "{}:{}: expected \"abbreviation<TAB>expansion\"",
                    path.display(),
                    n + 1
                )))
            }
        }
    }
    Ok(map)
}

fn load_table(path: &Path, config: &Config, classify: bool) -> Result<BoreLogTable> {
    let mut table = BoreLogTable::from_json_reader(BufReader::new(File::open(path)?))?;
    info!("Loaded {} bore-log intervals from {}", table.len(), path.display());
    if classify {
        description_classifier(config)?.label_table(&mut table);
    }
    Ok(table)
}

fn table_mesh(table: &BoreLogTable, resolution: f64) -> Result<Mesh> {
    let bbox = BoundingBox::from_points(table.iter().map(|r| (r.easting, r.northing)))
        .ok_or_else(|| BoreSliceError::Validation("bore-log table is empty".to_string()))?;
    // widen by one cell so the easternmost and northernmost bores are inside the mesh
    let bbox = BoundingBox::new(bbox.min_x, bbox.min_y, bbox.max_x + resolution, bbox.max_y + resolution);
    Mesh::from_bbox(&bbox, resolution)
}

/// Elevations from `top` down to `bottom` inclusive, `step` apart.
fn elevation_steps(top: f64, bottom: f64, step: f64) -> Result<Vec<f64>> {
    if !(step.is_finite() && step > 0.0) {
        return Err(BoreSliceError::Config(format!("step must be positive, got {}", step)));
    }
    if top < bottom {
        return Err(BoreSliceError::Validation(format!(
            "top elevation {} is below bottom elevation {}",
            top, bottom
        )));
    }
    let n = ((top - bottom) / step).floor() as usize + 1;
    Ok((0..n).map(|i| top - i as f64 * step).collect())
}

fn output_writer(output: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn classify(
    config: &Config,
    input: PathBuf,
    table: bool,
    output: Option<PathBuf>,
    abbreviations: Option<PathBuf>,
) -> Result<()> {
    let mut classifier = description_classifier(config)?;
    if let Some(path) = abbreviations {
        let map = read_abbreviations(&path)?;
        info!("Loaded {} abbreviations", map.len());
        classifier = classifier.with_expander(map);
    }

    let mut writer = output_writer(output.as_deref())?;

    if table {
        let mut bores = BoreLogTable::from_json_reader(BufReader::new(File::open(&input)?))?;
        let labelled = classifier.label_table(&mut bores);
        serde_json::to_writer_pretty(&mut writer, &bores)?;
        writeln!(writer)?;
        writer.flush()?;
        eprintln!("Classified {} of {} intervals", labelled, bores.len());
        return Ok(());
    }

    let text = fs::read_to_string(&input)?;
    let descriptions: Vec<&str> = text.lines().collect();
    let classifications = classifier.classify_all(&descriptions);

    writeln!(writer, "description\tprimary\tsecondary")?;
    for (description, c) in descriptions.iter().zip(&classifications) {
        writeln!(writer, "{}\t{}\t{}", description, c.primary, c.secondary)?;
    }
    writer.flush()?;

    Ok(())
}

fn interpolate_slice(
    config: &Config,
    input: PathBuf,
    elevation: f64,
    neighbors: Option<usize>,
    resolution: Option<f64>,
    classify: bool,
) -> Result<()> {
    let table = load_table(&input, config, classify)?;
    let mesh = table_mesh(&table, resolution.unwrap_or(config.interpolation.grid_resolution))?;
    let n_neighbors = neighbors.unwrap_or(config.interpolation.n_neighbors);

    let grid = SpatialClassifier::new(&config.interpolation).interpolate_slice(&table, elevation, n_neighbors, &mesh);
    let vocabulary = LithologyVocabulary::default();

    let (nx, ny) = mesh.shape();
    println!("Slice at {} m: {}x{} cells", elevation, nx, ny);
    // northing decreases down the page
    for j in (0..ny).rev() {
        let row: Vec<&str> = (0..nx)
            .map(|i| {
                let v = grid[[i, j]];
                if is_no_data(v) {
                    "."
                } else {
                    vocabulary.label(v as u32).unwrap_or("?")
                }
            })
            .collect();
        println!("{}", row.join(" "));
    }

    Ok(())
}

struct VolumeInputs {
    table: BoreLogTable,
    mesh: Mesh,
    elevations: Vec<f64>,
    n_neighbors: usize,
}

fn volume_inputs(config: &Config, args: &VolumeArgs) -> Result<VolumeInputs> {
    let table = load_table(&args.input, config, args.classify)?;
    let mesh = table_mesh(&table, args.resolution.unwrap_or(config.interpolation.grid_resolution))?;

    let (top, bottom) = table
        .elevation_range()
        .ok_or_else(|| BoreSliceError::Validation("bore-log table is empty".to_string()))?;
    let elevations = elevation_steps(args.top.unwrap_or(top), args.bottom.unwrap_or(bottom), args.step)?;

    Ok(VolumeInputs {
        table,
        mesh,
        elevations,
        n_neighbors: args.neighbors.unwrap_or(config.interpolation.n_neighbors),
    })
}

fn slice_progress(n: usize, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(n as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) ETA: {eta}")
    {
        pb.set_style(style.progress_chars("█▓▒░  "));
    }
    pb.set_message(message.to_string());
    pb
}

fn build_volume(config: &Config, args: VolumeArgs, class: Option<String>) -> Result<()> {
    let start_time = Instant::now();
    let inputs = volume_inputs(config, &args)?;
    let vocabulary = LithologyVocabulary::default();

    let pb = slice_progress(inputs.elevations.len(), "Interpolating slices...");
    let progress = pb.clone();
    let builder = VolumeBuilder::new(&config.interpolation).on_slice(move |_, _| progress.inc(1));
    let mut volume = builder.build_label_volume(&inputs.table, &inputs.elevations, inputs.n_neighbors, &inputs.mesh);
    pb.finish_and_clear();

    let class_labels = match class {
        Some(label) => {
            let number = vocabulary.class_number(&label).ok_or_else(|| {
                BoreSliceError::Validation(format!("'{}' is not a known lithology", label))
            })?;
            volume = extract_single_class_volume(&volume, number as f64);
            vec![label]
        }
        None => vocabulary.labels().to_vec(),
    };

    let header = VolumeHeader {
        kind: VolumeKind::Labels,
        shape: volume.dim(),
        elevations: inputs.elevations,
        class_labels,
    };
    VolumeFile::new(header, vec![volume])?.save(&args.output)?;

    println!(
        "✓ Saved label volume to {} ({:.1}s)",
        args.output.display(),
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

fn build_probabilities(config: &Config, args: VolumeArgs) -> Result<()> {
    let start_time = Instant::now();
    let inputs = volume_inputs(config, &args)?;
    let vocabulary = LithologyVocabulary::default();
    let shape = expected_shape(&inputs.mesh, inputs.elevations.len());

    let pb = slice_progress(inputs.elevations.len(), "Estimating class probabilities...");
    let progress = pb.clone();
    let builder = VolumeBuilder::new(&config.interpolation).on_slice(move |_, _| progress.inc(1));
    let volumes = builder.build_class_probability_volumes(
        &vocabulary,
        shape,
        &inputs.table,
        &inputs.elevations,
        inputs.n_neighbors,
        &inputs.mesh,
    )?;
    pb.finish_and_clear();

    let header = VolumeHeader {
        kind: VolumeKind::Probabilities,
        shape,
        elevations: inputs.elevations,
        class_labels: vocabulary.labels().to_vec(),
    };
    VolumeFile::new(header, volumes)?.save(&args.output)?;

    println!(
        "✓ Saved {} probability volumes to {} ({:.1}s)",
        vocabulary.len(),
        args.output.display(),
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}
