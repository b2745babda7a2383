use airy_slice::fraunhofer;
use airy_slice::{AiryParameters, Profile, ProfileOptions, Sample, SliceExtractor, SliceSelection};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "airy_slice", about = "Compare a slice of an Airy disc image with theory")]
struct Args {
    /// Grayscale image of the diffraction pattern (BMP, PNG, JPG)
    #[arg(short, long)]
    image: PathBuf,
    /// Row to extract [default: row of the brightest pixel]
    #[arg(short, long)]
    row: Option<usize>,
    /// Half-width of the averaged band, 0 disables averaging
    #[arg(short, long, default_value_t = 0)]
    band: usize,
    /// Largest band accepted
    #[arg(long, default_value_t = 20)]
    max_band: usize,
    /// Hole diameter [mm]
    #[arg(long, default_value_t = 1.0)]
    diameter: f64,
    /// Hole to sensor distance [cm]
    #[arg(long, default_value_t = 100.0)]
    distance: f64,
    /// Wavelength [nm]
    #[arg(long, default_value_t = 632.8)]
    wavelength: f64,
    /// Sensor pixel size [um]
    #[arg(long, default_value_t = 5.0)]
    pixel_size: f64,
    /// Shift of the simulated curve [px]
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    offset: f64,
    /// Scale of the simulated curve
    #[arg(long, default_value_t = 255.0)]
    scale: f64,
    /// CSV output file [default: stdout]
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Also write the FFT far field of the hole, next to the closed form, to this CSV file
    #[arg(long)]
    reference: Option<PathBuf>,
    /// Grid size of the FFT far field
    #[arg(long, default_value_t = 512)]
    reference_grid: usize,
    /// Samples across the hole diameter in the FFT far field
    #[arg(long, default_value_t = 32.0)]
    reference_samples: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let params = AiryParameters::new(args.diameter, args.distance, args.wavelength, args.pixel_size)?;
    let extractor = SliceExtractor::with_sample(Sample::open(&args.image)?);

    let peak = extractor.find_peak()?;
    log::info!(
        "peak of {} at row {}, column {}",
        peak.value,
        peak.row,
        peak.column
    );
    let row = args.row.unwrap_or(peak.row);
    let max_band = extractor.max_band(row, args.max_band)?;
    if args.band > max_band {
        log::warn!(
            "band of {} px does not fit around row {}, using {} px",
            args.band,
            row,
            max_band
        );
    }
    let selection = SliceSelection::new(row, args.band.min(max_band));
    log::info!(
        "first dark ring at {:.3} mm ({:.1} px)",
        params.first_dark_ring() * 1e3,
        params.first_dark_ring() / params.pixel_pitch_m()
    );

    let options = ProfileOptions {
        offset: args.offset,
        scale: args.scale,
    };
    let profile = Profile::compute(&extractor, selection, &params, options)?;
    match &args.output {
        Some(path) => {
            profile.to_csv(path)?;
            log::info!("profile written to {:?}", path);
        }
        None => profile.write_csv(std::io::stdout())?,
    }

    if let Some(path) = &args.reference {
        let file = std::fs::File::create(path)?;
        fraunhofer::write_reference_csv(&params, args.reference_grid, args.reference_samples, file)?;
        log::info!("far field reference written to {:?}", path);
    }

    Ok(())
}
