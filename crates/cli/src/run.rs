//! The `run` subcommand.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use planeseg_core::PointCloud;
use planeseg_io::{read_cloud, write_cloud};
use planeseg_segmentation::{check_normals, extract_planes, PlaneExtraction, RansacParams};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

const NORMALS_MODE: &str = "normals";

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Input point cloud (.obj or .ply); prints this help when omitted
    pub input: Option<PathBuf>,

    /// Number of planes to extract; prints this help when omitted
    pub plane_count: Option<usize>,

    /// Pass `normals` to also require point normals to agree with the plane normal
    pub mode: Option<String>,

    /// Output point cloud, one colored point per plane label
    #[arg(short, long, default_value = "colored_planes.obj")]
    pub output: PathBuf,

    /// RANSAC iterations per plane
    #[arg(long, default_value_t = 100)]
    pub iterations: usize,

    /// Maximum point-to-plane distance of an inlier
    #[arg(long, default_value_t = 0.1)]
    pub distance_threshold: f32,

    /// Maximum angle in radians between point and plane normals (with `normals`)
    #[arg(long, default_value_t = 10.0)]
    pub angle_threshold: f32,

    /// Seed for the random sampler; drawn from the OS when absent
    #[arg(long)]
    pub seed: Option<u64>,
}

impl RunArgs {
    /// True when both the input file and the plane count were given.
    pub fn is_complete(&self) -> bool {
        self.input.is_some() && self.plane_count.is_some()
    }

    pub fn use_normals(&self) -> bool {
        self.mode.as_deref() == Some(NORMALS_MODE)
    }

    pub fn ransac_params(&self) -> RansacParams {
        RansacParams {
            iterations: self.iterations,
            distance_threshold: self.distance_threshold,
            angle_threshold: self.angle_threshold,
            use_normals: self.use_normals(),
        }
    }
}

pub fn run_extract(args: RunArgs) -> Result<()> {
    let input = args.input.as_ref().context("No input point cloud given")?;
    let plane_count = args.plane_count.context("No plane count given")?;
    let params = args.ransac_params();

    let cloud =
        read_cloud(input).with_context(|| format!("Failed to read point cloud {:?}", input))?;
    info!("loaded {} points from {:?}", cloud.len(), input);

    if params.use_normals {
        check_normals(&cloud).context("Normal gating needs one normal per point")?;
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let extraction = extract_planes(&cloud, plane_count, &params, &mut rng)
        .context("Plane extraction failed")?;

    let labeled = extraction.to_labeled_cloud(&cloud);
    write_cloud(&args.output, &labeled)
        .with_context(|| format!("Failed to write {:?}", args.output))?;

    log_summary(&extraction, &cloud, &labeled);
    info!("wrote {} labeled points to {:?}", labeled.len(), args.output);
    Ok(())
}

fn log_summary(extraction: &PlaneExtraction, cloud: &PointCloud, labeled: &PointCloud) {
    for plane in &extraction.planes {
        match plane.fit {
            Some(fit) => info!(
                "plane {}: normal [{:.4}, {:.4}, {:.4}], offset {:.4}, {} points labeled",
                plane.index + 1,
                fit.model.normal[0],
                fit.model.normal[1],
                fit.model.normal[2],
                fit.model.offset(),
                plane.labeled
            ),
            None => info!("plane {}: not found", plane.index + 1),
        }
    }

    let mut seen = vec![false; cloud.len()];
    for assignment in &extraction.assignments {
        seen[assignment.point_index] = true;
    }
    let unlabeled = seen.iter().filter(|&&s| !s).count();
    info!(
        "{} of {} planes found, {} labels, {} points unlabeled",
        extraction.found().count(),
        extraction.planes.len(),
        labeled.len(),
        unlabeled
    );
}
