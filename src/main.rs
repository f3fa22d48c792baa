use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use stagetrim::{
    build_root_set, eliminate_duplicates, generate_mappings, load_defaults, resolve_snap_names,
    EliminateOptions, ExclusionRules, MappingEntry,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Remove files from a part's install directory that base snaps or earlier parts already provide",
    long_about = None
)]
struct Args {
    /// Snaps to compare against (read from build-snaps in snapcraft.yaml when omitted)
    snaps: Vec<String>,

    /// Print every removed or excluded file
    #[arg(long, short)]
    verbose: bool,

    /// Don't print the summary
    #[arg(long, short)]
    quiet: bool,

    /// Show what would be removed, but don't remove anything
    #[arg(long)]
    dry_run: bool,

    /// Map a snap's top level to a path prefix in the install directory
    #[arg(long = "map", short = 'm', value_name = "NAME:PATH")]
    maps: Vec<String>,

    /// Never remove paths matching this glob (relative to the install directory)
    #[arg(long, short = 'x', value_name = "GLOB")]
    exclude: Vec<String>,

    /// Directory to remove duplicated files from
    #[arg(long, env = "CRAFT_PART_INSTALL", value_name = "DIR")]
    install_dir: PathBuf,

    /// Project directory containing snapcraft.yaml
    #[arg(long, env = "CRAFT_PROJECT_DIR", value_name = "DIR")]
    project_dir: Option<PathBuf>,

    /// Stage directory with the output of previous parts
    #[arg(long, env = "CRAFT_STAGE", value_name = "DIR")]
    stage_dir: PathBuf,

    /// Directory where snaps are mounted
    #[arg(long, value_name = "DIR")]
    snaps_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let defaults = load_defaults().context("Failed to load built-in defaults")?;

    // Validate everything before touching the install directory
    let mappings = generate_mappings(&defaults.mappings.predefined, &args.maps)?;
    let user_mapped = args
        .maps
        .iter()
        .map(|entry| MappingEntry::parse(entry).map(|mapping| mapping.name))
        .collect::<Result<Vec<_>, _>>()?;
    let rules = ExclusionRules::new(defaults.exclude.patterns.clone(), args.exclude.clone())?;
    let names = resolve_snap_names(&args.snaps, args.project_dir.as_deref())?;
    let snaps_dir = args
        .snaps_dir
        .clone()
        .unwrap_or_else(|| defaults.snaps.directory.clone());
    let roots = build_root_set(&names, &mappings, &user_mapped, &snaps_dir, &args.stage_dir)?;

    if args.verbose {
        for root in &roots {
            match root.mapping_prefix() {
                Some(prefix) => println!("Comparing with {} (as {})", root.path().display(), prefix),
                None => println!("Comparing with {}", root.path().display()),
            }
        }
    }

    eliminate_duplicates(
        &args.install_dir,
        &roots,
        &rules,
        EliminateOptions {
            verbose: args.verbose,
            quiet: args.quiet,
            dry_run: args.dry_run,
            progress: true,
        },
    )?;

    Ok(())
}
