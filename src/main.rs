use chrono::Utc;
use clap::{ArgAction, Parser, Subcommand};
use simple_folio::{config, generate, output, scan};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "simple-folio")]
#[command(about = "Static site generator for a personal portfolio and blog")]
#[command(long_about = "\
Static site generator for a personal portfolio and blog

Every directory under blog/ or projects/ is one entry; its name is the URL
slug. The entry's page.mdx (or page.md) carries YAML front-matter and a
Markdown body.

Content structure:

  content/
  ├── config.toml                  # Site, author, RSS, colors (optional)
  ├── public/                      # Copied verbatim to the output root
  ├── blog/
  │   ├── raft-in-practice/
  │   │   └── page.mdx             # title, summary, date, tags, featured
  │   └── [slug]/                  # Dynamic-route folders are skipped
  └── projects/
      └── tinykv/
          └── page.mdx             # repo, description, stars, period, cover

Output: HTML pages, feed.xml (RSS 2.0), sitemap.xml with content hashes,
robots.txt.

Run 'simple-folio gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".simple-folio-temp", global = true)]
    temp_dir: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Produce the final HTML site, feed and sitemap from the manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate content directory without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Scan => {
            let manifest = scan_content(&cli.source)?;
            let manifest_path = write_manifest(&manifest, &cli.temp_dir)?;
            log::debug!("manifest written to {}", manifest_path.display());
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let manifest_content = std::fs::read_to_string(&manifest_path)?;
            let manifest: scan::Manifest = serde_json::from_str(&manifest_content)?;
            init_thread_pool(&manifest.config.processing);
            let report = generate::generate_site(&manifest, &cli.source, &cli.output, Utc::now())?;
            output::print_generate_output(&manifest, &report);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan_content(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating site → {}", cli.output.display());
            let report = generate::generate_site(&manifest, &cli.source, &cli.output, Utc::now())?;
            output::print_generate_output(&manifest, &report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan_content(&cli.source)?;
            output::print_check_output(&manifest);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load config, size the thread pool from it, then scan.
fn scan_content(source: &Path) -> Result<scan::Manifest, Box<dyn std::error::Error>> {
    let site_config = config::load_config(source)?;
    init_thread_pool(&site_config.processing);
    Ok(scan::scan_with_config(source, site_config)?)
}

fn write_manifest(
    manifest: &scan::Manifest,
    temp_dir: &Path,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(temp_dir)?;
    let manifest_path = temp_dir.join("manifest.json");
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&manifest_path, json)?;
    Ok(manifest_path)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the user can constrain down, not up.
/// Only the first call takes effect.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
