//! The changelog binary generates a Debian changelog from a Markdown
//! keep-a-changelog-style one (or re-canonicalizes an existing Debian one).

use std::fs::File;
use std::io::{BufReader, Write};

use anyhow::Result;
use clap::Parser;

use changelog::{config, debian, markdown, ui, Changelog, Maintainer};

const OUTPUT_FILE: &str = "debian.changelog";

#[derive(clap::Parser)]
#[command(
    name = "changelog",
    about = "Convert a keep-a-changelog Markdown changelog to Debian format"
)]
struct Args {
    #[arg(help = "Changelog file to convert")]
    filename: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Maintainer name")]
    name: Option<String>,

    #[arg(short, long, help = "Maintainer email")]
    email: Option<String>,

    #[arg(short, long, help = "Package name")]
    package: Option<String>,

    #[arg(long, value_enum, default_value = "md", help = "Input dialect")]
    from: InputFormat,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum InputFormat {
    /// keep-a-changelog style Markdown
    Md,
    /// Debian changelog
    Debian,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("changelog {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let Some(filename) = args.filename else {
        ui::display_error("no input file given, see --help");
        std::process::exit(1);
    };

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let package = args.package.unwrap_or(config.package);
    let maintainer = Maintainer::new(
        args.name.unwrap_or(config.maintainer.name),
        args.email.unwrap_or(config.maintainer.email),
    );

    let file = match File::open(&filename) {
        Ok(file) => file,
        Err(e) => {
            ui::display_error(&format!("could not open {}: {}", filename, e));
            std::process::exit(1);
        }
    };

    let (mut cl, parse_err): (Changelog, _) = match args.from {
        InputFormat::Md => markdown::parse(BufReader::new(file)),
        InputFormat::Debian => debian::parse(BufReader::new(file)),
    };
    if let Some(e) = parse_err {
        ui::display_error(&format!("could not parse changelog: {}", e));
        std::process::exit(1);
    }

    cl.set_maintainer(&maintainer);

    let bytes = match debian::format(&cl, &package) {
        Ok(bytes) => bytes,
        Err(e) => {
            ui::display_error(&format!(
                "could not convert changelog to Debian format: {}",
                e
            ));
            std::process::exit(1);
        }
    };

    let mut out = File::create(OUTPUT_FILE)?;
    out.write_all(&bytes)?;
    out.sync_all()?;

    ui::display_success(&format!(
        "wrote {} release(s) to {}",
        cl.len(),
        OUTPUT_FILE
    ));

    Ok(())
}
