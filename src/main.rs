use ansi_term::Style;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use vibe_cycle_simulator as vibe;
use vibe::{report, CycleSimulator, SimError};

#[derive(Parser)]
#[command(name = "vibe72")]
#[command(version, about = vibe::PRG_DESCRIPTION, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the working cycle and write the reports
    Run {
        /// Configuration file, `key=value` or `.json`
        #[arg(short, long, default_value = "vibe72.conf")]
        config: PathBuf,
        /// Directory of the report files
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
        /// Also write a gnuplot script of the pressure diagram
        #[arg(long)]
        plot: bool,
    },
    /// Write a configuration file filled with the default engine
    Blank {
        /// Configuration file to create
        #[arg(short, long, default_value = "vibe72.conf")]
        config: PathBuf,
        /// Use the JSON layout, the file gets the `.json` extension
        #[arg(long)]
        json: bool,
    },
}

fn run(config: &Path, output: &Path, plot: bool) -> Result<(), SimError> {
    if !config.exists() {
        vibe::engine::write_blank(config)?;
        return Err(SimError::BlankCreated(config.to_path_buf()));
    }

    let params = vibe::engine::load(config)?;
    for warning in params.warnings().iter() {
        log::warn!("{}", warning);
    }

    let result = CycleSimulator::new(&params).run();

    std::fs::create_dir_all(output).map_err(|e| SimError::write(output, e))?;
    let files = report::ReportFiles::new(output, vibe::PRG_NAME, &report::timestamp(), config);
    report::write_reports(&result, config, &files, plot)?;
    println!();
    report::print_summary(&result);
    Ok(())
}

fn blank(config: &Path, json: bool) -> Result<(), SimError> {
    let path = if json {
        config.with_extension("json")
    } else {
        config.to_path_buf()
    };
    vibe::engine::write_blank(&path)?;
    log::info!("blank configuration written to `{}`", path.display());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!(
        "{} v{}\n{}\n",
        Style::new().bold().paint(vibe::PRG_NAME),
        vibe::PRG_VERSION,
        vibe::PRG_DESCRIPTION
    );

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Run { config, output, plot } => run(&config, &output, plot),
        Commands::Blank { config, json } => blank(&config, json),
    };

    if let Err(e) = outcome {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
