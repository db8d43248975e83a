use clap::Args;
use devwell::error::AppError;
use devwell::workflows::stress::{score_csv, BatchSummary};
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct StressBatchArgs {
    /// CSV file with typingSpeed, errorRate, codeComplexity, timeWithoutBreaks, keystrokes
    /// and mouseMovement columns
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Where to write scored rows (defaults to stdout)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run_stress_batch(args: StressBatchArgs) -> Result<(), AppError> {
    let reader = BufReader::new(File::open(&args.input)?);

    match args.output {
        Some(path) => {
            let writer = BufWriter::new(File::create(&path)?);
            let summary = score_csv(reader, writer)?;
            println!("{}", describe(&summary));
            println!("Results written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let summary = score_csv(reader, stdout.lock())?;
            // Keep stdout clean for the CSV itself.
            eprintln!("{}", describe(&summary));
        }
    }

    Ok(())
}

fn describe(summary: &BatchSummary) -> String {
    format!(
        "Scored {} of {} rows ({} rejected)",
        summary.scored, summary.rows, summary.rejected
    )
}
