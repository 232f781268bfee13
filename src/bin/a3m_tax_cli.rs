use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process::ExitCode;

use a3m_tax::a3m::read_a3m;
use a3m_tax::config::{AnnotateOptions, DEFAULT_PARALOG_SUFFIX, DEFAULT_TAX_SUFFIX};
use a3m_tax::pairs::{build_pair_table, load_sequence_map, write_pair_table};
use a3m_tax::paralogs::{ParalogCriteria, DEFAULT_MIN_PARALOG_TAXA};
use a3m_tax::taxdb::TaxonomyTable;
use a3m_tax::{annotate_msa_path, output_path};

#[derive(Parser)]
#[command(
    name = "a3m-tax",
    version,
    about = "Annotate a3m alignments with MMseqs2 taxonomy hits and extract paralog candidates"
)]
struct Cli {
    /// Worker threads for directory batches (defaults to all cores)
    #[arg(long, global = true, env = "A3M_TAX_THREADS")]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Append taxonomy to every record of an a3m file, or of all a3m files in a directory
    Annotate {
        /// `convertalis` output with columns target,evalue,taxid,taxname,taxlineage
        taxonomy: PathBuf,
        /// a3m file or directory of a3m files
        msa_path: PathBuf,
        #[arg(long, default_value = DEFAULT_TAX_SUFFIX)]
        tax_suffix: String,
        #[arg(long, default_value = DEFAULT_PARALOG_SUFFIX)]
        paralog_suffix: String,
        /// Do not write paralog files
        #[arg(long)]
        no_paralogs: bool,
        /// Distinct multi-hit taxa required before paralogs are written
        #[arg(long, default_value_t = DEFAULT_MIN_PARALOG_TAXA)]
        min_paralog_taxa: usize,
    },
    /// Build an id/sequence table for two paired alignments
    Pairs {
        /// `convertalis` output with columns target,tseq
        sequences: PathBuf,
        a3m_1: PathBuf,
        a3m_2: PathBuf,
        /// Defaults to `<sequences>.tsv`
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn spinner(color: &str, msg: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template(&format!("{{spinner:.{color}}} {{msg}}"))
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(msg.to_string());
    spinner
}

fn run(cli: Cli) -> a3m_tax::Result<()> {
    if let Some(threads) = cli.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(threads).build_global() {
            log::warn!("Could not configure {threads} worker threads: {e}");
        }
    }

    match cli.command {
        Commands::Annotate {
            taxonomy,
            msa_path,
            tax_suffix,
            paralog_suffix,
            no_paralogs,
            min_paralog_taxa,
        } => {
            let options = AnnotateOptions {
                tax_suffix,
                paralog_suffix,
                extract_paralogs: !no_paralogs,
                criteria: ParalogCriteria {
                    min_paralog_taxa,
                    ..ParalogCriteria::default()
                },
                ..AnnotateOptions::default()
            };

            let sp = spinner("blue", "Loading taxonomy table...");
            let table = TaxonomyTable::load(&taxonomy)?;
            sp.finish_with_message(format!("Loaded {} taxonomy rows.", table.len()));

            let sp = spinner("green", "Annotating alignments...");
            let summaries = annotate_msa_path(&msa_path, &table, &options)?;
            let paralog_files = summaries.iter().filter(|s| s.paralog_output.is_some()).count();
            sp.finish_with_message(format!(
                "Annotated {} file(s), {} with paralog output.",
                summaries.len(),
                paralog_files
            ));

            for s in &summaries {
                log::info!(
                    "{}: {} records -> {} annotated ({} without taxonomy)",
                    s.input.display(),
                    s.records_in,
                    s.records_out,
                    s.unmatched
                );
            }
        }
        Commands::Pairs {
            sequences,
            a3m_1,
            a3m_2,
            output,
        } => {
            let sp = spinner("yellow", "Pairing alignments...");
            let seq_map = load_sequence_map(&sequences)?;
            let rows = build_pair_table(&seq_map, &read_a3m(&a3m_1)?, &read_a3m(&a3m_2)?);
            let output = output.unwrap_or_else(|| output_path(&sequences, ".tsv"));
            write_pair_table(&rows, &output)?;
            sp.finish_with_message(format!("Wrote {} pairs to {}.", rows.len(), output.display()));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
