use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use mtz_cli::summary::{Sections, print_header};
use mtz_header::{Header, MtzReaderOptions, read_mtz_header_with_options};

use crate::cli::{Cli, OutputFormatArg};

/// Decode the file named on the command line and print it.
pub fn run_show(cli: &Cli) -> Result<()> {
    let span = info_span!("show", file = %cli.file.display());
    let _guard = span.enter();

    let header = load_header(cli)?;
    info!(
        columns = header.columns.len(),
        datasets = header.datasets.len(),
        batches = header.batches.len(),
        "decoded header"
    );

    match cli.format {
        OutputFormatArg::Table => print_header(
            &header,
            Sections {
                history: cli.history,
                batches: cli.batches,
                records: cli.records,
            },
        ),
        OutputFormatArg::Json => {
            let json = serde_json::to_string_pretty(&header).context("serialize header")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn load_header(cli: &Cli) -> Result<Header> {
    let mut options = MtzReaderOptions::new();
    if cli.keep_history_indent {
        options = options.keep_history_indent();
    }
    if let Some(limit) = cli.record_limit {
        options = options.with_record_limit(limit);
    }
    debug!(?options, "reader options");
    read_mtz_header_with_options(&cli.file, options)
        .with_context(|| format!("read {}", cli.file.display()))
}
