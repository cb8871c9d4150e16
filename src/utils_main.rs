use anyhow::{Context, Result};
use block_builder::Block;
use clap::ValueEnum;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One txid per line.
    #[default]
    Lines,
    /// JSON array of txids.
    Json,
}

// writes the txids of the block to the passed writer, one per line without a
// newline after the last one, or as a JSON array
fn write_block<W: Write>(block: &Block, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Lines => {
            let len = block.txids.len();
            for (index, txid) in block.txids.iter().enumerate() {
                if index < len - 1 {
                    writeln!(out, "{}", txid)?;
                } else {
                    write!(out, "{}", txid)?;
                }
            }
        }
        OutputFormat::Json => serde_json::to_writer(&mut *out, &block.txids)?,
    }
    out.flush()?;
    Ok(())
}

// renders the block to output_path if given, otherwise to stdout
pub fn output_block(block: &Block, format: OutputFormat, output_path: Option<&Path>) -> Result<()> {
    match output_path {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("unable to create output file {}", path.display()))?;
            write_block(block, format, &mut file)
        }
        None => {
            let mut stdout = io::stdout().lock();
            write_block(block, format, &mut stdout)?;
            writeln!(stdout)?;
            Ok(())
        }
    }
}
