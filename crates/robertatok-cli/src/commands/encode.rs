use std::io::{BufRead, Write};

use robertatok::{CharSpan, Encoding, RobertaTokenizer, TextEncoder, TokResult, TokenId};
use serde::Serialize;

use crate::{
    input_output::{InputArgs, OutputArgs},
    tokenizer_args::TokenizerArgs,
};

/// Args for the encode command.
#[derive(clap::Args, Debug)]
pub struct EncodeArgs {
    #[command(flatten)]
    tokenizer: TokenizerArgs,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Number of lines encoded per batch.
    #[arg(long, default_value_t = 256)]
    batch_size: usize,

    /// Encode each batch on the rayon thread pool.
    #[arg(long)]
    parallel: bool,
}

/// One encoded line, in the operator's output layout.
#[derive(Serialize)]
struct EncodeRecord<'a> {
    input_ids: &'a [TokenId],
    attention_mask: &'a [u8],
    offset_mapping: &'a [CharSpan],
}

/// A line the tokenizer rejected.
#[derive(Serialize)]
struct ErrorRecord {
    line: usize,
    error: String,
}

impl EncodeArgs {
    /// Run the encode command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let tokenizer = self.tokenizer.load_tokenizer(self.parallel)?;

        let mut reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        run_encode(
            &mut reader,
            &mut writer,
            &tokenizer,
            self.batch_size.max(1),
        )
    }
}

/// Strip one trailing ``\n`` or ``\r\n``.
fn strip_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn run_encode(
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
    tokenizer: &RobertaTokenizer,
    batch_size: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut line_count = 0;
    let mut batch: Vec<Vec<u8>> = Vec::with_capacity(batch_size);

    loop {
        let mut line = Vec::new();
        let done = reader.read_until(b'\n', &mut line)? == 0;
        if !done {
            batch.push(strip_line_end(&line).to_vec());
        }

        if batch.len() == batch_size || (done && !batch.is_empty()) {
            let results = tokenizer.encode_batch(&batch);
            write_results(writer, line_count, &results)?;
            line_count += batch.len();
            batch.clear();
            writer.flush()?;
        }

        if done {
            break;
        }
    }

    log::info!("encoded {line_count} lines");
    Ok(())
}

fn write_results(
    writer: &mut dyn Write,
    first_line: usize,
    results: &[TokResult<Encoding>],
) -> Result<(), Box<dyn std::error::Error>> {
    for (idx, result) in results.iter().enumerate() {
        match result {
            Ok(encoding) => serde_json::to_writer(
                &mut *writer,
                &EncodeRecord {
                    input_ids: &encoding.input_ids,
                    attention_mask: &encoding.attention_mask,
                    offset_mapping: &encoding.offset_mapping,
                },
            )?,
            Err(err) => {
                let line = first_line + idx + 1;
                log::warn!("line {line}: {err}");
                serde_json::to_writer(
                    &mut *writer,
                    &ErrorRecord {
                        line,
                        error: err.to_string(),
                    },
                )?;
            }
        }
        writeln!(writer)?;
    }
    Ok(())
}
