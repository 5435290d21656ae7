use std::io::{BufRead, Write};

use robertatok::{RobertaTokenizer, TokenId};

use crate::{
    input_output::{InputArgs, OutputArgs},
    tokenizer_args::TokenizerArgs,
};

/// Args for the decode command.
#[derive(clap::Args, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    tokenizer: TokenizerArgs,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Drop special tokens from the decoded text.
    #[arg(long)]
    skip_special_tokens: bool,
}

impl DecodeArgs {
    /// Run the decode command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let tokenizer = self.tokenizer.load_tokenizer(false)?;

        let mut reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        run_decode(
            &mut reader,
            &mut writer,
            &tokenizer,
            self.skip_special_tokens,
        )
    }
}

fn parse_ids(
    line_no: usize,
    line: &str,
) -> Result<Vec<TokenId>, String> {
    line.split_whitespace()
        .map(|s| {
            s.parse::<TokenId>()
                .map_err(|e| format!("line {line_no}: bad token id {s:?}: {e}"))
        })
        .collect()
}

fn run_decode(
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
    tokenizer: &RobertaTokenizer,
    skip_special_tokens: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    for (idx, line) in reader.lines().enumerate() {
        let ids = parse_ids(idx + 1, &line?)?;
        let text = tokenizer.decode(&ids, skip_special_tokens)?;

        writeln!(writer, "{text}")?;
        writer.flush()?;
    }
    Ok(())
}
