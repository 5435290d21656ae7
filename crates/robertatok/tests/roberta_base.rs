#![allow(missing_docs)]
//! Checks against the published ``roberta-base`` tokenizer.
//!
//! Downloads ``roberta-base`` through `tokenizers`; run with ``--ignored``.

use robertatok::{BatchEncoding, Encoding, RobertaTokenizer, TextEncoder, TokenizerOptions};
use tokenizers::{Model, PaddingParams, Tokenizer};

const SENTENCES: &[&str] = &[
    "I can feel the magic, can you?",
    "Hey Cortana",
    "lower newer",
    "one + two = three",
    "9 8 7 6 5 4 3 2 1 0",
    "9 8 7 - 6 5 4 - 3 2 1 0",
    "One Microsoft Way, Redmond, WA",
];

const BATCHES: &[&[&str]] = &[
    &["a diagram", "a dog", "a cat"],
    &["a photo of a cat", "a photo of a dog"],
];

fn hf_roberta() -> Tokenizer {
    Tokenizer::from_pretrained("roberta-base", None).unwrap()
}

/// Build ours from the vocabulary and merges the reference tokenizer saves.
fn load(
    hf_tok: &Tokenizer,
    options: TokenizerOptions,
) -> RobertaTokenizer {
    let dir = tempdir::TempDir::new("robertatok").unwrap();
    hf_tok.get_model().save(dir.path(), None).unwrap();

    let vocab = std::fs::read(dir.path().join("vocab.json")).unwrap();
    let merges = std::fs::read(dir.path().join("merges.txt")).unwrap();
    options.build_from_bytes(&vocab, &merges).unwrap()
}

fn assert_matches(
    text: &str,
    ours: &Encoding,
    theirs: &tokenizers::Encoding,
) {
    assert_eq!(ours.input_ids, theirs.get_ids(), "ids for {text:?}");
    assert_eq!(
        ours.attention_mask
            .iter()
            .map(|&m| m as u32)
            .collect::<Vec<_>>(),
        theirs.get_attention_mask(),
        "attention mask for {text:?}"
    );
    assert_eq!(ours.offset_mapping, theirs.get_offsets(), "offsets for {text:?}");
}

#[test]
#[ignore = "downloads roberta-base"]
fn hello_world() {
    let hf_tok = hf_roberta();

    let tok = load(&hf_tok, TokenizerOptions::default());
    let enc = tok.encode("Hello world").unwrap();
    assert_eq!(enc.input_ids, vec![0, 31414, 232, 2]);
    assert_eq!(enc.tokens, vec!["<s>", "Hello", "Ġworld", "</s>"]);
    assert_eq!(enc.offset_mapping, vec![(0, 0), (0, 5), (5, 11), (0, 0)]);

    let tok = load(&hf_tok, TokenizerOptions::default().with_trim_offsets(true));
    let enc = tok.encode("Hello world").unwrap();
    assert_eq!(enc.offset_mapping, vec![(0, 0), (0, 5), (6, 11), (0, 0)]);
}

#[test]
#[ignore = "downloads roberta-base"]
fn sentences_match_reference() {
    let hf_tok = hf_roberta();
    let tok = load(&hf_tok, TokenizerOptions::default().with_trim_offsets(true));

    for text in SENTENCES {
        let theirs = hf_tok.encode_char_offsets(*text, true).unwrap();
        let ours = tok.encode(text).unwrap();
        assert_matches(text, &ours, &theirs);
    }

    let enc = tok.encode("9 8 7 - 6 5 4 - 3 2 1 0").unwrap();
    assert_eq!(enc.len(), 14);
    assert_eq!(enc.offset_mapping[4], (6, 7));
}

#[test]
#[ignore = "downloads roberta-base"]
fn batches_match_reference() {
    let mut hf_tok = hf_roberta();
    let tok = load(&hf_tok, TokenizerOptions::default().with_trim_offsets(true));
    let pad_id = tok.special_tokens().pad.as_ref().unwrap().id;

    hf_tok.with_padding(Some(PaddingParams {
        pad_id,
        pad_token: "<pad>".to_string(),
        ..Default::default()
    }));

    for batch in BATCHES {
        let theirs = hf_tok
            .encode_batch_char_offsets(batch.to_vec(), true)
            .unwrap();
        let ours: BatchEncoding = tok.try_encode_batch(*batch).unwrap().to_dense();

        assert_eq!(ours.len(), theirs.len());
        for ((text, ours), theirs) in batch.iter().zip(&ours.encodings).zip(&theirs) {
            assert_matches(text, ours, theirs);
        }
    }
}

#[test]
#[ignore = "downloads roberta-base"]
fn round_trips_samples() {
    const SAMPLES: &[&str] = &[
        "hello world",
        "The quick brown fox jumps over the lazy dog.",
        "It's a beautiful day, and I'll be taking my 3 dogs for a walk.",
        "  multiple   spaces  ",
        "line1\nline2\r\nline3",
        "caf\u{00e9} na\u{00ef}ve \u{4f60}\u{597d}",
        "emoji: \u{1f600}\u{1f680}\u{1f4a1}",
    ];

    let hf_tok = hf_roberta();
    let tok = load(&hf_tok, TokenizerOptions::default());
    let unk = tok.special_tokens().unk.id;
    for text in SAMPLES {
        let enc = tok.encode(text).unwrap();
        assert!(!enc.input_ids.contains(&unk), "unk in {text:?}");
        assert_eq!(&tok.decode(&enc.input_ids, true).unwrap(), text);

        let theirs = hf_tok.encode(*text, true).unwrap();
        assert_eq!(enc.input_ids, theirs.get_ids(), "ids for {text:?}");
    }
}
