#![allow(missing_docs)]

use std::sync::LazyLock;

use proptest::prelude::*;
use robertatok::{Padding, RobertaTokenizer, TextEncoder, vocab::ByteEncoder};

const VOCAB: &[u8] = include_bytes!("fixtures/vocab.json");
const MERGES: &[u8] = include_bytes!("fixtures/merges.txt");

static TOKENIZER: LazyLock<RobertaTokenizer> =
    LazyLock::new(|| RobertaTokenizer::from_bytes(VOCAB, MERGES, -1).unwrap());

/// Text drawn mostly from the fixture alphabet, with whitespace runs,
/// punctuation, specials, and multibyte chars mixed in.
fn fixture_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            4 => "[a-z]{1,6}",
            2 => "[ \t\n]{1,3}",
            1 => "[,!?'0-9-]{1,3}",
            1 => Just("<s>".to_string()),
            1 => Just("<mask>".to_string()),
            1 => "\\PC{1,3}",
        ],
        0..12,
    )
    .prop_map(|parts| parts.concat())
}

fn reconstruct(
    text: &str,
    offsets: &[(usize, usize)],
    attention: &[u8],
) -> String {
    let chars: Vec<char> = text.chars().collect();
    offsets
        .iter()
        .zip(attention)
        .filter(|&(&span, &mask)| mask == 1 && span != (0, 0))
        .map(|(&(start, end), _)| chars[start..end].iter().collect::<String>())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn rows_align_without_padding(text in fixture_text()) {
        let enc = TOKENIZER.encode(&text).unwrap();
        prop_assert_eq!(enc.input_ids.len(), enc.attention_mask.len());
        prop_assert_eq!(enc.input_ids.len(), enc.offset_mapping.len());
        prop_assert_eq!(enc.input_ids.len(), enc.tokens.len());
        prop_assert!(enc.attention_mask.iter().all(|&m| m == 1));
    }

    #[test]
    fn offsets_reconstruct_text(text in fixture_text()) {
        let enc = TOKENIZER.encode(&text).unwrap();
        let rebuilt = reconstruct(&text, &enc.offset_mapping, &enc.attention_mask);
        prop_assert_eq!(rebuilt, text);
    }

    #[test]
    fn offsets_reconstruct_arbitrary_text(text in "\\PC{0,60}") {
        let enc = TOKENIZER.encode(&text).unwrap();
        let rebuilt = reconstruct(&text, &enc.offset_mapping, &enc.attention_mask);
        prop_assert_eq!(rebuilt, text);
    }

    #[test]
    fn offsets_are_ordered(text in fixture_text()) {
        let enc = TOKENIZER.encode(&text).unwrap();
        let char_len = text.chars().count();
        let mut last_end = 0;
        for (&(start, end), &special) in enc.offset_mapping.iter().zip(&enc.special_tokens_mask) {
            prop_assert!(start <= end);
            prop_assert!(end <= char_len);
            if special == 0 || (start, end) != (0, 0) {
                prop_assert!(start >= last_end);
                last_end = end;
            }
        }
    }

    #[test]
    fn encoding_is_deterministic(text in fixture_text()) {
        let first = TOKENIZER.encode(&text).unwrap();
        let second = TOKENIZER.encode(&text).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn batch_matches_single(texts in proptest::collection::vec(fixture_text(), 0..8)) {
        let batch = TOKENIZER.try_encode_batch(&texts).unwrap();
        prop_assert_eq!(batch.len(), texts.len());
        for (text, enc) in texts.iter().zip(&batch.encodings) {
            prop_assert_eq!(&TOKENIZER.encode(text).unwrap(), enc);
        }
    }

    #[test]
    fn fixed_padding_shape(
        text in fixture_text(),
        len in 2usize..24,
    ) {
        let enc = TOKENIZER.encode_with_padding(&text, Padding::Fixed(len)).unwrap();
        prop_assert_eq!(enc.input_ids.len(), len);
        prop_assert_eq!(enc.attention_mask.len(), len);
        prop_assert_eq!(enc.offset_mapping.len(), len);

        let attended = enc.attended_len();
        prop_assert!(attended >= 2);
        prop_assert_eq!(enc.input_ids[attended - 1], 2);
        for row in attended..len {
            prop_assert_eq!(enc.attention_mask[row], 0);
            prop_assert_eq!(enc.offset_mapping[row], (0, 0));
            prop_assert_eq!(enc.input_ids[row], 1);
        }

        // Padding only appends to the unpadded prefix.
        let unpadded = TOKENIZER.encode(&text).unwrap();
        let keep = attended - 1;
        prop_assert_eq!(&enc.input_ids[..keep], &unpadded.input_ids[..keep]);
    }

    #[test]
    fn decode_inverts_encode(text in "[acdefghilmnorstwy ,!?'\n]{0,40}") {
        let enc = TOKENIZER.encode(&text).unwrap();
        prop_assert_eq!(TOKENIZER.decode(&enc.input_ids, true).unwrap(), text);
    }

    #[test]
    fn byte_encoder_round_trip(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let encoder = ByteEncoder::new();
        let encoded = encoder.encode(&bytes);
        prop_assert_eq!(encoded.chars().count(), bytes.len());
        prop_assert_eq!(encoder.decode(&encoded), Some(bytes));
    }
}
