use huffpack::{decode, encode, Archive, Error, FrequencyTable, Trie};
use std::io::Cursor;

fn encode_decode(input: &[u8]) -> Vec<u8> {
    let mut packed = Cursor::new(Vec::new());
    let mut side = Cursor::new(Vec::new());
    encode(input, &mut packed, &mut side).unwrap();

    packed.set_position(0);
    side.set_position(0);
    let mut out = Vec::new();
    decode(packed, side, &mut out).unwrap();
    out
}

#[test]
fn assorted_inputs() {
    let long: Vec<u8> = "the rain in spain stays mainly in the plain\n"
        .bytes()
        .cycle()
        .take(100_000)
        .collect();
    let every_byte: Vec<u8> = (0..=255u8).rev().chain(0..=255u8).collect();
    let skewed: Vec<u8> = (0..20u8)
        .flat_map(|i| std::iter::repeat(i).take(1 << (i / 2)))
        .collect();

    let inputs: [&[u8]; 8] = [
        &b""[..],
        &b"x"[..],
        &b"aaaa"[..],
        &b"ab"[..],
        &b"AAAAABBBCCD"[..],
        &long,
        &every_byte,
        &skewed,
    ];
    for input in inputs {
        assert_eq!(encode_decode(input), input);
    }
}

#[test]
fn side_artifact_is_enough_to_rebuild_codes() {
    let input = b"she sells sea shells by the sea shore";
    let mut packed = Vec::new();
    let mut side = Vec::new();
    encode(input, &mut packed, &mut side).unwrap();

    let (total, rebuilt) = huffpack::table::read_trie(&side[..]).unwrap();
    let original = Trie::build(&FrequencyTable::of(input)).unwrap();

    assert_eq!(total, input.len() as u64);
    let rebuilt = rebuilt.unwrap().code_table();
    let original = original.code_table();
    for (symbol, code) in original.iter() {
        assert_eq!(rebuilt.get(symbol).map(|c| c.len()), Some(code.len()));
    }
}

#[test]
fn decode_with_wrong_side_artifact_fails() {
    let mut packed = Vec::new();
    let mut side = Vec::new();
    encode(b"AAAAABBBCCD", &mut packed, &mut side).unwrap();

    // claims far more symbols than the stream carries
    let bogus = b"1000\n1000001:1000\n";
    let err = decode(&packed[..], &bogus[..], Vec::new()).unwrap_err();
    assert!(matches!(err, Error::TruncatedStream { expected: 1000, .. }));
}

#[test]
fn archive_round_trip() {
    let input = b"Hello my name is Sam!";
    let bytes = Archive::compress(input).unwrap().to_vec().unwrap();
    let out = Archive::from_slice(&bytes).unwrap().decompress().unwrap();
    assert_eq!(out, input);
}
