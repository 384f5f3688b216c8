use cipher_core::CipherError;
use playfair_cipher::{prepare_text, PlayfairCipher};
use quickcheck::{quickcheck, TestResult};

#[test]
fn test_hello_with_security_key() {
    let cipher = PlayfairCipher::new("SECURITY").unwrap();
    assert_eq!(prepare_text("HELLO"), "HELXLO");
    assert_eq!(cipher.encrypt("HELLO"), "FUOQMP");
    assert_eq!(cipher.decrypt("FUOQMP"), "HELXLO");
}

#[test]
fn test_decrypt_normalizes_input() {
    let cipher = PlayfairCipher::new("security").unwrap();
    assert_eq!(cipher.decrypt("fu oq mp"), "HELXLO");
}

#[test]
fn test_decrypt_drops_odd_tail_and_skips_foreign_pairs() {
    let cipher = PlayfairCipher::new("SECURITY").unwrap();
    assert_eq!(cipher.decrypt("FUOQMPA"), "HELXLO");
    assert_eq!(cipher.decrypt("FU1QMP"), "HELO");
}

#[test]
fn test_empty_key_rejected() {
    assert!(matches!(
        PlayfairCipher::new(""),
        Err(CipherError::InvalidArgument(_))
    ));
}

#[test]
fn test_trace_matches_plain_result() {
    let cipher = PlayfairCipher::new("SECURITY").unwrap();
    let (traced, steps) = cipher.encrypt_with_trace("HELLO");
    assert_eq!(traced, cipher.encrypt("HELLO"));
    assert_eq!(steps.len(), 3);

    let first = &steps[0];
    assert_eq!(first.unit, "HE");
    assert_eq!(first.first, "(2,3)");
    assert_eq!(first.second.as_deref(), Some("(0,1)"));
    assert_eq!(first.rule, "Rectangle");
    assert_eq!(first.result, "FU");

    assert_eq!(steps[2].rule, "Same Row");
    assert_eq!(steps[2].result, "MP");

    let (plain, back) = cipher.decrypt_with_trace(&traced);
    assert_eq!(plain, "HELXLO");
    let units: Vec<&str> = back.iter().map(|s| s.unit.as_str()).collect();
    assert_eq!(units, ["FU", "OQ", "MP"]);
}

#[test]
fn test_same_column_rule_in_trace() {
    let cipher = PlayfairCipher::new("SECURITY").unwrap();
    // L and Q share column 0.
    let (out, steps) = cipher.encrypt_with_trace("LQ");
    assert_eq!(out, "QS");
    assert_eq!(steps[0].rule, "Same Col");
}

#[test]
fn test_no_letters_encrypts_to_empty() {
    let cipher = PlayfairCipher::new("KEY").unwrap();
    assert_eq!(cipher.encrypt("1234 !!"), "");
    assert_eq!(cipher.decrypt(""), "");
}

quickcheck! {
    fn prop_decrypt_inverts_encrypt(key: String, text: String) -> TestResult {
        if key.is_empty() {
            return TestResult::discard();
        }
        let cipher = PlayfairCipher::new(&key).unwrap();
        let prepared = prepare_text(&text);
        TestResult::from_bool(cipher.decrypt(&cipher.encrypt(&text)) == prepared)
    }

    fn prop_prepared_text_is_even_and_pairs_differ(text: String) -> bool {
        let prepared: Vec<char> = prepare_text(&text).chars().collect();
        prepared.len() % 2 == 0
            && prepared.chunks(2).all(|p| p[0] != p[1] || p[0] == 'X')
            && !prepared.contains(&'J')
    }
}
