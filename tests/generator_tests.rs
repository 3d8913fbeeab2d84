use pwa_vault::vault::generator::{generate, GenOptions, SystemRng, MAX_LENGTH, MIN_LENGTH};

fn opts(length: usize, upper: bool, numbers: bool, symbols: bool) -> GenOptions {
    GenOptions {
        length,
        include_uppercase: upper,
        include_numbers: numbers,
        include_symbols: symbols,
    }
}

#[test]
fn length_is_clamped_to_bounds() {
    let rng = SystemRng;
    assert_eq!(generate(&rng, &opts(1, false, false, false)).unwrap().len(), MIN_LENGTH);
    assert_eq!(generate(&rng, &opts(100, true, true, true)).unwrap().len(), MAX_LENGTH);
    assert_eq!(generate(&rng, &opts(12, false, false, false)).unwrap().len(), 12);
}

#[test]
fn bare_pool_falls_back_to_lowercase_and_digits() {
    let rng = SystemRng;
    let mut saw_digit = false;
    for _ in 0..200 {
        let pw = generate(&rng, &opts(64, false, false, false)).unwrap();
        assert!(pw.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()), "{pw}");
        saw_digit |= pw.chars().any(|c| c.is_ascii_digit());
    }
    assert!(saw_digit);
}

#[test]
fn symbols_only_never_adds_digits() {
    let rng = SystemRng;
    for _ in 0..50 {
        let pw = generate(&rng, &opts(64, false, false, true)).unwrap();
        assert!(!pw.chars().any(|c| c.is_ascii_digit()), "{pw}");
        assert!(pw.chars().all(|c| c.is_ascii_lowercase() || "!@#$%^&*()_+".contains(c)));
    }
}

#[test]
fn every_class_can_appear() {
    let rng = SystemRng;
    let pw: String = (0..20)
        .map(|_| generate(&rng, &opts(64, true, true, true)).unwrap())
        .collect();
    assert!(pw.chars().any(|c| c.is_ascii_lowercase()));
    assert!(pw.chars().any(|c| c.is_ascii_uppercase()));
    assert!(pw.chars().any(|c| c.is_ascii_digit()));
    assert!(pw.chars().any(|c| "!@#$%^&*()_+".contains(c)));
}
