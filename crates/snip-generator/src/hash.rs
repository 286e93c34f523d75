use crate::CodeGenerator;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha1::{Digest, Sha1};
use snip_core::{ShortCode, SHORT_CODE_LENGTH};

/// The form-encoded bytes of the original URL.
///
/// Obtained from [`HashGenerator::generate`] and handed back to
/// [`HashGenerator::regenerate`]. It is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    bytes: Vec<u8>,
}

impl Seed {
    fn from_url(url: &str) -> Self {
        Self {
            bytes: form_encode(url).into_bytes(),
        }
    }

    /// Returns the encoded URL bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns a copy of the seed with the byte at `index` replaced by `byte`.
    ///
    /// An empty seed yields the single byte instead.
    fn perturbed(&self, index: usize, byte: u8) -> Vec<u8> {
        let mut input = self.bytes.clone();
        match input.get_mut(index) {
            Some(slot) => *slot = byte,
            None => input.push(byte),
        }
        input
    }
}

/// Form-style percent encoding: lowercase hex escapes, `+` for a space, and
/// `!*()` left as is next to the unreserved `-._` set. `~` is escaped.
fn form_encode(url: &str) -> String {
    let encoded = urlencoding::encode(url);
    let mut out = String::with_capacity(encoded.len());
    let mut rest: &str = &encoded;

    while let Some(c) = rest.chars().next() {
        match c {
            '%' if rest.len() >= 3 => {
                let escape = &rest[..3];
                match escape {
                    "%20" => out.push('+'),
                    "%21" => out.push('!'),
                    "%2A" => out.push('*'),
                    "%28" => out.push('('),
                    "%29" => out.push(')'),
                    _ => out.push_str(&escape.to_ascii_lowercase()),
                }
                rest = &rest[3..];
            }
            '~' => {
                out.push_str("%7e");
                rest = &rest[1..];
            }
            _ => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    out
}

/// A content-derived short code generator.
///
/// The first candidate for a URL is the SHA-1 digest of the form-encoded
/// URL, base64 encoded (URL-safe alphabet) and cut to [`SHORT_CODE_LENGTH`]
/// characters. Alternatives replace one random byte of the encoded URL with a
/// random value before hashing.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashGenerator;

impl HashGenerator {
    pub fn new() -> Self {
        Self
    }

    fn code_from_bytes(input: &[u8]) -> ShortCode {
        let digest = Sha1::digest(input);
        let encoded = URL_SAFE_NO_PAD.encode(digest);
        // a 20 byte digest encodes to 27 ASCII characters
        ShortCode::new_unchecked(&encoded[..SHORT_CODE_LENGTH])
    }
}

impl CodeGenerator for HashGenerator {
    type Seed = Seed;

    fn generate(&self, url: &str) -> (ShortCode, Seed) {
        let seed = Seed::from_url(url);
        let code = Self::code_from_bytes(seed.as_bytes());
        (code, seed)
    }

    fn regenerate(&self, seed: &Seed) -> ShortCode {
        // the last byte is never picked
        let upper = seed.bytes.len().saturating_sub(1).max(1);
        let index = rand::random_range(0..upper);
        let byte = rand::random::<u8>();
        Self::code_from_bytes(&seed.perturbed(index, byte))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn neighbourhood(seed: &Seed) -> HashSet<ShortCode> {
        let upper = seed.as_bytes().len().saturating_sub(1).max(1);
        let mut codes = HashSet::new();
        for index in 0..upper {
            for byte in 0..=u8::MAX {
                codes.insert(HashGenerator::code_from_bytes(
                    &seed.perturbed(index, byte),
                ));
            }
        }
        codes
    }

    #[test]
    fn generate_is_deterministic() {
        let generator = HashGenerator::new();

        let (first, _) = generator.generate("https://example.com");
        let (second, _) = generator.generate("https://example.com");

        assert_eq!(first, second);
    }

    #[test]
    fn generate_matches_known_digest() {
        let generator = HashGenerator::new();

        let (code, seed) = generator.generate("https://example.com");
        assert_eq!(seed.as_bytes(), b"https%3a%2f%2fexample.com");
        assert_eq!(code.as_str(), "Taq-W2");

        let (code, _) = generator.generate("https://nice.com/");
        assert_eq!(code.as_str(), "uyy6yr");
    }

    #[test]
    fn seed_uses_form_encoding() {
        let generator = HashGenerator::new();

        let (code, seed) = generator.generate("https://example.com/a b");
        assert_eq!(seed.as_bytes(), b"https%3a%2f%2fexample.com%2fa+b");
        assert_eq!(code.as_str(), "w18oNi");

        let (code, seed) = generator.generate("https://x.io/!*()~'");
        assert_eq!(seed.as_bytes(), b"https%3a%2f%2fx.io%2f!*()%7e%27");
        assert_eq!(code.as_str(), "UocJAK");
    }

    #[test]
    fn form_encoding_escapes_multibyte_as_lowercase_utf8() {
        assert_eq!(form_encode("é"), "%c3%a9");
        assert_eq!(form_encode("a-b_c.d"), "a-b_c.d");
    }

    #[test]
    fn generated_codes_are_valid_short_codes() {
        let generator = HashGenerator::new();

        for url in ["https://a.io", "http://x.y/z?q=1&r=2", "ftp://ünïcode.test/"] {
            let (code, seed) = generator.generate(url);
            assert!(ShortCode::new(code.as_str()).is_ok(), "{code}");

            let regenerated = generator.regenerate(&seed);
            assert!(ShortCode::new(regenerated.as_str()).is_ok(), "{regenerated}");
        }
    }

    #[test]
    fn different_urls_produce_different_codes() {
        let generator = HashGenerator::new();

        let (a, _) = generator.generate("https://google.com/");
        let (b, _) = generator.generate("https://microsoft.com/");

        assert_ne!(a, b);
    }

    #[test]
    fn regenerate_stays_in_neighbourhood_of_original_seed() {
        let generator = HashGenerator::new();
        let (_, seed) = generator.generate("https://a.io");
        let allowed = neighbourhood(&seed);

        // A random walk would drift out of the single-byte neighbourhood.
        for _ in 0..50 {
            let code = generator.regenerate(&seed);
            assert!(allowed.contains(&code), "{code} is not one byte away");
        }
    }

    #[test]
    fn regenerate_does_not_mutate_seed() {
        let generator = HashGenerator::new();
        let (_, seed) = generator.generate("https://a.io");
        let before = seed.clone();

        for _ in 0..10 {
            generator.regenerate(&seed);
        }

        assert_eq!(seed, before);
    }

    #[test]
    fn regenerate_draws_vary() {
        let generator = HashGenerator::new();
        let (_, seed) = generator.generate("https://example.com/some/long/path");

        let codes: HashSet<_> = (0..20).map(|_| generator.regenerate(&seed)).collect();

        assert!(codes.len() > 1);
    }

    #[test]
    fn perturbed_replaces_exactly_one_byte() {
        let seed = Seed::from_url("abc");
        assert_eq!(seed.perturbed(1, b'z'), b"azc");
        assert_eq!(seed.as_bytes(), b"abc");
    }

    #[test]
    fn empty_seed_still_regenerates() {
        let generator = HashGenerator::new();
        let (_, seed) = generator.generate("");

        let code = generator.regenerate(&seed);

        assert_eq!(code.as_str().len(), SHORT_CODE_LENGTH);
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HashGenerator>();
        assert_send_sync::<Seed>();
    }
}
