//! BIP-39 mnemonic utilities.
//!
//! Validation, generation and prefix expansion. Every word in the English
//! wordlist is uniquely identified by its first four letters, so
//! abbreviated phrases can be expanded before derivation.
//!
//! ```
//! use tessera::mnemonic;
//!
//! let expanded = mnemonic::expand("aban aban aban aban aban aban aban aban aban aban aban abou").unwrap();
//! assert!(mnemonic::is_valid(&expanded));
//! ```

use bip39::{Language, Mnemonic};
use zeroize::Zeroizing;

use crate::Error;

/// Minimum prefix length required for unambiguous word expansion.
const MIN_PREFIX_LEN: usize = 4;

/// Word counts accepted by BIP-39.
pub const WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// Check whether `phrase` is a valid English BIP-39 mnemonic.
///
/// Pure predicate over the wordlist and checksum; no key material is derived.
/// Applies the same NFKD normalization as [`parse`].
pub fn is_valid(phrase: &str) -> bool {
    parse(phrase).is_ok()
}

/// Parse and validate an English BIP-39 mnemonic.
pub fn parse(phrase: &str) -> Result<Mnemonic, Error> {
    Ok(Mnemonic::parse_in(Language::English, phrase)?)
}

/// Generate a random mnemonic with the given number of words.
pub fn generate(word_count: usize) -> Result<Zeroizing<String>, Error> {
    if !WORD_COUNTS.contains(&word_count) {
        return Err(Error::InvalidWordCount(word_count));
    }
    let mnemonic = Mnemonic::generate_in(Language::English, word_count)?;
    Ok(Zeroizing::new(mnemonic.to_string()))
}

/// Expand abbreviated words in a mnemonic phrase to their full BIP-39 form.
///
/// Exact words are kept; a token of at least four letters that prefixes
/// exactly one word is replaced by that word.
///
/// # Errors
///
/// Returns [`Error::UnknownPrefix`] if a token does not match any word.
/// Returns [`Error::AmbiguousPrefix`] if a token matches multiple words.
/// Returns [`Error::PrefixTooShort`] if a non-exact token has fewer than 4 characters.
pub fn expand(phrase: &str) -> Result<String, Error> {
    expand_in(Language::English, phrase)
}

/// Expand abbreviated words using the specified language wordlist.
pub fn expand_in(language: Language, phrase: &str) -> Result<String, Error> {
    let word_list = language.word_list();
    let words = phrase
        .split_whitespace()
        .map(|token| resolve_token(word_list, token))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(words.join(" "))
}

fn resolve_token(word_list: &'static [&'static str; 2048], token: &str) -> Result<&'static str, Error> {
    if let Ok(i) = word_list.binary_search(&token) {
        return Ok(word_list[i]);
    }

    if token.chars().count() < MIN_PREFIX_LEN {
        return Err(Error::PrefixTooShort {
            prefix: token.to_owned(),
            min_len: MIN_PREFIX_LEN,
        });
    }

    let matches: Vec<&'static str> = word_list
        .iter()
        .copied()
        .filter(|word| word.starts_with(token))
        .collect();

    match matches.as_slice() {
        [] => Err(Error::UnknownPrefix(token.to_owned())),
        [word] => Ok(*word),
        _ => Err(Error::AmbiguousPrefix {
            prefix: token.to_owned(),
            candidates: matches.iter().map(|w| (*w).to_owned()).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_12: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn validates_checksum() {
        assert!(is_valid(FULL_12));
        // Same words, wrong checksum word.
        assert!(!is_valid(
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon"
        ));
        assert!(!is_valid("abandon abandon notaword"));
        assert!(parse("hello world").is_err());
    }

    #[test]
    fn validation_normalizes_like_parsing() {
        // Fullwidth letters and ideographic spaces fold to ASCII under NFKD.
        let fullwidth: String = FULL_12
            .chars()
            .map(|c| match c {
                'a'..='z' => char::from_u32(u32::from(c) - u32::from('a') + 0xFF41).unwrap_or(c),
                ' ' => '\u{3000}',
                _ => c,
            })
            .collect();
        assert_ne!(fullwidth, FULL_12);
        assert!(is_valid(&fullwidth));
        assert_eq!(parse(&fullwidth).unwrap().to_string(), FULL_12);
    }

    #[test]
    fn generates_requested_length() {
        for count in WORD_COUNTS {
            let phrase = generate(count).unwrap();
            assert_eq!(phrase.split_whitespace().count(), count);
            assert!(is_valid(&phrase));
        }
        assert!(matches!(generate(13), Err(Error::InvalidWordCount(13))));
    }

    #[test]
    fn four_letter_prefix_expansion() {
        let abbreviated = "aban aban aban aban aban aban aban aban aban aban aban abou";
        assert_eq!(expand(abbreviated).unwrap(), FULL_12);
    }

    #[test]
    fn mixed_and_longer_prefixes() {
        let input = "abando aban abandon aban abandon aban abandon aban abandon aban abandon about";
        assert_eq!(expand(input).unwrap(), FULL_12);
    }

    #[test]
    fn short_exact_words_accepted() {
        assert_eq!(expand("zoo art ice").unwrap(), "zoo art ice");
    }

    #[test]
    fn prefix_errors() {
        assert!(matches!(
            expand("aba aba"),
            Err(Error::PrefixTooShort { min_len: 4, .. })
        ));
        assert!(matches!(expand("aban zzzz"), Err(Error::UnknownPrefix(p)) if p == "zzzz"));
    }

    #[test]
    fn different_words_expand_correctly() {
        assert_eq!(
            expand("abil acti addr admi wall wris").unwrap(),
            "ability action address admit wall wrist"
        );
    }
}
