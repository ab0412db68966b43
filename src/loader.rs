use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoaderError {
    #[error("malformed word '{0}', expected a 32-bit hexadecimal value")]
    MalformedWord(String),
}

pub type Result<T> = std::result::Result<T, LoaderError>;

/// Parses a textual program image: whitespace-separated hexadecimal 32-bit
/// words in address order from 0. Whether the image fits in memory is the
/// machine's concern, not the parser's.
pub fn parse_image(text: &str) -> Result<Vec<i32>> {
    text.split_whitespace()
        .map(|token| {
            u32::from_str_radix(token, 16)
                .map(|word| word as i32)
                .map_err(|_| LoaderError::MalformedWord(token.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_words_in_order() {
        let image = parse_image("02010005\n04010003\n01000000\n").unwrap();
        assert_eq!(image, vec![0x0201_0005, 0x0401_0003, 0x0100_0000]);
    }

    #[test]
    fn test_full_width_words_parse() {
        assert_eq!(parse_image("FFFFFFFF").unwrap(), vec![-1]);
    }

    #[test]
    fn test_empty_image() {
        assert_eq!(parse_image("").unwrap(), Vec::<i32>::new());
    }

    #[test]
    fn test_malformed_token_is_an_error() {
        assert_eq!(
            parse_image("02010005 LOADI"),
            Err(LoaderError::MalformedWord("LOADI".to_string()))
        );
        // 9 hex digits overflows 32 bits
        assert_eq!(
            parse_image("100000000"),
            Err(LoaderError::MalformedWord("100000000".to_string()))
        );
    }
}
