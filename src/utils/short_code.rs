use nanoid::nanoid;

pub const SHORT_CODE_LENGTH: usize = 6;

const BASE36_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Random base-36 short code. Uniqueness is the caller's job.
pub fn generate_short_code(length: usize) -> String {
    nanoid!(length, &BASE36_ALPHABET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_length() {
        assert_eq!(generate_short_code(SHORT_CODE_LENGTH).len(), 6);
    }

    #[test]
    fn test_custom_length() {
        assert_eq!(generate_short_code(9).len(), 9);
    }

    #[test]
    fn test_alphabet_is_base36() {
        for _ in 0..100 {
            let code = generate_short_code(SHORT_CODE_LENGTH);
            assert!(
                code.chars()
                    .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()),
                "unexpected character in {code}"
            );
        }
    }
}
