//! Masking of credentials for logs and operator output.

/// Masks a secret for safe display: first 3 chars + "***" + last 2 chars.
/// Secrets of length <= 8 become "***" so short passwords never leak a segment.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    let len = chars.len();
    if len <= 8 {
        return "***".to_string();
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[len - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_secrets_are_fully_masked() {
        assert_eq!(mask_secret(""), "***");
        assert_eq!(mask_secret("p"), "***");
        assert_eq!(mask_secret("hunter22"), "***");
    }

    #[test]
    fn long_secrets_keep_head_and_tail() {
        assert_eq!(mask_secret("abcdefghijk"), "abc***jk");
        assert_eq!(mask_secret("tok-1234567890"), "tok***90");
    }

    #[test]
    fn multibyte_secrets_do_not_split_chars() {
        assert_eq!(mask_secret("пароль-секретный"), "пар***ый");
    }
}
