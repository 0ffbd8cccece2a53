//! CPF normalization, validation and formatting.

/// Number of digits in a CPF.
pub const CPF_LENGTH: usize = 11;

/// Strips every non-digit character from a CPF.
///
/// Returns the digits only when exactly 11 remain; otherwise returns an
/// empty string and callers must fall back to another identity key.
///
/// # Examples
///
/// ```
/// use folha_engine::normalize::normalize_cpf;
///
/// assert_eq!(normalize_cpf("123.456.789-01"), "12345678901");
/// assert_eq!(normalize_cpf("12345678901"), "12345678901");
/// assert_eq!(normalize_cpf("abc"), "");
/// assert_eq!(normalize_cpf("123"), "");
/// ```
pub fn normalize_cpf(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == CPF_LENGTH {
        digits
    } else {
        String::new()
    }
}

/// Checks a CPF against the official check-digit algorithm.
///
/// Punctuation is ignored. CPFs made of a single repeated digit are
/// rejected even though their check digits match.
///
/// ```
/// use folha_engine::normalize::is_valid_cpf;
///
/// assert!(is_valid_cpf("529.982.247-25"));
/// assert!(!is_valid_cpf("529.982.247-26"));
/// assert!(!is_valid_cpf("111.111.111-11"));
/// ```
pub fn is_valid_cpf(raw: &str) -> bool {
    let digits: Vec<u32> = raw.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != CPF_LENGTH || digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

fn check_digit(digits: &[u32]) -> u32 {
    let weight_start = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (weight_start - i as u32))
        .sum();
    let rest = (sum * 10) % 11;
    if rest == 10 { 0 } else { rest }
}

/// Formats an 11-digit CPF as `000.000.000-00`; other input is returned unchanged.
///
/// ```
/// use folha_engine::normalize::format_cpf;
///
/// assert_eq!(format_cpf("12345678901"), "123.456.789-01");
/// assert_eq!(format_cpf("123"), "123");
/// ```
pub fn format_cpf(cpf: &str) -> String {
    if cpf.len() != CPF_LENGTH || !cpf.chars().all(|c| c.is_ascii_digit()) {
        return cpf.to_string();
    }
    format!(
        "{}.{}.{}-{}",
        &cpf[0..3],
        &cpf[3..6],
        &cpf[6..9],
        &cpf[9..11]
    )
}
