use std::io::{self, BufRead, Write};

/// Ask for a minimum GPA and read one line of input.
///
/// `Ok(None)` means the answer was not a number (or input ended).
pub fn ask_min_gpa(input: &mut impl BufRead, out: &mut impl Write) -> io::Result<Option<f64>> {
    write!(out, "\nEnter minimum GPA to filter students: ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        log::debug!("input closed before a GPA was entered");
        return Ok(None);
    }
    Ok(parse_gpa(&line))
}

/// Parse free-form text as a GPA threshold. Surrounding whitespace is ignored
/// and digits may be grouped with single underscores (`1_000.5`).
pub fn parse_gpa(text: &str) -> Option<f64> {
    let text = text.trim();
    if !text.contains('_') {
        return text.parse::<f64>().ok();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut digits = String::with_capacity(chars.len());
    for (i, &c) in chars.iter().enumerate() {
        if c != '_' {
            digits.push(c);
            continue;
        }
        let between_digits = i > 0
            && chars[i - 1].is_ascii_digit()
            && chars.get(i + 1).is_some_and(char::is_ascii_digit);
        if !between_digits {
            return None;
        }
    }
    digits.parse::<f64>().ok()
}
