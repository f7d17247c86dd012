pub use vec1::vec1;

pub type Float = f64;

/// The rarity of an item; the value bound to `R` when a formula is evaluated.
pub type Rarity = Float;

pub type NonEmpty<T> = vec1::Vec1<T>;

pub(crate) trait FormatExpected {
    fn fmt_expected(&self) -> String;
}

impl FormatExpected for [&'static str] {
    fn fmt_expected(&self) -> String {
        match self {
            [] => String::new(),
            [a] => (*a).to_owned(),
            [a, b] => format!("{} or {}", a, b),
            s => format!("{}, or {}", s[..s.len() - 1].join(", "), &s[s.len() - 1]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_expected() {
        assert_eq!(["')'"].fmt_expected(), "')'");
        assert_eq!(["a number", "'R'"].fmt_expected(), "a number or 'R'");
        assert_eq!(
            ["a number", "'R'", "'('"].fmt_expected(),
            "a number, 'R', or '('"
        );
    }
}
