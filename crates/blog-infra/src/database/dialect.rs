//! SQL placeholder dialects.

/// Placeholder style used when building statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `?` for every parameter (SQLite).
    Positional,
    /// `$1, $2, ...` (PostgreSQL).
    Numbered,
}

impl Dialect {
    /// Pick the dialect for a configured driver name. Unknown names fall back
    /// to positional placeholders.
    pub fn detect(driver: &str) -> Self {
        match driver.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" | "pgx" => Dialect::Numbered,
            _ => Dialect::Positional,
        }
    }

    /// Placeholder for the 1-based parameter `idx`.
    pub fn placeholder(self, idx: usize) -> String {
        match self {
            Dialect::Positional => "?".to_string(),
            Dialect::Numbered => format!("${idx}"),
        }
    }

    /// Comma-separated placeholders for parameters `1..=count`.
    pub fn placeholders(self, count: usize) -> String {
        (1..=count)
            .map(|idx| self.placeholder(idx))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(Dialect::detect("postgres"), Dialect::Numbered);
        assert_eq!(Dialect::detect(" PGX "), Dialect::Numbered);
        assert_eq!(Dialect::detect("postgresql"), Dialect::Numbered);
        assert_eq!(Dialect::detect("sqlite"), Dialect::Positional);
        assert_eq!(Dialect::detect("whatever"), Dialect::Positional);
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(Dialect::Positional.placeholders(3), "?, ?, ?");
        assert_eq!(Dialect::Numbered.placeholders(3), "$1, $2, $3");
        assert_eq!(Dialect::Numbered.placeholder(4), "$4");
    }
}
