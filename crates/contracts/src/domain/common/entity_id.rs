/// Identifier types of ERP records
pub trait EntityId: Clone + Copy + PartialEq + Eq + std::hash::Hash + std::fmt::Debug {
    /// Convert the id to its string form (tab keys, URL segments)
    fn as_string(&self) -> String;

    /// Parse an id back from its string form
    fn from_string(s: &str) -> Result<Self, String>;
}

impl EntityId for i64 {
    fn as_string(&self) -> String {
        ToString::to_string(self)
    }

    fn from_string(s: &str) -> Result<Self, String> {
        s.trim()
            .parse::<i64>()
            .map_err(|e| format!("Invalid id '{}': {}", s, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_strings() {
        assert_eq!(42_i64.as_string(), "42");
        assert_eq!(i64::from_string(" 42 "), Ok(42));
        assert!(i64::from_string("abc").is_err());
    }
}
