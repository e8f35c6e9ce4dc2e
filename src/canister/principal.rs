/// Textual identity of a user or canister on the Internet Computer.
///
/// The client only ever compares and displays principals, so the
/// checksummed text form is kept as-is.
#[derive(Debug, Default, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    pub fn as_str(&self) -> &str {
        &self.0
    }
    /// First and last groups, the way seats and chat lines show it.
    pub fn short(&self) -> String {
        match (self.0.split('-').next(), self.0.rsplit('-').next()) {
            (Some(head), Some(tail)) if head != tail => format!("{}…{}", head, tail),
            _ => self.0.clone(),
        }
    }
}

impl From<&str> for Principal {
    fn from(s: &str) -> Self {
        Self(s.trim().to_string())
    }
}
impl From<String> for Principal {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortens_grouped_text() {
        let p = Principal::from("2vxsx-fae-aaaaa-bbbbb-cai");
        assert_eq!(p.short(), "2vxsx…cai");
        assert_eq!(Principal::from("solo").short(), "solo");
    }
}
