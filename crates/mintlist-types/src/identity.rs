use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// An address eligible for the whitelist.
///
/// Identities are opaque: no address format is assumed. The only rules are
/// that the string is non-empty and carries no surrounding whitespace, so the
/// bytes hashed into a leaf are exactly the bytes a signer address renders as
/// on the verifying side.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    /// Validate and wrap an address.
    pub fn new(address: impl Into<String>) -> Result<Self, TypeError> {
        let address = address.into();
        Self::check(&address)?;
        Ok(Self(address))
    }

    /// Check an address without taking ownership of it.
    pub fn check(address: &str) -> Result<(), TypeError> {
        if address.is_empty() {
            return Err(TypeError::InvalidIdentity("empty address".into()));
        }
        if address.trim() != address {
            return Err(TypeError::InvalidIdentity(format!(
                "address has surrounding whitespace: {address:?}"
            )));
        }
        Ok(())
    }

    /// The address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The bytes that get hashed into a leaf.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self.0)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Identity {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Identity {
    type Error = TypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Identity> for String {
    fn from(identity: Identity) -> Self {
        identity.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_address() {
        let id = Identity::new("archway1eawplys3a5vxswxyddm420vd5su4jzdae9eyy3").unwrap();
        assert_eq!(id.as_str(), "archway1eawplys3a5vxswxyddm420vd5su4jzdae9eyy3");
        assert_eq!(id.to_string(), id.as_str());
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            Identity::new(""),
            Err(TypeError::InvalidIdentity(_))
        ));
    }

    #[test]
    fn rejects_surrounding_whitespace() {
        assert!(Identity::new(" addrA").is_err());
        assert!(Identity::new("addrA\n").is_err());
        assert!(Identity::new("   ").is_err());
    }

    #[test]
    fn inner_whitespace_is_opaque() {
        assert!(Identity::new("addr A").is_ok());
    }

    #[test]
    fn serde_validates() {
        let id: Identity = serde_json::from_str("\"addrA\"").unwrap();
        assert_eq!(id.as_str(), "addrA");
        assert!(serde_json::from_str::<Identity>("\"\"").is_err());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"addrA\"");
    }
}
