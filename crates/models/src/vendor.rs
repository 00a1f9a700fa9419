use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Cloud vendors a resource can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vendor {
    #[serde(rename = "tcloud")]
    TCloud,
    #[serde(rename = "aws")]
    Aws,
    #[serde(rename = "gcp")]
    Gcp,
    #[serde(rename = "azure")]
    Azure,
    #[serde(rename = "huawei")]
    HuaWei,
}

impl Vendor {
    pub const ALL: [Vendor; 5] = [Vendor::TCloud, Vendor::Aws, Vendor::Gcp, Vendor::Azure, Vendor::HuaWei];

    pub fn as_str(&self) -> &'static str {
        match self {
            Vendor::TCloud => "tcloud",
            Vendor::Aws => "aws",
            Vendor::Gcp => "gcp",
            Vendor::Azure => "azure",
            Vendor::HuaWei => "huawei",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Vendor {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Vendor::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ModelError::validation(format!("unsupported vendor: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_vendor() {
        for v in Vendor::ALL {
            assert_eq!(v.as_str().parse::<Vendor>().unwrap(), v);
        }
    }

    #[test]
    fn rejects_unknown_and_miscased() {
        assert!("alibaba".parse::<Vendor>().is_err());
        assert!("TCloud".parse::<Vendor>().is_err());
        assert!("".parse::<Vendor>().is_err());
    }

    #[test]
    fn serde_matches_path_form() {
        assert_eq!(serde_json::to_string(&Vendor::HuaWei).unwrap(), "\"huawei\"");
        let v: Vendor = serde_json::from_str("\"gcp\"").unwrap();
        assert_eq!(v, Vendor::Gcp);
    }
}
