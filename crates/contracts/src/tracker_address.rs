//! TrackerAddress - `Device@Host` identifier of a remote tracker

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::ContractError;

/// Remote tracker address in `Device@Host` form.
///
/// # Examples
/// ```
/// use contracts::TrackerAddress;
///
/// let addr: TrackerAddress = "Drone001@192.168.31.100".parse().unwrap();
/// assert_eq!(addr.device(), "Drone001");
/// assert_eq!(addr.host(), "192.168.31.100");
/// assert_eq!(addr.to_string(), "Drone001@192.168.31.100");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackerAddress {
    device: String,
    host: String,
}

impl TrackerAddress {
    /// Build an address from separate device and host parts.
    pub fn new(device: impl Into<String>, host: impl Into<String>) -> Result<Self, ContractError> {
        let device = device.into();
        let host = host.into();

        if device.is_empty() || device.contains('@') {
            return Err(ContractError::invalid_address(
                format!("{device}@{host}"),
                "device name must be non-empty and must not contain '@'",
            ));
        }
        if host.is_empty() || host.contains('@') {
            return Err(ContractError::invalid_address(
                format!("{device}@{host}"),
                "host must be non-empty and must not contain '@'",
            ));
        }

        Ok(Self { device, host })
    }

    /// Device (tracker) name
    #[inline]
    pub fn device(&self) -> &str {
        &self.device
    }

    /// Server host
    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }
}

impl FromStr for TrackerAddress {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (device, host) = s
            .split_once('@')
            .ok_or_else(|| ContractError::invalid_address(s, "expected <Device@Host>"))?;
        Self::new(device, host)
    }
}

impl fmt::Display for TrackerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.device, self.host)
    }
}

impl Serialize for TrackerAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TrackerAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
