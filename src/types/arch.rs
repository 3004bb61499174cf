use crate::error::ContentsError;

use std::{fmt::Display, str::FromStr};

/// Architectures the mirror publishes a Contents index for
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Architecture {
    Amd64,
    Arm64,
    Armel,
    Armhf,
    I386,
    Mips64el,
    Mipsel,
    Ppc64el,
    S390x,
}

impl Architecture {
    pub const ALL: [Architecture; 9] = [
        Architecture::Amd64,
        Architecture::Arm64,
        Architecture::Armel,
        Architecture::Armhf,
        Architecture::I386,
        Architecture::Mips64el,
        Architecture::Mipsel,
        Architecture::Ppc64el,
        Architecture::S390x,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::Amd64 => "amd64",
            Architecture::Arm64 => "arm64",
            Architecture::Armel => "armel",
            Architecture::Armhf => "armhf",
            Architecture::I386 => "i386",
            Architecture::Mips64el => "mips64el",
            Architecture::Mipsel => "mipsel",
            Architecture::Ppc64el => "ppc64el",
            Architecture::S390x => "s390x",
        }
    }

    /// Name of the Contents file on the mirror, e.g. `Contents-amd64.gz`
    pub fn contents_filename(&self) -> String {
        format!("Contents-{}.gz", self.as_str())
    }

    /// Comma separated list of every valid name, for error messages
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Architecture {
    type Err = ContentsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| {
                ContentsError::InvalidArgument(format!("unknown architecture {:?}", s))
            })
    }
}
