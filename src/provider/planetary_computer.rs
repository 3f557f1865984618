//! Collections and asset roles served by the Microsoft Planetary Computer catalog.
use super::STACCollection;

pub const SEARCH_API: &str = "https://planetarycomputer.microsoft.com/api/stac/v1/search";
pub const SAS_TOKEN_API: &str = "https://planetarycomputer.microsoft.com/api/sas/v1/token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanetaryComputerCollection {
    Sentinel2L2A,
    Sentinel1Rtc,
}

impl STACCollection for PlanetaryComputerCollection {
    fn key(&self) -> &str {
        match self {
            Self::Sentinel2L2A => sentinel_2_l2a::COLLECTION,
            Self::Sentinel1Rtc => sentinel_1_rtc::COLLECTION,
        }
    }
}

pub mod sentinel_2_l2a {
    use crate::provider::{AssetDescription, AssetKey};

    pub const COLLECTION: &str = "sentinel-2-l2a";

    #[derive(Debug, Clone, Copy)]
    pub enum AssetKind {
        Visual,
    }

    impl AssetKey for AssetKind {
        fn key(&self) -> &str {
            match self {
                Self::Visual => "visual",
            }
        }
    }

    impl AssetDescription for AssetKind {
        fn description(&self) -> &str {
            match self {
                Self::Visual => "truecolor",
            }
        }
    }
}

pub mod sentinel_1_rtc {
    use crate::provider::{AssetDescription, AssetKey};

    pub const COLLECTION: &str = "sentinel-1-rtc";

    #[derive(Debug, Clone, Copy)]
    pub enum AssetKind {
        VV,
        VH,
    }

    impl AssetKind {
        pub const POLARIZATIONS: [AssetKind; 2] = [AssetKind::VV, AssetKind::VH];
    }

    impl AssetKey for AssetKind {
        fn key(&self) -> &str {
            match self {
                Self::VV => "vv",
                Self::VH => "vh",
            }
        }
    }

    impl AssetDescription for AssetKind {
        fn description(&self) -> &str {
            self.key()
        }
    }
}
