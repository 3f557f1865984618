pub mod planetary_computer;

pub trait STACCollection {
    fn key(&self) -> &str;
}

pub trait AssetKey {
    fn key(&self) -> &str;
}

pub trait AssetDescription {
    fn description(&self) -> &str;
}
