#[cfg(any(feature = "weather", feature = "lenses"))]
use crate::loader::load;
#[cfg(any(feature = "weather", feature = "lenses"))]
use c45::Dataset;

#[cfg(feature = "weather")]
/// Read in the numeric weather dataset
///
/// 14 days described by the discrete `outlook` and `windy` and the continuous `temperature` and
/// `humidity`, labelled with whether the game was played (`yes` or `no`).
pub fn weather() -> Dataset {
    let description = include_str!("../data/weather.desp");
    let data = include_str!("../data/weather.data");

    load(description.as_bytes(), data.as_bytes()).unwrap()
}

#[cfg(feature = "lenses")]
/// Read in the contact lenses dataset
///
/// All 24 combinations of `age`, `spectacle-prescrip`, `astigmatism` and `tear-prod-rate`,
/// labelled with the fitting lenses (`hard`, `soft` or `none`).
pub fn lenses() -> Dataset {
    let description = include_str!("../data/lenses.desp");
    let data = include_str!("../data/lenses.data");

    load(description.as_bytes(), data.as_bytes()).unwrap()
}
