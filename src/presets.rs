//! Well-known patterns as static RLE bodies.
//!
//! This is reference data for hosts; the engine never reads it.

use crate::{Pattern, error::FormatError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetKind {
    StillLife,
    Oscillator,
    Spaceship,
    Gun,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub kind: PresetKind,
    pub rle: &'static str,
}

impl Preset {
    pub fn pattern(&self) -> Result<Pattern, FormatError> {
        Pattern::from_rle(self.rle)
    }
}

const fn preset(name: &'static str, kind: PresetKind, rle: &'static str) -> Preset {
    Preset { name, kind, rle }
}

pub const PRESETS: &[Preset] = &[
    preset("block", PresetKind::StillLife, "2o$2o!"),
    preset("beehive", PresetKind::StillLife, "b2o$o2bo$b2o!"),
    preset("loaf", PresetKind::StillLife, "b2ob$o2bo$bobo$2bo!"),
    preset("boat", PresetKind::StillLife, "2o$obo$bo!"),
    preset("tub", PresetKind::StillLife, "bo$obo$bo!"),
    preset("blinker", PresetKind::Oscillator, "3o!"),
    preset("toad", PresetKind::Oscillator, "b3o$3o!"),
    preset("beacon", PresetKind::Oscillator, "2o$2o$2b2o$2b2o!"),
    preset("glider", PresetKind::Spaceship, "2bo$obo$b2o!"),
    preset("lwss", PresetKind::Spaceship, "o2bo$4bo$o3bo$b4o!"),
    preset(
        "copperhead",
        PresetKind::Spaceship,
        "b2o2b2o$3b2o$3b2o$obo2bobo$o6bo2$o6bo$b2o2b2o$2b4o2$3b2o$3b2o!",
    ),
    preset(
        "gosper",
        PresetKind::Gun,
        concat!(
            "24bo$22bobo$12b2o6b2o12b2o$11bo3bo4b2o12b2o$",
            "2o8bo5bo3b2o$2o8bo3bob2o4bobo$10bo5bo7bo$11bo3bo$12b2o!",
        ),
    ),
    preset(
        "simkin",
        PresetKind::Gun,
        concat!(
            "2o5b2o$2o5b2o2$4b2o$4b2o5$22b2ob2o$21bo5bo$",
            "21bo6bo2b2o$21b3o3bo3b2o$26bo4!",
        ),
    ),
];

pub fn find(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

pub fn names() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|p| p.name)
}
