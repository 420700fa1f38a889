//! Demo mode for the dex viewer
//! Serves a handful of built-in entries with simulated network latency

use std::time::Duration;

use dex_core::{CatalogRecord, DescriptionEntry, StatValue};
use dex_data::StaticCatalog;

/// Entries served in demo mode; navigation wraps at this size
pub const DEMO_SIZE: u32 = 10;

const DEMO_LATENCY: Duration = Duration::from_millis(350);

const STAT_NAMES: [&str; 6] = [
    "hp",
    "attack",
    "defense",
    "special-attack",
    "special-defense",
    "speed",
];

struct DemoEntry {
    key: u32,
    name: &'static str,
    description: Option<&'static str>,
    categories: &'static [&'static str],
    height: u32,
    weight: u32,
    stats: [u32; 6],
}

const ENTRIES: &[DemoEntry] = &[
    DemoEntry {
        key: 1,
        name: "bulbasaur",
        description: Some("A strange seed was\nplanted on its\u{c}back at birth. The plant sprouts\nand grows with this POKéMON."),
        categories: &["grass", "poison"],
        height: 7,
        weight: 69,
        stats: [45, 49, 49, 65, 65, 45],
    },
    DemoEntry {
        key: 2,
        name: "ivysaur",
        description: Some("When the bulb on\nits back grows\nlarge, it appears\u{c}to lose the\nability to stand\non its hind legs."),
        categories: &["grass", "poison"],
        height: 10,
        weight: 130,
        stats: [60, 62, 63, 80, 80, 60],
    },
    DemoEntry {
        key: 3,
        name: "venusaur",
        description: Some("The plant blooms\nwhen it is\nabsorbing solar\u{c}energy. It stays\non the move to\nseek sunlight."),
        categories: &["grass", "poison"],
        height: 20,
        weight: 1000,
        stats: [80, 82, 83, 100, 100, 80],
    },
    DemoEntry {
        key: 4,
        name: "charmander",
        description: Some("Obviously prefers\nhot places. When\nit rains, steam\u{c}is said to spout\nfrom the tip of\nits tail."),
        categories: &["fire"],
        height: 6,
        weight: 85,
        stats: [39, 52, 43, 60, 50, 65],
    },
    DemoEntry {
        key: 5,
        name: "charmeleon",
        description: Some("When it swings\nits burning tail,\nit elevates the\u{c}temperature to\nunbearably high\nlevels."),
        categories: &["fire"],
        height: 11,
        weight: 190,
        stats: [58, 64, 58, 80, 65, 80],
    },
    DemoEntry {
        key: 6,
        name: "charizard",
        description: Some("Spits fire that\nis hot enough to\nmelt boulders.\u{c}Known to cause\nforest fires\nunintentionally."),
        categories: &["fire", "flying"],
        height: 17,
        weight: 905,
        stats: [78, 84, 78, 109, 85, 100],
    },
    DemoEntry {
        key: 7,
        name: "squirtle",
        description: Some("After birth, its\nback swells and\nhardens into a\u{c}shell. Powerfully\nsprays foam from\nits mouth."),
        categories: &["water"],
        height: 5,
        weight: 90,
        stats: [44, 48, 65, 50, 64, 43],
    },
    DemoEntry {
        key: 8,
        name: "wartortle",
        description: Some("Often hides in\nwater to stalk\nunwary prey. For\u{c}swimming fast, it\nmoves its ears to\nmaintain balance."),
        categories: &["water"],
        height: 10,
        weight: 225,
        stats: [59, 63, 80, 65, 80, 58],
    },
    DemoEntry {
        key: 9,
        name: "blastoise",
        description: Some("A brutal POKéMON\nwith pressurized\nwater jets on its\u{c}shell. They are\nused for high\nspeed tackles."),
        categories: &["water"],
        height: 16,
        weight: 855,
        stats: [79, 83, 100, 85, 105, 78],
    },
    // No English text: the description slot shows its fallback
    DemoEntry {
        key: 10,
        name: "mr-mime",
        description: None,
        categories: &["psychic", "fairy"],
        height: 13,
        weight: 545,
        stats: [40, 45, 65, 100, 120, 90],
    },
];

impl DemoEntry {
    fn to_record(&self) -> CatalogRecord {
        let mut descriptions = vec![DescriptionEntry {
            text: format!("{} (démo)", self.name),
            language: "fr".to_string(),
            version: None,
        }];
        if let Some(text) = self.description {
            descriptions.push(DescriptionEntry {
                text: text.to_string(),
                language: "en".to_string(),
                version: Some("red".to_string()),
            });
        }

        CatalogRecord {
            key: self.key,
            name: self.name.to_string(),
            descriptions,
            categories: self.categories.iter().map(|c| c.to_string()).collect(),
            height: self.height,
            weight: self.weight,
            stats: STAT_NAMES
                .iter()
                .zip(self.stats)
                .map(|(name, value)| StatValue { name: name.to_string(), value })
                .collect(),
        }
    }
}

/// Demo catalogue with simulated latency
pub fn demo_catalog() -> StaticCatalog {
    StaticCatalog::new("demo")
        .with_records(ENTRIES.iter().map(DemoEntry::to_record))
        .with_latency(DEMO_LATENCY)
}
