//! Wire format of the remote catalogue API
//!
//! Only the fields the viewer reads are modelled; everything else in the
//! payload is ignored by serde.

use dex_core::{CatalogRecord, DescriptionEntry, StatValue};
use serde::Deserialize;

/// A `{ name, url }` reference to another API resource
#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// `GET /pokemon/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonResponse {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatSlot {
    pub base_stat: u32,
    pub stat: NamedResource,
}

/// `GET /pokemon-species/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesResponse {
    pub id: u32,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlavorTextEntry {
    pub flavor_text: String,
    pub language: NamedResource,
    #[serde(default)]
    pub version: Option<NamedResource>,
}

/// Merge the two responses for one key into a catalogue record
pub fn into_record(pokemon: PokemonResponse, species: SpeciesResponse) -> CatalogRecord {
    let mut types = pokemon.types;
    types.sort_by_key(|t| t.slot);

    CatalogRecord {
        key: pokemon.id,
        name: pokemon.name,
        descriptions: species
            .flavor_text_entries
            .into_iter()
            .map(|entry| DescriptionEntry {
                text: entry.flavor_text,
                language: entry.language.name,
                version: entry.version.map(|v| v.name),
            })
            .collect(),
        categories: types.into_iter().map(|t| t.kind.name).collect(),
        height: pokemon.height,
        weight: pokemon.weight,
        stats: pokemon
            .stats
            .into_iter()
            .map(|s| StatValue {
                name: s.stat.name,
                value: s.base_stat,
            })
            .collect(),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    pub const POKEMON_1: &str = r#"{
        "id": 1,
        "name": "bulbasaur",
        "height": 7,
        "weight": 69,
        "base_experience": 64,
        "types": [
            { "slot": 2, "type": { "name": "poison", "url": "https://pokeapi.co/api/v2/type/4/" } },
            { "slot": 1, "type": { "name": "grass", "url": "https://pokeapi.co/api/v2/type/12/" } }
        ],
        "stats": [
            { "base_stat": 45, "effort": 0, "stat": { "name": "hp", "url": "" } },
            { "base_stat": 49, "effort": 0, "stat": { "name": "attack", "url": "" } },
            { "base_stat": 49, "effort": 0, "stat": { "name": "defense", "url": "" } },
            { "base_stat": 65, "effort": 1, "stat": { "name": "special-attack", "url": "" } },
            { "base_stat": 65, "effort": 0, "stat": { "name": "special-defense", "url": "" } },
            { "base_stat": 45, "effort": 0, "stat": { "name": "speed", "url": "" } }
        ]
    }"#;

    pub const SPECIES_1: &str = r#"{
        "id": 1,
        "name": "bulbasaur",
        "flavor_text_entries": [
            {
                "flavor_text": "Bulbasaur peut être vu",
                "language": { "name": "fr", "url": "" },
                "version": { "name": "x", "url": "" }
            },
            {
                "flavor_text": "A strange seed was\nplanted on its\fback at birth.\nThe plant sprouts\nand grows with\nthis POKéMON.",
                "language": { "name": "en", "url": "" },
                "version": { "name": "red", "url": "" }
            }
        ]
    }"#;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_record() {
        let pokemon: PokemonResponse = serde_json::from_str(fixtures::POKEMON_1).unwrap();
        let species: SpeciesResponse = serde_json::from_str(fixtures::SPECIES_1).unwrap();
        let record = into_record(pokemon, species);

        assert_eq!(record.key, 1);
        assert_eq!(record.name, "bulbasaur");
        assert_eq!(record.categories, vec!["grass", "poison"]);
        assert_eq!(record.stats.len(), 6);
        assert_eq!(record.stats[3].name, "special-attack");

        let english = record.english_description().unwrap();
        assert_eq!(english.version.as_deref(), Some("red"));
        assert!(english.text.contains('\u{c}'));
    }

    #[test]
    fn test_missing_optional_lists() {
        let pokemon: PokemonResponse =
            serde_json::from_str(r#"{ "id": 9, "name": "x", "height": 1, "weight": 2 }"#).unwrap();
        let species: SpeciesResponse = serde_json::from_str(r#"{ "id": 9 }"#).unwrap();
        let record = into_record(pokemon, species);
        assert!(record.categories.is_empty());
        assert!(record.english_description().is_none());
    }

    #[test]
    fn test_malformed_payload_is_rejected() {
        assert!(serde_json::from_str::<PokemonResponse>(r#"{ "id": "one" }"#).is_err());
    }
}
