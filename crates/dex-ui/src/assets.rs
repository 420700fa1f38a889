//! Artwork locations for catalogue entries

const ARTWORK_BASE_URL: &str = "https://assets.pokemon.com/assets/cms2/img/pokedex/full";

/// Key zero-padded to at least three digits ("#001")
pub fn padded_number(key: u32) -> String {
    format!("{:03}", key)
}

/// Full-size artwork for `key`
pub fn artwork_url(key: u32) -> String {
    format!("{}/{}.png", ARTWORK_BASE_URL, padded_number(key))
}
