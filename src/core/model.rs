use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One person as returned by the SWAPI `people` listing.
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
pub struct Character {
    pub name: String,
    #[serde(default)]
    pub height: String, // centimetres, string encoded
    #[serde(default)]
    pub birth_year: String,
    #[serde(default)]
    pub eye_color: String,
    pub homeworld: String,
    #[serde(default)]
    pub films: Vec<String>,
    /// The character's own locator; the portrait id is derived from it.
    #[serde(default)]
    pub url: String,
}

#[derive(Deserialize, Debug)]
pub struct Listing {
    pub results: Vec<Character>,
}

/// A character joined with its homeworld, portrait and favorite flag.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EnrichedCharacter {
    #[serde(flatten)]
    pub character: Character,
    pub homeworld_name: String,
    pub image: Option<String>,
    #[serde(default)]
    pub favorite: bool,
}

impl EnrichedCharacter {
    pub fn name(&self) -> &str {
        &self.character.name
    }
}

/// Names of the favorited characters. Ordered so the persisted array is stable.
pub type FavoriteSet = BTreeSet<String>;

/// The favorite set implied by the current flags.
pub fn favorite_set(records: &[EnrichedCharacter]) -> FavoriteSet {
    records
        .iter()
        .filter(|c| c.favorite)
        .map(|c| c.name().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_parses_swapi_people_page() {
        let json = r#"{
            "count": 82,
            "next": "https://swapi.dev/api/people/?page=2",
            "previous": null,
            "results": [
                {
                    "name": "Luke Skywalker",
                    "height": "172",
                    "mass": "77",
                    "birth_year": "19BBY",
                    "eye_color": "blue",
                    "homeworld": "https://swapi.dev/api/planets/1/",
                    "films": [
                        "https://swapi.dev/api/films/1/",
                        "https://swapi.dev/api/films/2/"
                    ],
                    "url": "https://swapi.dev/api/people/1/"
                }
            ]
        }"#;

        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.results.len(), 1);
        let luke = &listing.results[0];
        assert_eq!(luke.name, "Luke Skywalker");
        assert_eq!(luke.height, "172");
        assert_eq!(luke.films.len(), 2);
        assert_eq!(luke.url, "https://swapi.dev/api/people/1/");
    }

    #[test]
    fn test_listing_without_homeworld_is_rejected() {
        let json = r#"{ "results": [ { "name": "Nobody" } ] }"#;
        assert!(serde_json::from_str::<Listing>(json).is_err());
    }

    #[test]
    fn test_favorite_set_collects_flagged_names() {
        let make = |name: &str, favorite: bool| EnrichedCharacter {
            character: Character {
                name: name.to_string(),
                ..Default::default()
            },
            homeworld_name: "Tatooine".to_string(),
            image: None,
            favorite,
        };
        let records = vec![make("Luke", true), make("Leia", false), make("Owen", true)];

        let set = favorite_set(&records);
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec!["Luke", "Owen"]);
    }
}
