use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One `{name, url}` entry of a list page, as the remote returns it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub name: String,
    pub url: String,
}

/// Body of the paged list endpoint. Only `results` is required.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ListPage {
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<ListEntry>,
}

/// Minimal per-item data shown in list views.
///
/// `id` is assigned from list position (`offset + index + 1`), not read
/// from the remote.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CatalogItemSummary {
    pub name: String,
    pub source_url: String,
    pub id: u32,
}

impl CatalogItemSummary {
    /// Maps a page of entries to summaries numbered from `offset + 1`.
    pub fn from_page(entries: Vec<ListEntry>, offset: u32) -> Vec<Self> {
        entries
            .into_iter()
            .zip(offset + 1..)
            .map(|(entry, id)| Self {
                name: entry.name,
                source_url: entry.url,
                id,
            })
            .collect()
    }
}

/// Full per-item payload.
///
/// The fields the shell renders are typed; everything else rides along in
/// `extra` so the record re-serializes unmodified.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CatalogItemDetail {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogItemDetail {
    /// Best available image: official artwork, then the default front sprite.
    pub fn image_url(&self) -> Option<&str> {
        self.sprites
            .other
            .as_ref()
            .and_then(|other| other.official_artwork.as_ref())
            .and_then(|art| art.front_default.as_deref())
            .or(self.sprites.front_default.as_deref())
    }

    pub fn type_names(&self) -> Vec<&str> {
        let mut slots: Vec<&TypeSlot> = self.types.iter().collect();
        slots.sort_by_key(|slot| slot.slot);
        slots.into_iter().map(|slot| slot.kind.name.as_str()).collect()
    }

    pub fn ability_names(&self) -> Vec<&str> {
        self.abilities
            .iter()
            .map(|slot| slot.ability.name.as_str())
            .collect()
    }
}

/// Reference to another named resource (`{name, url}`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSprites>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct OtherSprites {
    #[serde(default, rename = "official-artwork")]
    pub official_artwork: Option<SpriteSet>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SpriteSet {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StatEntry {
    pub base_stat: u32,
    #[serde(default)]
    pub effort: u32,
    pub stat: NamedResource,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TypeSlot {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AbilitySlot {
    pub ability: NamedResource,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub slot: u32,
}
