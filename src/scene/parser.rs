//! Keyword-driven prompt parser.
//!
//! Maps a free-text prompt to a [`Scene`] by substring membership tests
//! against fixed tables. There is no tokenization or grammar: a tag is added
//! as soon as any of its synonyms occurs anywhere in the lower-cased prompt.
//! This means substrings can false-positive ("carpet" contains "car",
//! "sunset" contains "sun"), an accepted and documented limitation of the
//! matching scheme, not a bug to be fixed here.

use super::{
    NamedColor, ObjectTag, Preposition, Relationship, Scene, TimeOfDay, Weather,
};

/// Object tag synonym table. Scan order here fixes the insertion order of
/// `Scene::objects`.
const OBJECT_KEYWORDS: &[(ObjectTag, &[&str])] = &[
    (ObjectTag::House, &["house", "home", "cottage", "cabin", "hut"]),
    (ObjectTag::Car, &["car", "vehicle", "automobile", "truck"]),
    (ObjectTag::Tree, &["tree", "forest", "oak", "pine"]),
    (ObjectTag::Mountain, &["mountain", "hill", "peak"]),
    (ObjectTag::Water, &["water", "ocean", "sea", "lake", "river", "wave"]),
    (ObjectTag::Road, &["road", "street", "highway"]),
    (ObjectTag::Grass, &["grass", "meadow", "lawn", "field"]),
    (ObjectTag::Person, &["person", "man", "woman", "people"]),
    (ObjectTag::Dog, &["dog", "puppy"]),
    (ObjectTag::Cat, &["cat", "kitten"]),
    (ObjectTag::Boat, &["boat", "ship", "sailboat", "yacht"]),
    (ObjectTag::Sun, &["sun", "sunshine"]),
    (ObjectTag::Moon, &["moon"]),
    (ObjectTag::Stars, &["star"]),
    (ObjectTag::Cloud, &["cloud"]),
    (ObjectTag::Rain, &["rain", "drizzle"]),
    (ObjectTag::Snow, &["snow"]),
    (ObjectTag::Birds, &["bird"]),
    (ObjectTag::Airplane, &["airplane", "plane", "jet", "aircraft"]),
    (ObjectTag::City, &["city", "town", "skyline", "building"]),
    (ObjectTag::Flowers, &["flower", "rose", "tulip"]),
    (ObjectTag::Fence, &["fence"]),
];

/// Color name table with the RGB value each name resolves to.
const COLOR_KEYWORDS: &[NamedColor] = &[
    NamedColor { name: "red", rgb: [200, 50, 45] },
    NamedColor { name: "orange", rgb: [235, 140, 50] },
    NamedColor { name: "yellow", rgb: [235, 210, 80] },
    NamedColor { name: "green", rgb: [70, 160, 75] },
    NamedColor { name: "blue", rgb: [60, 100, 200] },
    NamedColor { name: "purple", rgb: [140, 80, 180] },
    NamedColor { name: "pink", rgb: [230, 130, 170] },
    NamedColor { name: "brown", rgb: [140, 95, 60] },
    NamedColor { name: "white", rgb: [240, 240, 240] },
    NamedColor { name: "black", rgb: [35, 35, 40] },
    NamedColor { name: "gray", rgb: [130, 130, 135] },
];

/// Time-of-day keywords, first match wins.
const TIME_KEYWORDS: &[(TimeOfDay, &[&str])] = &[
    (TimeOfDay::Night, &["night", "midnight", "dark"]),
    (TimeOfDay::Sunset, &["sunset", "dusk", "evening"]),
    (TimeOfDay::Sunrise, &["sunrise", "dawn", "morning"]),
    (TimeOfDay::Day, &["day", "noon", "afternoon"]),
];

/// Weather keywords, first match wins.
const WEATHER_KEYWORDS: &[(Weather, &[&str])] = &[
    (Weather::Stormy, &["storm", "thunder", "lightning"]),
    (Weather::Rainy, &["rain", "drizzle"]),
    (Weather::Snowy, &["snow", "blizzard"]),
    (Weather::Cloudy, &["cloud", "overcast", "fog"]),
    (Weather::Clear, &["clear", "sunny"]),
];

/// Fixed set of relation pairs the parser is willing to emit, with the
/// preposition keyword that must co-occur in the text.
const RELATION_PAIRS: &[(ObjectTag, Preposition, ObjectTag)] = &[
    (ObjectTag::Car, Preposition::On, ObjectTag::Road),
    (ObjectTag::Boat, Preposition::On, ObjectTag::Water),
    (ObjectTag::Dog, Preposition::In, ObjectTag::House),
    (ObjectTag::Cat, Preposition::In, ObjectTag::House),
];

/// Objects used when nothing in the prompt matched, so the renderer never
/// receives an empty scene.
const DEFAULT_OBJECTS: &[ObjectTag] = &[ObjectTag::Tree, ObjectTag::Mountain, ObjectTag::Cloud];

fn keyword_of(preposition: Preposition) -> &'static str {
    match preposition {
        Preposition::On => "on",
        Preposition::In => "in",
    }
}

/// Parses a free-text prompt into a [`Scene`].
///
/// Never fails: an empty or garbled prompt simply yields the default scene
/// (`tree`, `mountain`, `cloud` at clear daytime).
///
/// Matching is plain substring containment on the lower-cased prompt. Each
/// tag is added at most once regardless of how many of its synonyms occur.
pub fn parse(prompt: &str) -> Scene {
    let text = prompt.to_lowercase();

    let mut objects = Vec::new();
    for (tag, synonyms) in OBJECT_KEYWORDS {
        if synonyms.iter().any(|kw| text.contains(kw)) {
            objects.push(*tag);
        }
    }
    if objects.is_empty() {
        objects.extend_from_slice(DEFAULT_OBJECTS);
    }

    let colors = COLOR_KEYWORDS
        .iter()
        .filter(|c| text.contains(c.name))
        .copied()
        .collect();

    let time = TIME_KEYWORDS
        .iter()
        .find(|(_, kws)| kws.iter().any(|kw| text.contains(kw)))
        .map(|(t, _)| *t)
        .unwrap_or_default();

    let weather = WEATHER_KEYWORDS
        .iter()
        .find(|(_, kws)| kws.iter().any(|kw| text.contains(kw)))
        .map(|(w, _)| *w)
        .unwrap_or_default();

    let mut relationships = Vec::new();
    for (subject, preposition, object) in RELATION_PAIRS {
        if objects.contains(subject)
            && objects.contains(object)
            && text.contains(keyword_of(*preposition))
        {
            relationships.push(Relationship {
                subject: *subject,
                preposition: *preposition,
                object: *object,
            });
        }
    }

    Scene {
        objects,
        colors,
        time,
        weather,
        relationships,
    }
}
