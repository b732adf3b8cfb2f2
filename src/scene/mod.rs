//! Scene model: the structured description of requested visual content
//! derived from a free-text prompt.
//!
//! A [`Scene`] is built once by the parser and consumed read-only by the
//! renderer. It never holds raw prompt text, only the recognized tags.

pub mod parser;

pub use parser::parse;

/// Closed set of object tags the renderer knows how to draw.
///
/// Every tag is bound to exactly one draw routine; adding a tag is a
/// compile-time-checked extension of the renderer's dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectTag {
    House,
    Car,
    Tree,
    Mountain,
    Water,
    Road,
    Grass,
    Person,
    Dog,
    Cat,
    Boat,
    Sun,
    Moon,
    Stars,
    Cloud,
    Rain,
    Snow,
    Birds,
    Airplane,
    City,
    Flowers,
    Fence,
}

impl ObjectTag {
    /// Display name used in captions.
    pub fn name(&self) -> &'static str {
        match self {
            ObjectTag::House => "house",
            ObjectTag::Car => "car",
            ObjectTag::Tree => "tree",
            ObjectTag::Mountain => "mountain",
            ObjectTag::Water => "water",
            ObjectTag::Road => "road",
            ObjectTag::Grass => "grass",
            ObjectTag::Person => "person",
            ObjectTag::Dog => "dog",
            ObjectTag::Cat => "cat",
            ObjectTag::Boat => "boat",
            ObjectTag::Sun => "sun",
            ObjectTag::Moon => "moon",
            ObjectTag::Stars => "stars",
            ObjectTag::Cloud => "clouds",
            ObjectTag::Rain => "rain",
            ObjectTag::Snow => "snow",
            ObjectTag::Birds => "birds",
            ObjectTag::Airplane => "airplane",
            ObjectTag::City => "city",
            ObjectTag::Flowers => "flowers",
            ObjectTag::Fence => "fence",
        }
    }
}

/// Time of day controlling the sky and ground gradient stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeOfDay {
    #[default]
    Day,
    Night,
    Sunset,
    Sunrise,
}

/// Weather condition; tints the sky and may add atmospheric overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weather {
    #[default]
    Clear,
    Rainy,
    Snowy,
    Cloudy,
    Stormy,
}

/// Spatial preposition recognized between two detected objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preposition {
    On,
    In,
}

/// A detected `(subject, preposition, object)` spatial relation, e.g.
/// `(Car, On, Road)`. Only emitted when both tags were detected and the
/// preposition keyword co-occurs in the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relationship {
    pub subject: ObjectTag,
    pub preposition: Preposition,
    pub object: ObjectTag,
}

/// A recognized color name with its RGB value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedColor {
    pub name: &'static str,
    pub rgb: [u8; 3],
}

/// Structured description of the requested visual content.
///
/// Immutable once built; the renderer never mutates a scene.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    /// Recognized object tags in fixed table scan order, duplicates suppressed.
    pub objects: Vec<ObjectTag>,
    /// Recognized color names; the first one is used when a draw routine
    /// needs a single tint color.
    pub colors: Vec<NamedColor>,
    /// Time of day, defaults to [`TimeOfDay::Day`].
    pub time: TimeOfDay,
    /// Weather, defaults to [`Weather::Clear`].
    pub weather: Weather,
    /// Detected spatial relations between objects.
    pub relationships: Vec<Relationship>,
}

impl Scene {
    /// Returns true if the given tag was detected in the prompt.
    pub fn contains(&self, tag: ObjectTag) -> bool {
        self.objects.contains(&tag)
    }

    /// First recognized color, if any. Draw routines that accept a tint use
    /// this one.
    pub fn primary_color(&self) -> Option<NamedColor> {
        self.colors.first().copied()
    }

    /// Returns true if the given relation triple was detected.
    pub fn has_relationship(
        &self,
        subject: ObjectTag,
        preposition: Preposition,
        object: ObjectTag,
    ) -> bool {
        self.relationships.iter().any(|r| {
            r.subject == subject && r.preposition == preposition && r.object == object
        })
    }

    /// Short human-readable summary of the detected content, suitable for
    /// display next to a generated image.
    pub fn caption(&self) -> String {
        let objects = self
            .objects
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(", ");
        let time = match self.time {
            TimeOfDay::Day => "day",
            TimeOfDay::Night => "night",
            TimeOfDay::Sunset => "sunset",
            TimeOfDay::Sunrise => "sunrise",
        };
        let weather = match self.weather {
            Weather::Clear => "clear",
            Weather::Rainy => "rainy",
            Weather::Snowy => "snowy",
            Weather::Cloudy => "cloudy",
            Weather::Stormy => "stormy",
        };
        format!("Scene with {objects} ({time}, {weather})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caption_lists_objects_time_and_weather() {
        let scene = Scene {
            objects: vec![ObjectTag::House, ObjectTag::Tree],
            time: TimeOfDay::Night,
            ..Default::default()
        };
        let caption = scene.caption();
        assert!(caption.contains("house"));
        assert!(caption.contains("tree"));
        assert!(caption.contains("night"));
        assert!(caption.contains("clear"));
    }

    #[test]
    fn primary_color_is_first_match() {
        let scene = Scene {
            colors: vec![
                NamedColor { name: "red", rgb: [200, 40, 40] },
                NamedColor { name: "blue", rgb: [40, 80, 200] },
            ],
            ..Default::default()
        };
        assert_eq!(scene.primary_color().unwrap().name, "red");
    }
}
