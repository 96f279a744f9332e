//! Static kitchen data: ingredients, recipes and customers.

/// Every ingredient on the shelf, in shelf order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Ingredient {
    Octopus,
    Snail,
    Grasshopper,
    Spider,
    Scorpion,
    BirdEgg,
    Coral,
    Earthworm,
    Beef,
    Chicken,
    Fish,
    Potato,
    Tomato,
    Onion,
    Garlic,
    Chili,
    Cilantro,
}

impl Ingredient {
    pub const ALL: [Ingredient; 17] = [
        Ingredient::Octopus,
        Ingredient::Snail,
        Ingredient::Grasshopper,
        Ingredient::Spider,
        Ingredient::Scorpion,
        Ingredient::BirdEgg,
        Ingredient::Coral,
        Ingredient::Earthworm,
        Ingredient::Beef,
        Ingredient::Chicken,
        Ingredient::Fish,
        Ingredient::Potato,
        Ingredient::Tomato,
        Ingredient::Onion,
        Ingredient::Garlic,
        Ingredient::Chili,
        Ingredient::Cilantro,
    ];

    /// Position on the shelf (index into stock tables).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Ingredient> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Ingredient::Octopus => "Octopus",
            Ingredient::Snail => "Snail",
            Ingredient::Grasshopper => "Grasshopper",
            Ingredient::Spider => "Spider",
            Ingredient::Scorpion => "Scorpion",
            Ingredient::BirdEgg => "Bird Egg",
            Ingredient::Coral => "Coral",
            Ingredient::Earthworm => "Earthworm",
            Ingredient::Beef => "Beef",
            Ingredient::Chicken => "Chicken",
            Ingredient::Fish => "Fish",
            Ingredient::Potato => "Potato",
            Ingredient::Tomato => "Tomato",
            Ingredient::Onion => "Onion",
            Ingredient::Garlic => "Garlic",
            Ingredient::Chili => "Chili",
            Ingredient::Cilantro => "Cilantro",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Ingredient::Octopus => "🐙",
            Ingredient::Snail => "🐌",
            Ingredient::Grasshopper => "🦗",
            Ingredient::Spider => "🕷",
            Ingredient::Scorpion => "🦂",
            Ingredient::BirdEgg => "🪺",
            Ingredient::Coral => "🪸",
            Ingredient::Earthworm => "🪱",
            Ingredient::Beef => "🥩",
            Ingredient::Chicken => "🐔",
            Ingredient::Fish => "🐟",
            Ingredient::Potato => "🥔",
            Ingredient::Tomato => "🍅",
            Ingredient::Onion => "🧅",
            Ingredient::Garlic => "🧄",
            Ingredient::Chili => "🌶",
            Ingredient::Cilantro => "🥬",
        }
    }

    /// Emoji followed by name, e.g. "🐙 Octopus".
    pub fn label(self) -> String {
        format!("{} {}", self.emoji(), self.name())
    }
}

/// A named dish and the ingredients that make it.
#[derive(Debug, PartialEq)]
pub struct Recipe {
    pub name: &'static str,
    pub ingredients: &'static [Ingredient],
}

use Ingredient::*;

pub const RECIPES: &[Recipe] = &[
    Recipe { name: "Wok-Fried Spider Legs", ingredients: &[Spider, Chili, Garlic] },
    Recipe { name: "Charred Scorpion Skewers", ingredients: &[Scorpion, Onion, Chili] },
    Recipe { name: "Snail Sashimi", ingredients: &[Snail, Cilantro, Garlic] },
    Recipe { name: "Deep-Fried Grasshoppers", ingredients: &[Grasshopper, Potato, Chili] },
    Recipe { name: "Takoyaki", ingredients: &[Octopus, Onion, Tomato] },
    Recipe { name: "Earthworm Salad", ingredients: &[Earthworm, Cilantro, Tomato] },
    Recipe { name: "Steamed Coral & Egg", ingredients: &[BirdEgg, Coral, Garlic] },
    Recipe { name: "Inferno Seafood Pot", ingredients: &[Octopus, Scorpion, Spider] },
    Recipe { name: "Insect Platter", ingredients: &[Grasshopper, Spider, Scorpion] },
    Recipe { name: "Coral-Braised Snail", ingredients: &[Coral, Snail, Onion] },
    Recipe { name: "Earthworm Omelette", ingredients: &[Earthworm, BirdEgg, Garlic] },
    Recipe { name: "Abyssal Dread", ingredients: &[Octopus, Coral, Spider] },
    Recipe { name: "Dark Cuisine", ingredients: &[Grasshopper, Earthworm, Scorpion] },
    Recipe { name: "Beast Casserole", ingredients: &[Snail, Spider, BirdEgg] },
    Recipe { name: "Full Inferno Banquet", ingredients: &[Octopus, Scorpion, Snail, Spider] },
];

pub const CUSTOMERS: &[&str] = &["😈", "👹", "👺", "💀", "👻", "👽", "🤖", "🎃", "🦇", "🕸"];
