//! Descriptive container attributes recorded by annotators
//!
//! None of these feed the classifiers yet. They are kept so that catalogued
//! containers can later be split into finer deposit classes (liquor, dairy,
//! jars) without re-annotating.

use serde::{Deserialize, Serialize};

choice_enum! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum Rigidity ("rigidity") {
        #[default]
        Rigid => "rigid",
        Flexible => "flexible",
        Unknown => "unknown",
    }
}

choice_enum! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum Shape ("shape") {
        #[default]
        Unknown => "unknown",
        Bottle => "bottle",
        CanBeverage => "can_beverage",
        CanFood => "can_food",
        Cup => "cup",
        Jar => "jar",
        Cubic => "cubic",
        EggShaped => "egg_shaped",
        BagWrapper => "bag_wrapper",
        Pouch => "pouch",
        Rest => "rest",
    }
}

choice_enum! {
    /// What the container held
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum Contents ("content_type") {
        #[default]
        Unknown => "unknown",
        Beverage => "beverage",
        Candy => "candy",
        Oil => "oil",
        Cosmetics => "cosmetics",
        Pharmaceutical => "pharmaceutical",
        Food => "food",
        Condiments => "condiments",
        Flammable => "flammable",
        Rest => "rest",
    }
}

choice_enum! {
    /// Annotator answer for yes/no attributes
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum Answer ("yes/no") {
        #[default]
        Unknown => "unknown",
        Yes => "yes",
        No => "no",
    }
}

choice_enum! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum BeverageType ("beverage_type") {
        Na => "NA",
        #[default]
        Unknown => "unknown",
        Water => "water",
        FlavoredWater => "flavored_water",
        CoconutWater => "coconut_water",
        SoftDrink => "soft_drink",
        SoftDrinkAlternative => "soft_drink_alternative",
        SportsDrink => "sports_drink",
        EnergyDrink => "energy_drink",
        AlcoholicBeverage => "alcoholic_beverage",
        Dairy => "dairy",
        SubstituteMilk => "substitute_milk",
        ProteinShake => "protein_shake",
        FruitJuice => "fruit_juice",
        VegetableJuice => "vegetable_juice",
        Coffee => "coffee",
        Tea => "tea",
        Probiotics => "probiotics",
        Rest => "rest",
    }
}

choice_enum! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum AlcoholicDrinksType ("alcoholic_drinks_type") {
        #[default]
        Na => "NA",
        Unknown => "unknown",
        Absinthe => "absinthe",
        Baijiu => "baijiu",
        Beer => "beer",
        Bourbon => "bourbon",
        Brandy => "brandy",
        CocktailMix => "cocktail_mix",
        Cognac => "cognac",
        Gin => "gin",
        HardSeltzer => "hard_seltzer",
        Makgeolli => "makgeolli",
        Malt => "malt",
        Rum => "rum",
        Sake => "sake",
        Scotch => "scotch",
        Soju => "soju",
        Tequila => "tequila",
        Vermouth => "vermouth",
        Vodka => "vodka",
        Whisky => "whisky",
        Wine => "wine",
        Other => "other",
    }
}

choice_enum! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum WineBottleShape ("wine_bottle_shape") {
        #[default]
        Na => "NA",
        Unknown => "unknown",
        Alsace => "alsace",
        Bordeaux => "bordeaux",
        Burgundy => "burgundy",
        Champagne => "champagne",
        Chianti => "chianti",
        Port => "port",
        Provence => "provence",
        Other => "other",
    }
}

choice_enum! {
    /// Grape or style; wire strings keep their accents
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum WineType ("wine_type") {
        #[default]
        Na => "NA",
        Unknown => "unknown",
        Albarino => "albariño",
        CabernetFranc => "cabernet_franc",
        CabernetSauvignon => "cabernet_sauvignon",
        Cava => "cava",
        Champagne => "champagne",
        Chardonnay => "chardonnay",
        CheninBlanc => "chenin_blanc",
        Gewurztraminer => "gewürztraminer",
        GrunerVeltliner => "grüner_veltliner",
        Madeira => "madeira",
        Malbec => "malbec",
        Merlot => "merlot",
        Muscat => "muscat",
        PinotBlanc => "pinot_blanc",
        PinotGris => "pinot_gris",
        PinotNoir => "pinot_noir",
        Port => "port",
        Prosecco => "prosecco",
        RedBlend => "red_blend",
        Riesling => "riesling",
        Rose => "rosé",
        Sancerre => "sancerre",
        Sangiovese => "sangiovese",
        SauvignonBlanc => "sauvignon_blanc",
        Sherry => "sherry",
        Shiraz => "shiraz",
        SparklingWine => "sparkling_wine",
        Sylvaner => "sylvaner",
        WhiteBlend => "white_blend",
        Zinfandel => "zinfandel",
    }
}

choice_enum! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum MaterialColor ("material_color") {
        Amber => "amber",
        Beige => "beige",
        Black => "black",
        Blue => "blue",
        Brown => "brown",
        CobaltBlue => "cobalt_blue",
        EmeraldGreen => "emerald_green",
        FluorescentGreen => "fluorescent_green",
        Frosted => "frosted",
        Gold => "gold",
        Green => "green",
        Grey => "grey",
        Holographic => "holographic",
        Khaki => "khaki",
        MultiColor => "multi_color",
        NavyBlue => "navy_blue",
        OliveGreen => "olive_green",
        Orange => "orange",
        Pink => "pink",
        Purple => "purple",
        Red => "red",
        Silver => "silver",
        Translucent => "translucent",
        Transparent => "transparent",
        #[default]
        Unknown => "unknown",
        White => "white",
        Yellow => "yellow",
    }
}

choice_enum! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum Ribbed ("ribbed") {
        RibbedBody => "ribbed_body",
        RibbedNeck => "ribbed_neck",
        #[default]
        Na => "NA",
        Unknown => "unknown",
    }
}

choice_enum! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum Ringed ("ringed") {
        SingleRing => "single_ring",
        DoubleRing => "double_ring",
        #[default]
        Na => "NA",
        Unknown => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recyclable_types::Error;

    #[test]
    fn test_defaults_match_unannotated_container() {
        assert_eq!(Rigidity::default(), Rigidity::Rigid);
        assert_eq!(Shape::default(), Shape::Unknown);
        assert_eq!(BeverageType::default(), BeverageType::Unknown);
        assert_eq!(AlcoholicDrinksType::default(), AlcoholicDrinksType::Na);
        assert_eq!(WineType::default(), WineType::Na);
        assert_eq!(MaterialColor::default(), MaterialColor::Unknown);
        assert_eq!(Ribbed::default(), Ribbed::Na);
        assert_eq!(Ringed::default(), Ringed::Na);
    }

    #[test]
    fn test_accented_wire_strings() {
        assert_eq!("rosé".parse::<WineType>().unwrap(), WineType::Rose);
        assert_eq!("Grüner_Veltliner".parse::<WineType>().unwrap(), WineType::GrunerVeltliner);
        assert_eq!(serde_json::to_value(WineType::Albarino).unwrap(), "albariño");
        assert!(matches!(
            "rose".parse::<WineType>(),
            Err(Error::UnknownChoice { field: "wine_type", .. })
        ));
    }
}
