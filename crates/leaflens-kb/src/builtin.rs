//! Built-in banana disease table and model-label aliases.

use crate::record::DiseaseRecord;

/// Canonical key of the healthy-leaf record.
pub const HEALTHY_KEY: &str = "Healthy";

// (key, display name, symptoms, treatments)
type RawRecord = (&'static str, &'static str, &'static [&'static str], &'static [&'static str]);

const DISEASES: &[RawRecord] = &[
    (
        "Healthy",
        "Healthy Banana Leaf",
        &[
            "No visible lesions or spots",
            "Vibrant green coloration",
            "Intact leaf margins",
            "No signs of wilting or discoloration",
        ],
        &[
            "Maintain optimal growing conditions including proper watering and fertilization",
            "Regularly inspect for early signs of disease or pest infestation",
            "Ensure good air circulation around the plants",
            "Consider preventative cultural practices to reduce stress on the plants",
        ],
    ),
    (
        "Black Sigatoka",
        "Black and Yellow Sigatoka",
        &[
            "Dark, elongated streaks on leaf undersides",
            "Brown to black necrotic spots that coalesce",
            "Premature leaf death reducing yield",
        ],
        &[
            "Remove and destroy heavily infected leaves",
            "Reduce leaf wetness; improve spacing and airflow",
            "Apply recommended fungicides per local guidance",
        ],
    ),
    (
        "Yellow Sigatoka",
        "Yellow Sigatoka",
        &[
            "Yellowish streaks or spots on leaves",
            "Lesions develop brown centers with yellow halos",
            "Leaf area loss over time",
        ],
        &[
            "Improve sanitation by removing infected leaves",
            "Optimize irrigation to avoid prolonged wetness",
            "Follow a fungicide rotation program if advised",
        ],
    ),
    (
        "Fusarium Wilt",
        "Fusarium Wilt",
        &[
            "Yellowing of older leaves first",
            "Brown vascular discoloration in pseudostem",
            "Plant wilting and collapse in severe cases",
        ],
        &[
            "Rogue infected plants and destroy safely",
            "Improve soil drainage and avoid waterlogging",
            "Use resistant or tolerant cultivars when available",
        ],
    ),
    (
        "Bacterial Wilt",
        "Bacterial Wilt",
        &[
            "Sudden leaf yellowing and wilting",
            "Bacterial ooze from cut tissues",
            "Fruit pulp discoloration in advanced stages",
        ],
        &[
            "Uproot and destroy infected plants",
            "Disinfect tools and avoid movement of contaminated soil",
            "Use clean planting material and control insect vectors",
        ],
    ),
    (
        "Anthracnose",
        "Anthracnose",
        &[
            "Small dark spots on leaves or fruit",
            "Lesions expand with orange/pink spore masses under humid conditions",
            "Fruit blemishes and post-harvest rots",
        ],
        &[
            "Prune to increase airflow",
            "Avoid overhead irrigation",
            "Apply approved fungicides pre- and post-harvest where recommended",
        ],
    ),
    (
        "Banana Bunchy Top Virus",
        "Banana Bunchy Top Virus",
        &[
            "Stunted growth with bunched leaves at the top",
            "Dark green streaks on leaf midrib and petiole",
            "Narrow, upright leaves with marginal chlorosis",
        ],
        &[
            "Remove infected mats promptly",
            "Control aphid vectors",
            "Use virus-free planting material",
        ],
    ),
    (
        "Banana Streak Virus",
        "Banana Streak Virus",
        &[
            "Chlorotic streaks and mosaic patterns on leaves",
            "Reduced vigor and yield",
        ],
        &[
            "Use clean suckers",
            "Control mealybug vectors",
            "Remove severely affected plants",
        ],
    ),
    (
        "Banana Split Peel",
        "Banana Split Peel",
        &[
            "Peel cracking or splitting during development",
            "Often associated with irregular watering or rapid growth",
            "Fruit surface blemishes without significant leaf lesions",
        ],
        &[
            "Maintain even irrigation and avoid sudden water stress",
            "Mulch to regulate soil moisture",
            "Avoid physical damage and extreme temperature fluctuations",
        ],
    ),
    (
        "Banana Leaf Spot",
        "Banana Leaf Spot",
        &[
            "Small brown spots on leaves that may enlarge",
            "Yellow halos around lesions in some cases",
        ],
        &[
            "Remove severely affected leaves",
            "Reduce overhead watering",
            "Consider protective sprays per local recommendations",
        ],
    ),
    // Dataset-specific classes and pests
    (
        "Black and Yellow Sigatoka",
        "Black and Yellow Sigatoka",
        &[
            "Yellowish streaks progressing to brown/black lesions",
            "Dark necrotic patches that may coalesce",
            "Premature leaf death reducing photosynthetic area",
        ],
        &[
            "Sanitation: remove and destroy heavily infected leaves",
            "Improve airflow and reduce leaf wetness (optimize spacing/irrigation)",
            "Follow recommended fungicide rotation where advised",
        ],
    ),
    (
        "Banana Fruit-Scarring Beetle",
        "Banana Fruit-Scarring Beetle",
        &[
            "Feeding scars and pitting on developing fruit surface",
            "Superficial blemishes that can reduce market quality",
            "Occasional secondary infections at damaged sites",
        ],
        &[
            "Field sanitation: remove infested/deformed fruit and crop debris",
            "Use baited traps or barriers when suitable",
            "Apply targeted insecticides only if economic thresholds are exceeded per local guidance",
        ],
    ),
    (
        "Banana Skipper Damage",
        "Banana Skipper Damage",
        &[
            "Rolled or folded leaves with caterpillars inside",
            "Irregular chewing damage on leaves",
            "Reduced leaf area and vigor under heavy infestation",
        ],
        &[
            "Hand-remove rolled leaves harboring larvae where practical",
            "Encourage biological control; consider Bacillus thuringiensis (Bt) for young larvae",
            "Avoid broad-spectrum insecticides that disrupt beneficials unless necessary",
        ],
    ),
    (
        "Chewing insect damage on banana leaf",
        "Chewing insect damage on banana leaf",
        &[
            "Holes or notches along leaf margins",
            "Irregular patches of missing tissue",
            "Frass or insect presence on or under leaves",
        ],
        &[
            "Manual removal or exclusion (nets, traps) depending on pest",
            "Botanical options such as neem-based sprays where appropriate",
            "Targeted insecticides only if required; monitor and follow local IPM guidance",
        ],
    ),
];

// alias → canonical key. Alias spellings are normalised when the table is built.
const ALIASES: &[(&str, &str)] = &[
    // sigatoka
    ("black_sigatoka", "Black Sigatoka"),
    ("yellow_sigatoka", "Yellow Sigatoka"),
    ("sigatoka", "Yellow Sigatoka"),
    ("black_and_yellow_sigatoka", "Black and Yellow Sigatoka"),
    // fusarium
    ("fusarium", "Fusarium Wilt"),
    ("panama", "Fusarium Wilt"),
    ("panama_disease", "Fusarium Wilt"),
    ("panama_wilt", "Fusarium Wilt"),
    ("panama_wilt_disease", "Fusarium Wilt"),
    // bacterial wilt
    ("bacterial_wilt", "Bacterial Wilt"),
    ("moko", "Bacterial Wilt"),
    // viruses
    ("bbTV", "Banana Bunchy Top Virus"),
    ("bunchy_top", "Banana Bunchy Top Virus"),
    ("bsv", "Banana Streak Virus"),
    ("streak_virus", "Banana Streak Virus"),
    // other
    ("anthracnose", "Anthracnose"),
    ("leaf_spot", "Banana Leaf Spot"),
    ("healthy", "Healthy"),
    ("banana_split_peel", "Banana Split Peel"),
    ("banana_split", "Banana Split Peel"),
    // dataset names / pests
    ("banana_fruit_scarring_beetle", "Banana Fruit-Scarring Beetle"),
    ("banana_skipper_damage", "Banana Skipper Damage"),
    ("chewing_insect_damage_on_banana_leaf", "Chewing insect damage on banana leaf"),
    ("healthy_banana", "Healthy"),
    ("healthy_banana_leaf", "Healthy"),
];

/// Class order of the banana classifier head (cloud and on-device models).
pub const MODEL_CLASS_NAMES: &[&str] = &[
    "Anthracnose",
    "Banana Fruit-Scarring Beetle",
    "Banana Skipper Damage",
    "Banana Split Peel",
    "Black and Yellow Sigatoka",
    "Chewing insect damage on banana leaf",
    "Healthy Banana",
    "Healthy Banana leaf",
    "Panama Wilt Disease",
];

pub(crate) fn records() -> Vec<DiseaseRecord> {
    DISEASES
        .iter()
        .map(|(key, name, symptoms, treatments)| DiseaseRecord::new(*key, *name, symptoms, treatments))
        .collect()
}

pub(crate) fn aliases() -> impl Iterator<Item = (&'static str, &'static str)> {
    ALIASES.iter().copied()
}
