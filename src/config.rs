//! Default search plan for Athens. Every value here can be overridden
//! with a CLI flag.

pub const DEFAULT_CATEGORIES: [&str; 11] = [
    "barber",
    "hair salon",
    "beauty salon",
    "cafe",
    "restaurant",
    "gym",
    "tutor",
    "electrician",
    "plumber",
    "pet grooming",
    "veterinary clinic",
];

pub const DEFAULT_NEIGHBORHOODS: [&str; 7] = [
    "Nea Smyrni",
    "Kallithea",
    "Palaio Faliro",
    "Alimos",
    "Neos Kosmos",
    "Moschato",
    "Dafni",
];

pub const DEFAULT_CITY: &str = "Athens";
pub const DEFAULT_COUNTRY: &str = "Greece";
