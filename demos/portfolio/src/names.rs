use orbit_engine::Rng;

/// Planet names used by the built-in rooms.
pub const NAMES: [&str; 10] = [
    "Volara", "Nyxus", "Aurelia", "Thal-3", "Kairon", "Xerith", "Cindrix", "Abyssium", "Vespera", "Solyn",
];

const PREFIXES: [&str; 13] = ["Vy", "Xe", "Ka", "Or", "Ny", "Au", "Ze", "Vo", "Sy", "Ty", "Qui", "Ara", "Lo"];
const SUFFIXES: [&str; 13] = [
    "ris", "thos", "lune", "dris", "ron", "vera", "drax", "lyx", "phos", "thia", "nox", "lyra", "dune",
];

/// A random two-syllable planet name, e.g. "Kalune".
pub fn make_planet_name(rng: &mut Rng) -> String {
    let head = rng.pick(&PREFIXES).copied().unwrap_or("Or");
    let tail = rng.pick(&SUFFIXES).copied().unwrap_or("ris");
    format!("{}{}", head, tail)
}
