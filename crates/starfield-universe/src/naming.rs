//! Display names for generated bodies.
//!
//! Stars get a random 2-3 syllable name with an optional catalog number.
//! Planets and moons are named after their parent: `Zornax b`, `Zornax b II`.

use rand::Rng;

const SYLLABLES: [&str; 10] = [
    "zor", "nax", "vex", "tron", "lux", "dex", "pho", "kro", "mex", "thy",
];

const ROMAN: [&str; 10] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X"];

/// Random star name such as `Vexlux` or `Krothydex-417`.
pub fn star_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let syllables = rng.random_range(2..=3);
    let mut name = String::new();
    for i in 0..syllables {
        let s = SYLLABLES[rng.random_range(0..SYLLABLES.len())];
        if i == 0 {
            let mut chars = s.chars();
            if let Some(first) = chars.next() {
                name.extend(first.to_uppercase());
                name.push_str(chars.as_str());
            }
        } else {
            name.push_str(s);
        }
    }
    if rng.random_bool(0.5) {
        name.push_str(&format!("-{}", rng.random_range(0..999)));
    }
    name
}

/// Planet `index` (0-based) of `star`: `b`, `c`, `d`, ...
pub fn planet_name(star: &str, index: usize) -> String {
    let letter = (b'b' + (index % 25) as u8) as char;
    format!("{star} {letter}")
}

/// Moon `index` (0-based) of `planet`, numbered in Roman numerals.
pub fn moon_name(planet: &str, index: usize) -> String {
    match ROMAN.get(index) {
        Some(numeral) => format!("{planet} {numeral}"),
        None => format!("{planet} {}", index + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_star_names_capitalized() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            let name = star_name(&mut rng);
            assert!(name.chars().next().unwrap().is_uppercase(), "{name}");
            assert!(name.len() >= 6);
        }
    }

    #[test]
    fn test_child_names() {
        assert_eq!(planet_name("Luxdex", 0), "Luxdex b");
        assert_eq!(planet_name("Luxdex", 3), "Luxdex e");
        assert_eq!(moon_name("Luxdex b", 1), "Luxdex b II");
        assert_eq!(moon_name("Luxdex b", 12), "Luxdex b 13");
    }
}
