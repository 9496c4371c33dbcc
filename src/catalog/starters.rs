//! Starter species per generation
//!
//! Families rooted at one of these names are pinned to the front of a
//! generation's catalog, in table order.

use crate::error::{Error, Result};

/// Lowest and highest supported generation numbers.
pub const MIN_GENERATION: u8 = 1;
pub const MAX_GENERATION: u8 = 9;

const STARTERS: [[&str; 3]; 9] = [
    ["bulbasaur", "charmander", "squirtle"],
    ["chikorita", "cyndaquil", "totodile"],
    ["treecko", "torchic", "mudkip"],
    ["piplup", "chimchar", "turtwig"],
    ["snivy", "tepig", "oshawott"],
    ["chespin", "fennekin", "froakie"],
    ["rowlet", "litten", "popplio"],
    ["grookey", "scorbunny", "sobble"],
    ["sprigatito", "fuecoco", "quaxly"],
];

/// True when `generation` lies in 1..=9.
pub fn is_valid_generation(generation: u8) -> bool {
    (MIN_GENERATION..=MAX_GENERATION).contains(&generation)
}

/// The three starters of `generation`, in presentation order.
pub fn starters_for(generation: u8) -> Result<&'static [&'static str; 3]> {
    if !is_valid_generation(generation) {
        return Err(Error::Config(format!(
            "generation must be between {} and {}, got {}",
            MIN_GENERATION, MAX_GENERATION, generation
        )));
    }
    Ok(&STARTERS[usize::from(generation - MIN_GENERATION)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_and_last_generation() {
        assert_eq!(
            starters_for(1).unwrap(),
            &["bulbasaur", "charmander", "squirtle"]
        );
        assert_eq!(starters_for(9).unwrap()[0], "sprigatito");
    }

    #[test]
    fn test_generation_four_keeps_table_order() {
        // Not catalog order: turtwig (#387) has the lowest number
        assert_eq!(starters_for(4).unwrap(), &["piplup", "chimchar", "turtwig"]);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(matches!(starters_for(0), Err(Error::Config(_))));
        assert!(matches!(starters_for(10), Err(Error::Config(_))));
        assert!(!is_valid_generation(0));
        assert!(is_valid_generation(5));
    }
}
