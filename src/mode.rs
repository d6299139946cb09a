//! Mode finding over a sequence of strings.

use crate::chained_hashmap::ChainedHashMap;

/// Finds the most frequent value(s) of a non-empty sequence.
///
/// Frequencies are counted in a fresh [`ChainedHashMap`]. The returned list
/// holds every value that reached the highest frequency, in the order each
/// one first reached it, paired with that frequency. An empty input has no
/// mode and yields `None`.
///
/// ```rust
/// use primemap::find_mode;
///
/// let values: Vec<String> =
///     ["red", "blue", "red"].iter().map(ToString::to_string).collect();
/// let (modes, frequency) = find_mode(&values).unwrap();
/// assert_eq!(modes, vec!["red".to_string()]);
/// assert_eq!(frequency, 2);
/// ```
#[must_use]
pub fn find_mode(values: &[String]) -> Option<(Vec<String>, usize)> {
    let (first, rest) = values.split_first()?;

    let mut frequencies: ChainedHashMap<usize> = ChainedHashMap::new();
    let mut max_frequency = 1;
    let mut modes = vec![first.clone()];
    frequencies.insert(first.clone(), 1);

    for value in rest {
        let count = match frequencies.get_mut(value) {
            Some(count) => {
                *count = count.saturating_add(1);
                *count
            }
            None => {
                frequencies.insert(value.clone(), 1);
                1
            }
        };

        if count == max_frequency {
            modes.push(value.clone());
        } else if count > max_frequency {
            max_frequency = count;
            modes = vec![value.clone()];
        }
    }

    Some((modes, max_frequency))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds owned strings from literals.
    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_single_mode() {
        let values = strings(&[
            "Arch", "Manjaro", "Manjaro", "Mint", "Mint", "Mint", "Ubuntu", "Ubuntu", "Ubuntu",
            "Ubuntu",
        ]);
        let (modes, frequency) = find_mode(&values).unwrap();
        assert_eq!(modes, strings(&["Ubuntu"]));
        assert_eq!(frequency, 4);
    }

    #[test]
    fn test_all_distinct_values_tie() {
        // Every element appears once, so the whole input is the mode, in
        // input order.
        let values = strings(&["one", "two", "three", "four", "five"]);
        let (modes, frequency) = find_mode(&values).unwrap();
        assert_eq!(modes, values);
        assert_eq!(frequency, 1);
    }

    #[test]
    fn test_tied_modes_in_order_of_reaching_max() {
        let values =
            strings(&["2", "4", "2", "6", "8", "4", "1", "3", "4", "5", "7", "3", "3", "2"]);
        let (modes, frequency) = find_mode(&values).unwrap();
        // "4" hits three first, then "3", then "2".
        assert_eq!(modes, strings(&["4", "3", "2"]));
        assert_eq!(frequency, 3);
    }

    #[test]
    fn test_single_element() {
        let values = strings(&["only"]);
        let (modes, frequency) = find_mode(&values).unwrap();
        assert_eq!(modes, strings(&["only"]));
        assert_eq!(frequency, 1);
    }

    #[test]
    fn test_empty_input_has_no_mode() {
        assert_eq!(find_mode(&[]), None);
    }
}
