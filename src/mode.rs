//! Most frequent strings of a sequence, counted with a `ChainingHashMap`

use crate::ChainingHashMap;

/// Returns every string that occurs most often in `items`, with that frequency.
///
/// The modes come back in the counting map's iteration order. An empty input
/// yields no modes and a frequency of 0.
#[must_use]
pub fn find_mode<S: AsRef<str>>(items: &[S]) -> (Vec<String>, usize) {
    let mut counts: ChainingHashMap<usize> = ChainingHashMap::default();

    for item in items {
        let item = item.as_ref();
        if let Some(count) = counts.get_mut(item) {
            *count = count.saturating_add(1);
        } else {
            counts.put(item.to_owned(), 1);
        }
    }

    let frequency = counts.iter().map(|(_, &count)| count).max().unwrap_or_default();
    let modes = counts
        .iter()
        .filter(|&(_, &count)| count == frequency)
        .map(|(item, _)| item.to_owned())
        .collect();

    (modes, frequency)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_modes(items: &[&str]) -> (Vec<String>, usize) {
        let (mut modes, frequency) = find_mode(items);
        modes.sort();
        (modes, frequency)
    }

    #[test]
    fn test_single_mode() {
        let (modes, frequency) = sorted_modes(&["apple", "apple", "grape", "melon", "peach"]);
        assert_eq!(modes, vec!["apple"]);
        assert_eq!(frequency, 2);
    }

    #[test]
    fn test_tied_modes() {
        let (modes, frequency) = sorted_modes(&[
            "Arch", "Manjaro", "Manjaro", "Mint", "Mint", "Mint", "Ubuntu", "Ubuntu", "Ubuntu",
        ]);
        assert_eq!(modes, vec!["Mint", "Ubuntu"]);
        assert_eq!(frequency, 3);
    }

    #[test]
    fn test_all_distinct() {
        let (modes, frequency) = sorted_modes(&["one", "two", "three", "four", "five"]);
        assert_eq!(modes, vec!["five", "four", "one", "three", "two"]);
        assert_eq!(frequency, 1);
    }

    #[test]
    fn test_numbers_as_strings() {
        let (modes, frequency) =
            sorted_modes(&["2", "4", "2", "6", "8", "4", "1", "3", "4", "5", "7", "3", "3", "2"]);
        assert_eq!(modes, vec!["2", "3", "4"]);
        assert_eq!(frequency, 3);
    }

    #[test]
    fn test_empty_input() {
        let empty: [String; 0] = [];
        assert_eq!(find_mode(&empty), (Vec::new(), 0));
    }

    #[test]
    fn test_many_items_grow_the_map() {
        let items: Vec<String> = (0..500).map(|i| format!("item{}", i % 100)).collect();
        let (modes, frequency) = find_mode(&items);
        assert_eq!(modes.len(), 100);
        assert_eq!(frequency, 5);
    }
}
