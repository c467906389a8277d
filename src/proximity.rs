use crate::tokenizer::TokenSet;

/// Distance buckets (exclusive upper bound, bonus), closest first
const PROXIMITY_BUCKETS: [(usize, u32); 4] = [(50, 5), (100, 3), (200, 2), (500, 1)];

/// Char offsets of every non-overlapping occurrence of `needle` in `text`
pub fn char_positions(text: &str, needle: &str) -> Vec<usize> {
    let mut positions = Vec::new();
    if needle.is_empty() {
        return positions;
    }

    let mut last_byte = 0;
    let mut last_char = 0;
    for (byte_offset, _) in text.match_indices(needle) {
        last_char += text[last_byte..byte_offset].chars().count();
        last_byte = byte_offset;
        positions.push(last_char);
    }
    positions
}

/// Smallest gap between two ascending position lists
fn closest_pair(a: &[usize], b: &[usize]) -> Option<usize> {
    let (mut i, mut j) = (0, 0);
    let mut best: Option<usize> = None;

    while i < a.len() && j < b.len() {
        let gap = a[i].abs_diff(b[j]);
        best = Some(best.map_or(gap, |d| d.min(gap)));
        if gap == 0 {
            break;
        }
        if a[i] < b[j] {
            i += 1;
        } else {
            j += 1;
        }
    }
    best
}

/// Minimum char distance between occurrences of two distinct tokens.
/// `None` when fewer than two tokens occur in `text`.
pub fn min_distance(tokens: &TokenSet, text: &str) -> Option<usize> {
    let located: Vec<Vec<usize>> = tokens
        .iter()
        .map(|token| char_positions(text, token))
        .filter(|positions| !positions.is_empty())
        .collect();

    if located.len() < 2 {
        return None;
    }

    let mut best: Option<usize> = None;
    for (i, first) in located.iter().enumerate() {
        for second in &located[i + 1..] {
            if let Some(gap) = closest_pair(first, second) {
                best = Some(best.map_or(gap, |d| d.min(gap)));
            }
        }
    }
    best
}

/// Map a minimum distance to its bonus bucket
pub fn bonus_for_distance(distance: usize) -> u32 {
    PROXIMITY_BUCKETS
        .iter()
        .find(|(limit, _)| distance < *limit)
        .map_or(0, |(_, bonus)| *bonus)
}

/// Additive bonus for query tokens occurring close together in `text`.
/// `text` is expected to be lower-cased already.
pub fn proximity_bonus(tokens: &TokenSet, text: &str) -> u32 {
    min_distance(tokens, text).map_or(0, bonus_for_distance)
}
