//! Closest-match suggestions for rejected enumeration values.

/// Closest candidate by edit distance, or `None` when nothing is close enough
/// (distance above half the longer string).
pub(crate) fn closest_match<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let input_lower = input.to_lowercase();
    let (name, dist) = candidates
        .iter()
        .map(|&candidate| (candidate, levenshtein(&input_lower, &candidate.to_lowercase())))
        .min_by_key(|&(_, dist)| dist)?;

    let max_len = input.len().max(name.len());
    (dist <= max_len / 2).then_some(name)
}

pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
