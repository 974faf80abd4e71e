//! Run-length encoding of address groups.
//!
//! Consecutive equal groups collapse into a [`Run`]. Every run also records
//! whether it is the longest run of its value. The IPv6 formatter uses that
//! flag to pick the zero run that becomes `::`.

use std::collections::HashMap;

/// A maximal stretch of equal group values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub value: u32,
    /// Index of the first group in the run.
    pub position: usize,
    pub count: usize,
    /// No other run with the same value is strictly longer. Ties share the flag.
    pub longest: bool,
}

/// Encode `groups` into runs, in input order.
///
/// # Examples
///
/// ```
/// use cidrkit::rle;
///
/// let runs = rle::encode(&[0x2001, 0x888, 0, 0x6630, 0, 0, 0, 0]);
/// assert_eq!(runs.len(), 5);
/// assert!(!runs[2].longest);
/// assert!(runs[4].longest && runs[4].count == 4);
/// ```
pub fn encode(groups: &[u32]) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for (position, &value) in groups.iter().enumerate() {
        match runs.last_mut() {
            Some(run) if run.value == value => run.count += 1,
            _ => runs.push(Run {
                value,
                position,
                count: 1,
                longest: false,
            }),
        }
    }

    let mut max_count: HashMap<u32, usize> = HashMap::new();
    for run in &runs {
        let best = max_count.entry(run.value).or_insert(0);
        *best = (*best).max(run.count);
    }
    for run in &mut runs {
        run.longest = max_count.get(&run.value) == Some(&run.count);
    }
    runs
}
