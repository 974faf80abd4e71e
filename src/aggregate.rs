//! CIDR aggregation.
//!
//! [`summarize`] replaces a list of networks with the smallest list covering
//! exactly the same addresses. The networks are sorted, then swept pairwise:
//! a pair is collapsed when the first network contains the second, or when
//! the two are the halves of a network one bit shorter. After each collapse
//! the sweep steps back so the new block can merge with its left neighbour.

use crate::address::IpAddress;
use crate::error::Result;

/// Map a possibly negative scan position onto the list.
fn pos_to_idx(pos: isize, len: usize) -> usize {
    let len = len as isize;
    (((pos % len) + len) % len) as usize
}

/// Aggregate `networks` without touching the input.
///
/// # Examples
///
/// ```
/// use cidrkit::{aggregate, IpAddress};
///
/// let nets = aggregate::summarize_str(&["10.0.0.1/24", "10.0.1.1/24", "10.0.2.1/23"])?;
/// let text: Vec<String> = nets.iter().map(IpAddress::to_string).collect();
/// assert_eq!(text, vec!["10.0.0.0/22"]);
/// # Ok::<(), cidrkit::AddrError>(())
/// ```
pub fn summarize(networks: &[IpAddress]) -> Vec<IpAddress> {
    match networks {
        [] => return Vec::new(),
        [single] => return vec![single.network()],
        _ => {}
    }

    let mut stack: Vec<IpAddress> = networks.iter().map(IpAddress::network).collect();
    stack.sort();

    let mut pos: isize = 0;
    loop {
        pos = pos.max(0);
        let len = stack.len();
        if pos as usize >= len {
            break;
        }
        let first = pos_to_idx(pos, len);
        pos += 1;
        if pos as usize >= len {
            break;
        }
        let second = pos_to_idx(pos, len);
        pos += 1;

        if stack[first].includes(&stack[second]) {
            log::trace!("{} covers {}", stack[first], stack[second]);
            pos -= 2;
            stack.remove(pos_to_idx(pos + 1, len));
            continue;
        }

        match widen_to_cover(&stack[first], &stack[second]) {
            Some(merged) => {
                log::trace!("{} + {} => {}", stack[first], stack[second], merged);
                pos -= 2;
                let idx = pos_to_idx(pos, len);
                stack[idx] = merged;
                stack.remove(pos_to_idx(pos + 1, len));
                pos -= 1;
            }
            None => pos -= 1,
        }
    }
    stack
}

/// `first` widened by one bit, if that covers exactly `first` and its
/// sibling `second`.
fn widen_to_cover(first: &IpAddress, second: &IpAddress) -> Option<IpAddress> {
    let length = first.prefix().length();
    if length == 0 || length != second.prefix().length() {
        return None;
    }
    let widened = first.change_prefix(length - 1).ok()?.network();
    widened.includes(second).then_some(widened)
}

/// Parse then [`summarize`].
pub fn summarize_str<S: AsRef<str>>(networks: &[S]) -> Result<Vec<IpAddress>> {
    let parsed = networks
        .iter()
        .map(|s| IpAddress::parse(s.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    Ok(summarize(&parsed))
}

/// Merge the last adjacent pair, scanning from the end, that collapses into
/// a single network. Returns false when no pair merges.
pub(crate) fn sum_first_found(networks: &mut Vec<IpAddress>) -> bool {
    for i in (0..networks.len().saturating_sub(1)).rev() {
        let mut merged = summarize(&networks[i..=i + 1]);
        if merged.len() == 1 {
            if let Some(net) = merged.pop() {
                networks[i] = net;
                networks.remove(i + 1);
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summarized(input: &[&str]) -> Vec<String> {
        summarize_str(input)
            .unwrap()
            .iter()
            .map(|n| n.to_string())
            .collect()
    }

    #[test]
    fn test_pos_to_idx() {
        assert_eq!(pos_to_idx(0, 4), 0);
        assert_eq!(pos_to_idx(5, 4), 1);
        assert_eq!(pos_to_idx(-1, 4), 3);
    }

    #[test]
    fn test_trivial_inputs() {
        assert!(summarize(&[]).is_empty());
        assert_eq!(summarized(&["10.1.0.4/24"]), vec!["10.1.0.0/24"]);
        assert_eq!(summarized(&["2000:1::4711/32"]), vec!["2000:1::/32"]);
    }

    #[test]
    fn test_four_into_one() {
        assert_eq!(
            summarized(&["10.0.0.1/24", "10.0.1.1/24", "10.0.2.1/24", "10.0.3.1/24"]),
            vec!["10.0.0.0/22"]
        );
    }

    #[test]
    fn test_unaligned_run() {
        assert_eq!(
            summarized(&["10.0.1.1/24", "10.0.2.1/24", "10.0.3.1/24", "10.0.4.1/24"]),
            vec!["10.0.1.0/24", "10.0.2.0/23", "10.0.4.0/24"]
        );
    }

    #[test]
    fn test_covering_network_absorbs() {
        assert_eq!(summarized(&["10.0.0.0/16", "10.0.2.0/24"]), vec!["10.0.0.0/16"]);
        assert_eq!(
            summarized(&["10.1.0.4/24", "7.0.0.0/0", "1.2.3.4/4"]),
            vec!["0.0.0.0/0"]
        );
    }

    #[test]
    fn test_mixed_families_stay_apart() {
        assert_eq!(
            summarized(&["2000::/16", "10.0.0.0/9", "10.128.0.0/9"]),
            vec!["10.0.0.0/8", "2000::/16"]
        );
    }

    #[test]
    fn test_sum_first_found() {
        let mut nets: Vec<IpAddress> = ["10.0.0.0/25", "10.0.0.128/26", "10.0.0.192/26"]
            .iter()
            .map(|s| IpAddress::parse(s).unwrap())
            .collect();
        assert!(sum_first_found(&mut nets));
        let text: Vec<String> = nets.iter().map(|n| n.to_string()).collect();
        assert_eq!(text, vec!["10.0.0.0/25", "10.0.0.128/25"]);
        let mut single = vec![IpAddress::parse("10.0.0.0/8").unwrap()];
        assert!(!sum_first_found(&mut single));
    }

    #[test]
    fn test_input_untouched() {
        let a = IpAddress::parse("10.0.0.1/24").unwrap();
        let b = IpAddress::parse("10.0.1.1/24").unwrap();
        let merged = summarize(&[a.clone(), b.clone()]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].to_string(), "10.0.0.0/23");
        assert_eq!(a.to_string(), "10.0.0.1/24");
        assert_eq!(b.to_string(), "10.0.1.1/24");
    }
}
