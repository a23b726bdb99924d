//!
//! Ownership matching: decides whether a set of controlled addresses can
//! satisfy the owner terms of an output and which signature slots to use.
//!

use super::AddressMap;
use crate::imports::*;

/// Signature slots selected to spend an output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnersMatch {
    /// Owner address indices that will sign, ascending.
    pub sig_indices: Vec<u32>,
    /// Controlled address to its position in the input credential.
    pub address_map: AddressMap,
}

/// Matches `owners` against the `controlled` addresses as of `min_issuance_time`.
///
/// Without `explicit_slots` the owner addresses are scanned in ascending order
/// and the first `threshold` controlled ones are used. With `explicit_slots`
/// the given slots are validated instead: they must be ascending, all
/// controlled and exactly `threshold` many.
pub fn match_owners(
    owners: &OutputOwners,
    controlled: &AHashSet<Address>,
    min_issuance_time: u64,
    explicit_slots: Option<&[u32]>,
) -> Option<OwnersMatch> {
    if owners.is_locked_at(min_issuance_time) {
        return None;
    }

    let threshold = owners.threshold() as usize;
    let mut sig_indices = Vec::with_capacity(threshold);
    let mut address_map = AddressMap::default();

    match explicit_slots {
        None => {
            for (index, address) in owners.addresses().iter().enumerate() {
                if sig_indices.len() == threshold {
                    break;
                }
                if controlled.contains(address) {
                    address_map.insert(*address, sig_indices.len() as u32);
                    sig_indices.push(index as u32);
                }
            }
            if sig_indices.len() < threshold {
                return None;
            }
        }
        Some(slots) => {
            if slots.len() != threshold || !slots.iter().tuple_windows().all(|(a, b)| a < b) {
                return None;
            }
            for &slot in slots {
                let address = owners.addresses().get(slot as usize)?;
                if !controlled.contains(address) {
                    return None;
                }
                address_map.insert(*address, sig_indices.len() as u32);
                sig_indices.push(slot);
            }
        }
    }

    Some(OwnersMatch { sig_indices, address_map })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(b: u8) -> Address {
        Address::new([b; 20])
    }

    fn controlled(bytes: &[u8]) -> AHashSet<Address> {
        bytes.iter().copied().map(address).collect()
    }

    fn owners(locktime: u64, threshold: u32, bytes: &[u8]) -> OutputOwners {
        OutputOwners::try_new(locktime, threshold, bytes.iter().copied().map(address)).unwrap()
    }

    #[test]
    fn test_greedy_ascending_selection() {
        let owners = owners(0, 2, &[5, 1, 3, 4]);
        // sorted: 1, 3, 4, 5
        let found = match_owners(&owners, &controlled(&[5, 3, 4]), 0, None).unwrap();
        assert_eq!(found.sig_indices, vec![1, 2]);
        assert_eq!(found.address_map.get(&address(3)), Some(0));
        assert_eq!(found.address_map.get(&address(4)), Some(1));
        assert!(!found.address_map.contains(&address(5)));
    }

    #[test]
    fn test_threshold_not_reached() {
        let owners = owners(0, 2, &[1, 2, 3]);
        assert!(match_owners(&owners, &controlled(&[2, 9]), 0, None).is_none());
        assert!(match_owners(&owners, &controlled(&[]), 0, None).is_none());
    }

    #[test]
    fn test_locked_owners() {
        let owners = owners(100, 1, &[1]);
        assert!(match_owners(&owners, &controlled(&[1]), 99, None).is_none());
        assert_eq!(match_owners(&owners, &controlled(&[1]), 100, None).unwrap().sig_indices, vec![0]);
    }

    #[test]
    fn test_explicit_slots() {
        let owners = owners(0, 2, &[1, 2, 3]);
        let all = controlled(&[1, 2, 3]);
        let found = match_owners(&owners, &all, 0, Some(&[0, 2])).unwrap();
        assert_eq!(found.sig_indices, vec![0, 2]);
        assert_eq!(found.address_map.get(&address(3)), Some(1));

        // wrong count
        assert!(match_owners(&owners, &all, 0, Some(&[0])).is_none());
        assert!(match_owners(&owners, &all, 0, Some(&[0, 1, 2])).is_none());
        // out of range
        assert!(match_owners(&owners, &all, 0, Some(&[0, 3])).is_none());
        // not ascending
        assert!(match_owners(&owners, &all, 0, Some(&[2, 0])).is_none());
        assert!(match_owners(&owners, &all, 0, Some(&[1, 1])).is_none());
        // slot address not controlled
        assert!(match_owners(&owners, &controlled(&[1, 2]), 0, Some(&[0, 2])).is_none());
    }
}
