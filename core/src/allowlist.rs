//! Control-plane allow-list merging.

use kubehop_common::cluster::{AllowList, AllowListEntry};

/// Inserts or replaces the entry owned by `label`.
///
/// A matching entry keeps its position and only has its address replaced;
/// an absent label is appended at the end. All other entries keep their
/// relative order. After a merge the list holds at most one entry per label.
pub fn merge(list: &mut AllowList, label: &str, cidr: &str) {
    if let Some(entry) = list.iter_mut().find(|entry| entry.label == label) {
        entry.cidr = cidr.to_string();
        return;
    }

    list.push(AllowListEntry {
        label: label.to_string(),
        cidr: cidr.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(label: &str, cidr: &str) -> AllowListEntry {
        AllowListEntry {
            label: label.to_string(),
            cidr: cidr.to_string(),
        }
    }

    #[test]
    fn merge_appends_unknown_label() {
        let mut list = vec![entry("alice", "10.0.0.1/32"), entry("bob", "10.0.0.2/32")];

        merge(&mut list, "carol", "10.0.0.3/32");

        assert_eq!(list.len(), 3);
        // Prior entries keep their relative order, the new one goes last.
        assert_eq!(list[0].label, "alice");
        assert_eq!(list[1].label, "bob");
        assert_eq!(list[2], entry("carol", "10.0.0.3/32"));
    }

    #[test]
    fn merge_replaces_in_place_on_label_match() {
        let mut list = vec![
            entry("alice", "10.0.0.1/32"),
            entry("bob", "10.0.0.2/32"),
            entry("carol", "10.0.0.3/32"),
        ];

        merge(&mut list, "bob", "192.0.2.7/32");

        assert_eq!(list.len(), 3);
        assert_eq!(list[1], entry("bob", "192.0.2.7/32"));
        assert_eq!(list[0].label, "alice");
        assert_eq!(list[2].label, "carol");
    }

    #[test]
    fn merge_twice_same_label_keeps_length_and_last_address() {
        let mut list = AllowList::new();

        merge(&mut list, "dana", "198.51.100.1/32");
        merge(&mut list, "dana", "198.51.100.2/32");

        assert_eq!(list.len(), 1);
        assert_eq!(list[0], entry("dana", "198.51.100.2/32"));
    }

    #[test]
    fn merge_into_empty_list() {
        let mut list = AllowList::new();

        merge(&mut list, "alice", "203.0.113.9/32");

        assert_eq!(list, vec![entry("alice", "203.0.113.9/32")]);
    }
}
