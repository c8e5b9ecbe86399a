//! The blocked-servers index: SHA-1 hashes of blocked server name
//! patterns and the wildcard-substitution membership test.

use std::net::{Ipv4Addr, Ipv6Addr};

use sha1::{Digest, Sha1};

use crate::errors::{Error, Result};

/// Ordered list of lowercase hex SHA-1 hashes of blocked server patterns.
///
/// Index-based mutation exists for test and debug convenience only; the
/// collection is not synchronized for cross-thread sharing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockedServers {
    hashes: Vec<String>,
}

impl BlockedServers {
    pub fn new(hashes: Vec<String>) -> Self {
        Self { hashes }
    }

    /// Parses the newline-separated plain-text body of the
    /// blocked-servers endpoint.
    pub(crate) fn parse(body: &str) -> Self {
        Self {
            hashes: body
                .split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.hashes.get(index).map(String::as_str)
    }

    /// Replaces the hash at `index`, returning the previous value, or
    /// `None` when the index is out of range
    pub fn replace(&mut self, index: usize, hash: String) -> Option<String> {
        let slot = self.hashes.get_mut(index)?;
        Some(std::mem::replace(slot, hash))
    }

    /// Removes and returns the hash at `index`, or `None` when the index
    /// is out of range
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.hashes.len() {
            Some(self.hashes.remove(index))
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.hashes.iter().map(String::as_str)
    }

    /// Tests whether a server name is covered by the blocked list.
    ///
    /// The name itself is hashed first, then wildcard substitutions:
    /// right-truncated for IPv4 literals (`136.243.88.*`, `136.243.*`, ...)
    /// and left-truncated for hostnames (`*.mc.minetime.com`,
    /// `*.minetime.com`, ...). Matching is case-insensitive. IPv6 literals
    /// are rejected because the upstream protocol has no representation
    /// for them.
    pub fn is_blocked(&self, server_name: &str) -> Result<bool> {
        if server_name.parse::<Ipv6Addr>().is_ok() {
            return Err(Error::InvalidInput(
                "Minecraft does not support IPv6, so this library too".to_string(),
            ));
        }

        let input = server_name.to_lowercase();
        let is_ip = input.parse::<Ipv4Addr>().is_ok();

        for mask in substitutions(&input, is_ip) {
            let hash = format!("{:x}", Sha1::digest(mask.as_bytes()));
            if self.hashes.iter().any(|known| *known == hash) {
                return Ok(true);
            }
        }

        Ok(false)
    }
}

/// The unmodified input first, then progressively wider wildcards until a
/// single segment remains.
fn substitutions(input: &str, right: bool) -> Vec<String> {
    let mut masks = vec![input.to_string()];
    let mut parts: Vec<&str> = input.split('.').collect();

    while parts.len() > 1 {
        if right {
            parts.pop();
            masks.push(format!("{}.*", parts.join(".")));
        } else {
            parts.remove(0);
            masks.push(format!("*.{}", parts.join(".")));
        }
    }

    masks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> BlockedServers {
        BlockedServers::new(vec![
            // *.minetime.com
            "6f2520f8bd70a718c568ab5274c56bdbbfc14ef4".to_string(),
            // brandonisan.unusualperson.com
            "48f04e89d20b15de115503f22fedfe2cb2d1ab12".to_string(),
            // 136.243.*
            "4ca799b162d4ebdf2ec5e0ece2ed51fba5a3db65".to_string(),
            // 147.117.184.134
            "b7a822278e90205f016c1b028122e222f836641b".to_string(),
        ])
    }

    #[test]
    fn hostname_wildcards() {
        let model = model();
        assert!(model.is_blocked("mc.minetime.com").unwrap());
        assert!(model.is_blocked("sub.mc.minetime.com").unwrap());
        // No wildcard covers the bare domain
        assert!(!model.is_blocked("minetime.com").unwrap());
        assert!(!model.is_blocked("minetime.mc.com").unwrap());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let model = model();
        assert!(model.is_blocked("MC.MINETIME.COM").unwrap());
    }

    #[test]
    fn exact_hostname_does_not_cover_siblings() {
        let model = model();
        assert!(model.is_blocked("brandonisan.unusualperson.com").unwrap());
        assert!(!model.is_blocked("other.unusualperson.com").unwrap());
    }

    #[test]
    fn ipv4_wildcards_truncate_from_the_right() {
        let model = model();
        assert!(model.is_blocked("136.243.88.97").unwrap());
        assert!(!model.is_blocked("136.244.88.97").unwrap());
        assert!(model.is_blocked("147.117.184.134").unwrap());
        assert!(!model.is_blocked("147.117.184.135").unwrap());
    }

    #[test]
    fn ipv6_literals_are_rejected() {
        let model = BlockedServers::default();
        let err = model
            .is_blocked("d860:5df:9447:61b3:d1dd:1170:146a:bcc")
            .unwrap_err();
        assert!(matches!(err, crate::errors::Error::InvalidInput(_)));
    }

    #[test]
    fn substitution_order() {
        assert_eq!(
            substitutions("sub.mc.minetime.com", false),
            vec![
                "sub.mc.minetime.com",
                "*.mc.minetime.com",
                "*.minetime.com",
                "*.com",
            ]
        );
        assert_eq!(
            substitutions("136.243.88.97", true),
            vec!["136.243.88.97", "136.243.88.*", "136.243.*", "136.*"]
        );
    }

    #[test]
    fn index_access_and_mutation() {
        let mut model = BlockedServers::new(vec!["1".to_string(), "2".to_string(), "3".to_string()]);
        assert_eq!(model.len(), 3);
        assert_eq!(model.get(0), Some("1"));
        assert_eq!(model.get(65535), None);

        assert_eq!(model.replace(1, "replaced".to_string()), Some("2".to_string()));
        assert_eq!(model.get(1), Some("replaced"));

        assert_eq!(model.remove(0), Some("1".to_string()));
        assert_eq!(model.len(), 2);
        assert_eq!(model.get(0), Some("replaced"));
    }

    #[test]
    fn out_of_range_mutation_is_a_no_op() {
        let mut model = BlockedServers::new(vec!["1".to_string()]);
        assert_eq!(model.replace(5, "ignored".to_string()), None);
        assert_eq!(model.remove(5), None);
        assert_eq!(model.len(), 1);
        assert_eq!(model.get(0), Some("1"));
    }

    #[test]
    fn parses_newline_separated_body() {
        let model = BlockedServers::parse("aaa\nbbb\n\nccc\n");
        assert_eq!(model.len(), 3);
        assert_eq!(model.iter().collect::<Vec<_>>(), vec!["aaa", "bbb", "ccc"]);
    }
}
